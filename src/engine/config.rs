//! This module provides types for the configuration of the user dataset served by the engine.
//! A configuration is usually loaded from a YAML file, or taken from the built-in sample.

use super::store::Gender;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fs::File;
use std::io::BufReader;

/// Version of the configuration file format understood by this crate
pub const CONFIG_VERSION: i32 = 1;

/// Configuration of the user dataset. The configuration contains the version of the
/// configuration file format and the list of users, in the order they are served.
///
/// # Examples
///
/// ```rust
/// use usergraph::engine::config::Configuration;
///
/// let c = Configuration::new(1, Vec::new());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Version of the configuration file format used
    version: i32,

    /// Users of the dataset, each defining its children by identifier
    #[serde(default)]
    users: Vec<UserDef>,
}

impl Configuration {
    /// Creates a new [`Configuration`] data structure
    ///
    /// [`Configuration`]: struct.Configuration.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// use usergraph::engine::config::{Configuration, UserDef};
    /// use usergraph::engine::store::Gender;
    ///
    /// let bob = UserDef::new("aaa", "Bob", "bob@graphqla.fr", Gender::Male, vec![]);
    /// let c = Configuration::new(1, vec![bob]);
    /// ```
    pub fn new(version: i32, users: Vec<UserDef>) -> Configuration {
        Configuration { version, users }
    }

    /// Returns the built-in sample dataset: Bob and Jane, and Mary whose children are Bob and
    /// Jane.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use usergraph::engine::config::Configuration;
    ///
    /// let c = Configuration::sample();
    /// assert_eq!(c.users().len(), 3);
    /// ```
    pub fn sample() -> Configuration {
        Configuration::new(
            CONFIG_VERSION,
            vec![
                UserDef::new("aaa", "Bob", "bob@graphqla.fr", Gender::Male, vec![]),
                UserDef::new("bbb", "Jane", "jane@graphql.com", Gender::Other, vec![]),
                UserDef::new(
                    "ccc",
                    "Mary",
                    "mary@graphql.com",
                    Gender::Female,
                    vec!["aaa".to_string(), "bbb".to_string()],
                ),
            ],
        )
    }

    /// Creates a new [`Configuration`] from the contents of the YAML file at `path`.
    ///
    /// [`Configuration`]: struct.Configuration.html
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`ConfigOpenFailed`] if the file could not be opened, or
    /// [`DeserializationFailed`] if the contents are not a valid configuration.
    ///
    /// [`Error`]: ../../error/enum.Error.html
    /// [`ConfigOpenFailed`]: ../../error/enum.Error.html#variant.ConfigOpenFailed
    /// [`DeserializationFailed`]: ../../error/enum.Error.html#variant.DeserializationFailed
    pub fn from_file(path: &str) -> Result<Configuration, Error> {
        let f = File::open(path)?;
        let r = BufReader::new(f);
        Ok(serde_yaml::from_reader(r)?)
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn users(&self) -> &[UserDef] {
        &self.users
    }
}

impl TryFrom<String> for Configuration {
    type Error = Error;

    fn try_from(yaml: String) -> Result<Configuration, Error> {
        Ok(serde_yaml::from_str(&yaml)?)
    }
}

impl TryFrom<&str> for Configuration {
    type Error = Error;

    fn try_from(yaml: &str) -> Result<Configuration, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Configuration item for a single user. Children are listed by identifier and must name other
/// users of the same configuration.
///
/// # Examples
///
/// ```rust
/// use usergraph::engine::config::UserDef;
/// use usergraph::engine::store::Gender;
///
/// let u = UserDef::new("ccc", "Mary", "mary@graphql.com", Gender::Female,
///     vec!["aaa".to_string()]);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserDef {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    gender: Gender,
    #[serde(default)]
    children: Vec<String>,
}

impl UserDef {
    pub fn new(
        id: &str,
        name: &str,
        email: &str,
        gender: Gender,
        children: Vec<String>,
    ) -> UserDef {
        UserDef {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            gender,
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::{Configuration, CONFIG_VERSION};
    use crate::engine::store::Gender;
    use crate::Error;
    use std::convert::TryFrom;

    /// Passes if the sample dataset holds Bob, Jane and Mary
    #[test]
    fn sample() {
        let c = Configuration::sample();

        assert_eq!(c.version(), CONFIG_VERSION);
        let ids: Vec<&str> = c.users().iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec!["aaa", "bbb", "ccc"]);
        assert_eq!(c.users()[2].children(), &["aaa".to_string(), "bbb".to_string()]);
    }

    /// Passes if a YAML configuration deserializes, with gender and children defaulted
    #[test]
    fn from_yaml() {
        let c = Configuration::try_from(
            "
version: 1
users:
  - id: x1
    name: Ann
    email: ann@example.com
    gender: FEMALE
    children: [x2]
  - id: x2
    name: Al
    email: al@example.com
",
        )
        .unwrap();

        assert_eq!(c.users().len(), 2);
        assert_eq!(c.users()[0].gender(), Gender::Female);
        assert_eq!(c.users()[1].gender(), Gender::Other);
        assert!(c.users()[1].children().is_empty());
    }

    /// Passes if an unknown gender in a configuration is rejected
    #[test]
    fn from_yaml_bad_gender() {
        let e = Configuration::try_from(
            "
version: 1
users:
  - id: x1
    name: Ann
    email: ann@example.com
    gender: ROBOT
",
        )
        .expect_err("Expected deserialization to fail");

        assert!(matches!(e, Error::DeserializationFailed { .. }));
    }

    /// Passes if a missing configuration file is reported as such
    #[test]
    fn from_missing_file() {
        let e = Configuration::from_file("tests/fixtures/does_not_exist.yml")
            .expect_err("Expected open to fail");

        assert!(matches!(e, Error::ConfigOpenFailed { .. }));
    }

    /// Passes if the fixture file loads
    #[test]
    fn from_file() {
        let c = Configuration::from_file("tests/fixtures/users.yml").unwrap();

        assert_eq!(c.version(), 1);
        assert!(!c.users().is_empty());
    }
}
