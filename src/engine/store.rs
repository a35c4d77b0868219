//! The in-memory entity store. The store is built once from a [`Configuration`] and is
//! read-only afterwards, so it can be shared between request handlers without locking.
//!
//! [`Configuration`]: ../config/struct.Configuration.html

use super::config::{Configuration, CONFIG_VERSION};
use crate::error::Error;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Gender of a [`User`]. Serialized, and exposed in the GraphQL schema, as `MALE`, `FEMALE`, and
/// `OTHER`.
///
/// [`User`]: ./struct.User.html
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, juniper::GraphQLEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Returns all values of the enumeration in declaration order
    pub fn values() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    /// Returns the name of the value as it appears in the GraphQL schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Other
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    /// Parses the schema name of a gender. Matching is exact, so `male` is rejected.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`InvalidArgument`] if `s` is not one of the values.
    ///
    /// [`Error`]: ../../error/enum.Error.html
    /// [`InvalidArgument`]: ../../error/enum.Error.html#variant.InvalidArgument
    fn from_str(s: &str) -> Result<Gender, Error> {
        Gender::values()
            .iter()
            .find(|g| g.as_str() == s)
            .copied()
            .ok_or_else(|| Error::InvalidArgument {
                name: "gender".to_string(),
                value: s.to_string(),
            })
    }
}

/// A user record. Children are held as identifiers of other users in the same [`Store`], so a
/// user may appear both at the top level and as the child of another user.
///
/// [`Store`]: ./struct.Store.html
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    id: String,
    name: String,
    email: String,
    gender: Gender,
    children: Vec<String>,
}

impl User {
    pub fn new(id: &str, name: &str, email: &str, gender: Gender, children: Vec<String>) -> User {
        User {
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

    /// Returns the identifiers of the user's children, in stored order
    pub fn child_ids(&self) -> &[String] {
        &self.children
    }
}

/// Immutable collection of users, in a stable order, indexed by identifier.
///
/// # Examples
///
/// ```rust
/// use std::convert::TryFrom;
/// use usergraph::engine::config::Configuration;
/// use usergraph::engine::store::Store;
///
/// let store = Store::try_from(Configuration::sample()).unwrap();
/// assert_eq!(store.get_all().len(), 3);
/// assert!(store.get_by_id("zzz").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Store {
    users: Vec<Arc<User>>,
    index: HashMap<String, usize>,
}

impl Store {
    /// Returns every user of the store, in the order the users were configured
    pub fn get_all(&self) -> &[Arc<User>] {
        &self.users
    }

    /// Returns the user with identifier `id`, or `None` if there is no such user
    pub fn get_by_id(&self, id: &str) -> Option<Arc<User>> {
        trace!("Store::get_by_id called -- id: {}", id);
        self.index.get(id).map(|i| self.users[*i].clone())
    }

    /// Returns the children of `parent`, in stored order
    pub fn children(&self, parent: &User) -> Vec<Arc<User>> {
        parent
            .child_ids()
            .iter()
            .filter_map(|id| self.get_by_id(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl TryFrom<Configuration> for Store {
    type Error = Error;

    /// Builds a store from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`ConfigVersionMismatched`] if the configuration is of an
    /// unsupported version, [`ConfigItemDuplicated`] if two users share an identifier, or
    /// [`ChildNotFound`] if a user lists a child that is not in the configuration.
    ///
    /// [`Error`]: ../../error/enum.Error.html
    /// [`ConfigVersionMismatched`]: ../../error/enum.Error.html#variant.ConfigVersionMismatched
    /// [`ConfigItemDuplicated`]: ../../error/enum.Error.html#variant.ConfigItemDuplicated
    /// [`ChildNotFound`]: ../../error/enum.Error.html#variant.ChildNotFound
    fn try_from(c: Configuration) -> Result<Store, Error> {
        if c.version() != CONFIG_VERSION {
            return Err(Error::ConfigVersionMismatched {
                expected: CONFIG_VERSION,
                found: c.version(),
            });
        }

        let mut users = Vec::with_capacity(c.users().len());
        let mut index = HashMap::with_capacity(c.users().len());
        for ud in c.users() {
            if index.insert(ud.id().to_string(), users.len()).is_some() {
                return Err(Error::ConfigItemDuplicated {
                    id: ud.id().to_string(),
                });
            }
            users.push(Arc::new(User::new(
                ud.id(),
                ud.name(),
                ud.email(),
                ud.gender(),
                ud.children().to_vec(),
            )));
        }

        // children are checked once every identifier is known, so a child may be listed before
        // it is defined
        for u in &users {
            if let Some(missing) = u.child_ids().iter().find(|id| !index.contains_key(*id)) {
                return Err(Error::ChildNotFound {
                    id: missing.to_string(),
                });
            }
        }

        debug!("Store::try_from -- loaded {} users", users.len());
        Ok(Store { users, index })
    }
}

#[cfg(test)]
mod tests {
    use super::{Gender, Store};
    use crate::engine::config::{Configuration, UserDef};
    use crate::Error;
    use std::convert::TryFrom;
    use std::str::FromStr;

    fn sample_store() -> Store {
        Store::try_from(Configuration::sample()).unwrap()
    }

    /// Passes if every gender parses from its own schema name
    #[test]
    fn gender_round_trip() {
        for g in Gender::values() {
            assert_eq!(Gender::from_str(g.as_str()).unwrap(), *g);
        }
    }

    /// Passes if an unknown or wrongly-cased gender is an invalid argument
    #[test]
    fn gender_invalid() {
        for s in &["ROBOT", "male", ""] {
            match Gender::from_str(s) {
                Err(Error::InvalidArgument { name, value }) => {
                    assert_eq!(name, "gender");
                    assert_eq!(&value, s);
                }
                other => panic!("Expected InvalidArgument, found {:#?}", other),
            }
        }
    }

    /// Passes if the store keeps the configured order
    #[test]
    fn get_all_in_order() {
        let store = sample_store();

        let names: Vec<&str> = store.get_all().iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["Bob", "Jane", "Mary"]);
    }

    /// Passes if lookup by id finds exactly the configured user, and nothing for unknown ids
    #[test]
    fn get_by_id() {
        let store = sample_store();

        let mary = store.get_by_id("ccc").expect("Expected Mary");
        assert_eq!(mary.name(), "Mary");
        assert_eq!(mary.gender(), Gender::Female);
        assert!(store.get_by_id("zzz").is_none());
    }

    /// Passes if children resolve to the shared top-level users in stored order
    #[test]
    fn children() {
        let store = sample_store();

        let mary = store.get_by_id("ccc").unwrap();
        let children = store.children(&mary);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], store.get_by_id("aaa").unwrap());
        assert_eq!(children[1], store.get_by_id("bbb").unwrap());
        assert!(store.children(&children[0]).is_empty());
    }

    /// Passes if a repeated identifier is rejected
    #[test]
    fn duplicate_id() {
        let c = Configuration::new(
            1,
            vec![
                UserDef::new("aaa", "Bob", "bob@graphqla.fr", Gender::Male, vec![]),
                UserDef::new("aaa", "Rob", "rob@graphqla.fr", Gender::Male, vec![]),
            ],
        );

        match Store::try_from(c) {
            Err(Error::ConfigItemDuplicated { id }) => assert_eq!(id, "aaa"),
            other => panic!("Expected ConfigItemDuplicated, found {:#?}", other),
        }
    }

    /// Passes if a dangling child reference is rejected
    #[test]
    fn missing_child() {
        let c = Configuration::new(
            1,
            vec![UserDef::new(
                "ccc",
                "Mary",
                "mary@graphql.com",
                Gender::Female,
                vec!["zzz".to_string()],
            )],
        );

        match Store::try_from(c) {
            Err(Error::ChildNotFound { id }) => assert_eq!(id, "zzz"),
            other => panic!("Expected ChildNotFound, found {:#?}", other),
        }
    }

    /// Passes if a child may be declared after its parent
    #[test]
    fn forward_child_reference() {
        let c = Configuration::new(
            1,
            vec![
                UserDef::new("p", "Pat", "pat@x.io", Gender::Other, vec!["c".to_string()]),
                UserDef::new("c", "Cam", "cam@x.io", Gender::Male, vec![]),
            ],
        );

        let store = Store::try_from(c).unwrap();
        let parent = store.get_by_id("p").unwrap();
        assert_eq!(store.children(&parent)[0].id(), "c");
    }

    /// Passes if an unsupported configuration version is rejected
    #[test]
    fn version_mismatch() {
        let c = Configuration::new(2, vec![]);

        assert!(matches!(
            Store::try_from(c),
            Err(Error::ConfigVersionMismatched {
                expected: 1,
                found: 2
            })
        ));
    }

    /// Passes if Store implements the Send and Sync traits
    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Store>();
    }
}
