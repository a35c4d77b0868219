//! Narrows a sequence of users by an optional filter. Filters are decoded from loose argument
//! values at the GraphQL boundary, so resolvers only ever see a typed [`UsersFilter`].
//!
//! [`UsersFilter`]: ./struct.UsersFilter.html

use super::store::{Gender, User};
use super::value::Value;
use crate::error::Error;
use log::trace;
use std::convert::TryFrom;
use std::str::FromStr;
use std::sync::Arc;

/// Conditions over the attributes of a user. Every condition is optional and a user must
/// satisfy all of the present ones. A filter with no conditions keeps every user.
///
/// # Examples
///
/// ```rust
/// use usergraph::engine::filter::UsersFilter;
/// use usergraph::engine::store::Gender;
///
/// let f = UsersFilter::new(Some("graphql.com".to_string()), Some(Gender::Female));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UsersFilter {
    email: Option<String>,
    gender: Option<Gender>,
}

impl UsersFilter {
    pub fn new(email: Option<String>, gender: Option<Gender>) -> UsersFilter {
        UsersFilter { email, gender }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Returns true if `user` satisfies every present condition. The email condition is a
    /// case-sensitive substring match, and the gender condition is an exact match.
    pub fn matches(&self, user: &User) -> bool {
        self.email.as_ref().map_or(true, |e| user.email().contains(e.as_str()))
            && self.gender.map_or(true, |g| user.gender() == g)
    }
}

impl TryFrom<&Value> for UsersFilter {
    type Error = Error;

    /// Decodes a filter from a loose argument map with optional `email` and `gender` entries.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`InvalidArgument`] if the value is not a map, if an entry
    /// is not a string, or if the gender is not one of the enumeration's values.
    ///
    /// [`Error`]: ../../error/enum.Error.html
    /// [`InvalidArgument`]: ../../error/enum.Error.html#variant.InvalidArgument
    fn try_from(value: &Value) -> Result<UsersFilter, Error> {
        if !matches!(value, Value::Map(_)) {
            return Err(Error::InvalidArgument {
                name: "filter".to_string(),
                value: format!("{:?}", value),
            });
        }

        let email = value
            .get("email")
            .map(|v| string_arg("email", v))
            .transpose()?;
        let gender = value
            .get("gender")
            .map(|v| string_arg("gender", v).and_then(|s| Gender::from_str(&s)))
            .transpose()?;

        Ok(UsersFilter { email, gender })
    }
}

fn string_arg(name: &str, value: &Value) -> Result<String, Error> {
    String::try_from(value.clone()).map_err(|_| Error::InvalidArgument {
        name: name.to_string(),
        value: format!("{:?}", value),
    })
}

/// Returns the users that satisfy `filter_opt`, in stored order. An absent filter keeps
/// every user.
pub fn apply(users: &[Arc<User>], filter_opt: Option<&UsersFilter>) -> Vec<Arc<User>> {
    trace!("filter::apply called -- filter_opt: {:?}", filter_opt);

    match filter_opt {
        None => users.to_vec(),
        Some(filter) => users
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, UsersFilter};
    use crate::engine::config::Configuration;
    use crate::engine::store::{Gender, Store, User};
    use crate::engine::value::Value;
    use crate::Error;
    use maplit::hashmap;
    use std::convert::TryFrom;
    use std::sync::Arc;

    fn sample_users() -> Vec<Arc<User>> {
        Store::try_from(Configuration::sample())
            .unwrap()
            .get_all()
            .to_vec()
    }

    fn names(users: &[Arc<User>]) -> Vec<&str> {
        users.iter().map(|u| u.name()).collect()
    }

    /// Passes if an absent filter keeps every user in order
    #[test]
    fn apply_none() {
        let users = sample_users();

        assert_eq!(apply(&users, None), users);
    }

    /// Passes if a filter with no conditions keeps every user in order
    #[test]
    fn apply_empty() {
        let users = sample_users();

        assert_eq!(apply(&users, Some(&UsersFilter::default())), users);
    }

    /// Passes if the gender condition is an exact match
    #[test]
    fn apply_gender() {
        let users = sample_users();

        let f = UsersFilter::new(None, Some(Gender::Female));
        assert_eq!(names(&apply(&users, Some(&f))), vec!["Mary"]);
    }

    /// Passes if the email condition is a case-sensitive substring match
    #[test]
    fn apply_email() {
        let users = sample_users();

        let f = UsersFilter::new(Some("graphql.com".to_string()), None);
        assert_eq!(names(&apply(&users, Some(&f))), vec!["Jane", "Mary"]);

        let f = UsersFilter::new(Some("GRAPHQL".to_string()), None);
        assert!(apply(&users, Some(&f)).is_empty());
    }

    /// Passes if both conditions must hold
    #[test]
    fn apply_both() {
        let users = sample_users();

        let f = UsersFilter::new(Some("graphql".to_string()), Some(Gender::Other));
        assert_eq!(names(&apply(&users, Some(&f))), vec!["Jane"]);

        let f = UsersFilter::new(Some("graphqla".to_string()), Some(Gender::Female));
        assert!(apply(&users, Some(&f)).is_empty());
    }

    /// Passes if a user is kept exactly when it satisfies every present condition
    #[test]
    fn apply_membership() {
        let users = sample_users();
        let emails = vec![None, Some("bob"), Some("graphql"), Some("@"), Some("nomatch")];
        let genders = vec![None, Some(Gender::Male), Some(Gender::Female), Some(Gender::Other)];

        for e in &emails {
            for g in &genders {
                let f = UsersFilter::new(e.map(|s| s.to_string()), *g);
                let kept = apply(&users, Some(&f));
                for u in &users {
                    let expected = e.map_or(true, |s| u.email().contains(s))
                        && g.map_or(true, |g| u.gender() == g);
                    assert_eq!(kept.contains(u), expected);
                }
            }
        }
    }

    /// Passes if a filter decodes from a loose argument map
    #[test]
    fn decode() {
        let v = Value::Map(hashmap! {
            "email".to_string() => Value::String("graphql".to_string()),
            "gender".to_string() => Value::String("MALE".to_string()),
        });

        let f = UsersFilter::try_from(&v).unwrap();
        assert_eq!(f.email(), Some("graphql"));
        assert_eq!(f.gender(), Some(Gender::Male));
    }

    /// Passes if null and missing entries decode to absent conditions
    #[test]
    fn decode_absent() {
        let v = Value::Map(hashmap! {
            "gender".to_string() => Value::Null,
        });

        assert_eq!(UsersFilter::try_from(&v).unwrap(), UsersFilter::default());
    }

    /// Passes if an unrecognized gender fails to decode rather than filtering everything out
    #[test]
    fn decode_unknown_gender() {
        let v = Value::Map(hashmap! {
            "gender".to_string() => Value::String("ROBOT".to_string()),
        });

        match UsersFilter::try_from(&v) {
            Err(Error::InvalidArgument { name, value }) => {
                assert_eq!(name, "gender");
                assert_eq!(value, "ROBOT");
            }
            other => panic!("Expected InvalidArgument, found {:#?}", other),
        }
    }

    /// Passes if wrongly shaped input fails to decode
    #[test]
    fn decode_wrong_shape() {
        assert!(matches!(
            UsersFilter::try_from(&Value::String("FEMALE".to_string())),
            Err(Error::InvalidArgument { .. })
        ));

        let v = Value::Map(hashmap! {
            "email".to_string() => Value::Int64(5),
        });
        assert!(matches!(
            UsersFilter::try_from(&v),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
