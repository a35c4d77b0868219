//! Loosely-typed values used to carry GraphQL arguments across the boundary between the
//! execution library and the resolvers.

use crate::Error;
use std::collections::HashMap;
use std::convert::{TryFrom, TryInto};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Array(Vec<Value>),
    Bool(bool),
    Float64(f64),
    Int64(i64),
    Map(HashMap<String, Value>),
    Null,
    String(String),
    UInt64(u64),
}

impl Value {
    /// Returns the entry `key` of a [`Value::Map`], treating an explicit `null` the same as an
    /// absent entry. Returns `None` for any other variant.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => match m.get(key) {
                None | Some(Value::Null) => None,
                Some(v) => Some(v),
            },
            _ => None,
        }
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Value, Error> {
        match value {
            serde_json::Value::Array(a) => Ok(Value::Array(
                a.into_iter()
                    .map(|v| v.try_into())
                    .collect::<Result<Vec<Value>, Error>>()?,
            )),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int64(i))
                } else if let Some(i) = n.as_u64() {
                    Ok(Value::UInt64(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float64(f))
                } else {
                    Err(Error::TypeConversionFailed {
                        src: format!("{:#?}", n),
                        dst: "Value".to_string(),
                    })
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Object(m) => {
                let mut hm = HashMap::new();
                for (k, v) in m.into_iter() {
                    hm.insert(k, v.try_into()?);
                }
                Ok(Value::Map(hm))
            }
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<String, Self::Error> {
        if let Value::String(s) = value {
            Ok(s)
        } else {
            Err(Error::TypeConversionFailed {
                src: format!("{:#?}", value),
                dst: "String".to_string(),
            })
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<serde_json::Value, Error> {
        match value {
            Value::Array(a) => {
                let mut v = Vec::new();
                for val in a {
                    v.push(val.try_into()?)
                }
                Ok(serde_json::Value::Array(v))
            }
            Value::Bool(b) => Ok(serde_json::Value::Bool(b)),
            Value::Float64(f) => Ok(serde_json::Value::Number(
                serde_json::Number::from_f64(f).ok_or_else(|| Error::TypeConversionFailed {
                    src: "Value::Float64".to_string(),
                    dst: "serde_json::Number".to_string(),
                })?,
            )),
            Value::Int64(i) => Ok(serde_json::Value::Number(i.into())),
            Value::Map(hm) => {
                let mut m = serde_json::Map::new();
                for (k, v) in hm.into_iter() {
                    m.insert(k, v.try_into()?);
                }
                Ok(serde_json::Value::Object(m))
            }
            Value::Null => Ok(serde_json::Value::Null),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::UInt64(i) => Ok(serde_json::Value::Number(i.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use serde_json::json;
    use std::convert::TryFrom;

    /// Passes if a nested JSON object converts into nested maps
    #[test]
    fn from_json_object() {
        let v = Value::try_from(json!({"filter": {"email": "graphql", "limit": 2}})).unwrap();

        let filter = v.get("filter").expect("Expected filter entry");
        assert_eq!(filter.get("email"), Some(&Value::String("graphql".to_string())));
        assert_eq!(filter.get("limit"), Some(&Value::Int64(2)));
    }

    /// Passes if an explicit null map entry reads the same as a missing one
    #[test]
    fn get_treats_null_as_absent() {
        let v = Value::try_from(json!({"gender": null})).unwrap();

        assert!(v.get("gender").is_none());
        assert!(v.get("email").is_none());
        assert!(Value::Null.get("gender").is_none());
    }

    /// Passes if a value converts back into the same JSON
    #[test]
    fn to_json() {
        let original = json!({"ids": ["aaa", "bbb"], "active": true});
        let v = Value::try_from(original.clone()).unwrap();

        assert_eq!(serde_json::Value::try_from(v).unwrap(), original);
    }

    /// Passes if a non-string value is rejected as a String
    #[test]
    fn string_conversion_failure() {
        assert!(String::try_from(Value::Bool(true)).is_err());
        assert_eq!(String::try_from(Value::from("aaa")).unwrap(), "aaa");
    }
}
