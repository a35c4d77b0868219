//! Provides the [`Error`] type for usergraph

use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

/// Error type for usergraph
///
/// # Examples
///
/// ```rust
/// use usergraph::Error;
///
/// let e = Error::InvalidArgument { name: "gender".to_string(), value: "ROBOT".to_string() };
/// ```
#[derive(Debug)]
pub enum Error {
    /// Returned if the server cannot bind to the requested address. The `addr` field holds the
    /// address that could not be bound.
    AddrNotAvailable { addr: String, source: std::io::Error },

    /// Returned if a user lists a child whose identifier does not belong to any user in the
    /// configuration. The `id` field contains the missing identifier.
    ChildNotFound { id: String },

    /// Returned if a [`Client`] is unable to submit a request to the server, such as due to a
    /// network or server error, or the response cannot be parsed as valid JSON. Inspect the
    /// [`reqwest::Error`] included as a source error for additional detail.
    ///
    /// [`Client`]: ./client/enum.Client.html
    ClientRequestFailed { source: reqwest::Error },

    /// Returned if two users in a configuration share an identifier. The `id` field contains
    /// the duplicated identifier.
    ConfigItemDuplicated { id: String },

    /// Returned if a `Configuration` file cannot be opened, typically because the file cannot be
    /// found on disk
    ConfigOpenFailed { source: std::io::Error },

    /// Returned if a `Configuration` declares a format version this crate does not understand.
    /// The field `expected` contains the supported version, and `found` the declared one.
    ConfigVersionMismatched { expected: i32, found: i32 },

    /// Returned if a `Configuration` fails to deserialize because the provided data does not
    /// match the expected data structure
    DeserializationFailed { source: serde_yaml::Error },

    /// Returned if an argument is present but cannot be decoded, such as a gender that is not
    /// one of the enumeration's values, or a filter that is not a map. The `name` field holds the
    /// argument name and `value` the offending input.
    InvalidArgument { name: String, value: String },

    /// Returned if a [`Client`] receives a valid JSON response that does not contain the
    /// expected 'data' object.
    ///
    /// The [`serde_json::Value`] tuple value contains the deserialized JSON response.
    ///
    /// [`Client`]: ./client/enum.Client.html
    PayloadNotFound { response: serde_json::Value },

    /// Returned if the port number given to the server cannot be parsed
    PortNotParsed { source: ParseIntError },

    /// Returned if a field that reads an attribute of a user is resolved on an object that does
    /// not carry a user, such as the root query object. This indicates an internal bug.
    ResponseItemNotFound { name: String },

    /// Returned if a GraphQL response cannot be converted to a serde_json::Value
    SerializationFailed { source: serde_json::Error },

    /// Returned if the HTTP server stops with an I/O error after it has started
    ServerFailed { source: std::io::Error },

    /// Returned if the schema description is internally inconsistent, for example if a field
    /// that resolves the children of a user is declared on a type other than `User`. The `name`
    /// field holds the offending schema element and `reason` explains the inconsistency.
    SchemaItemInvalid { name: String, reason: String },

    /// Returned if usergraph fails to find an element within a schema, such as a type or
    /// property. The field is the name of the schema element that could not be found.
    SchemaItemNotFound { name: String },

    /// Returned if a loose argument value cannot be converted into the type required. The `src`
    /// field contains the source value and `dst` the type it could not be converted to.
    TypeConversionFailed { src: String, dst: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Error::AddrNotAvailable { addr, source } => {
                write!(f, "Could not bind server to address {}. Source error: {}", addr, source)
            }
            Error::ChildNotFound { id } => {
                write!(f, "Config lists a child that is not a known user: {}", id)
            }
            Error::ClientRequestFailed { source } => {
                write!(f, "Client request failed. Source error: {}", source)
            }
            Error::ConfigItemDuplicated { id } => {
                write!(f, "Config contains duplicate user id: {}", id)
            }
            Error::ConfigOpenFailed { source } => {
                write!(f, "Config file could not be opened. Source error: {}", source)
            }
            Error::ConfigVersionMismatched { expected, found } => {
                write!(f, "Config version not supported: expected {} but found {}", expected, found)
            }
            Error::DeserializationFailed { source } => {
                write!(f, "Failed to deserialize configuration. Source error: {}", source)
            }
            Error::InvalidArgument { name, value } => {
                write!(f, "Invalid value for argument {}: {}", name, value)
            }
            Error::PayloadNotFound { response } => {
                write!(f, "Required data field is missing from the response: {}", response)
            }
            Error::PortNotParsed { source } => {
                write!(f, "Failed to parse port number. Source error: {}", source)
            }
            Error::ResponseItemNotFound { name } => {
                write!(
                    f,
                    "Could not find an expected response item, {}, on the resolved object.",
                    name
                )
            }
            Error::SerializationFailed { source } => {
                write!(f, "Serialization of the GraphQL response failed. Source error: {}", source)
            }
            Error::ServerFailed { source } => {
                write!(f, "Server stopped unexpectedly. Source error: {}", source)
            }
            Error::SchemaItemInvalid { name, reason } => {
                write!(f, "The schema item {} is invalid: {}", name, reason)
            }
            Error::SchemaItemNotFound { name } => {
                write!(f, "The following item could not be found in the schema: {}", name)
            }
            Error::TypeConversionFailed { src, dst } => {
                write!(f, "The type or value {} could not be converted to type {}", src, dst)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AddrNotAvailable { addr: _, source } => Some(source),
            Error::ChildNotFound { id: _ } => None,
            Error::ClientRequestFailed { source } => Some(source),
            Error::ConfigItemDuplicated { id: _ } => None,
            Error::ConfigOpenFailed { source } => Some(source),
            Error::ConfigVersionMismatched {
                expected: _,
                found: _,
            } => None,
            Error::DeserializationFailed { source } => Some(source),
            Error::InvalidArgument { name: _, value: _ } => None,
            Error::PayloadNotFound { response: _ } => None,
            Error::PortNotParsed { source } => Some(source),
            Error::ResponseItemNotFound { name: _ } => None,
            Error::SerializationFailed { source } => Some(source),
            Error::ServerFailed { source } => Some(source),
            Error::SchemaItemInvalid { name: _, reason: _ } => None,
            Error::SchemaItemNotFound { name: _ } => None,
            Error::TypeConversionFailed { src: _, dst: _ } => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ClientRequestFailed { source: e }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::DeserializationFailed { source: e }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::ConfigOpenFailed { source: e }
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::PortNotParsed { source: e }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationFailed { source: e }
    }
}
