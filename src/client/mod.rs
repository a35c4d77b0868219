//! This module provides the usergraph client.

use crate::{Engine, Error};
use juniper::http::GraphQLRequest;
use log::{debug, trace};
use serde_json::{json, Value};
use std::fmt::Display;

/// A usergraph GraphQL client
///
/// The [`Client`] submits GraphQL queries either to a usergraph server over HTTP, or directly
/// to an [`Engine`] in the same process. Helper methods format the queries for the `getUsers`
/// and `getUser` fields.
///
/// [`Client`]: ./enum.Client.html
/// [`Engine`]: ../engine/struct.Engine.html
///
/// # Examples
///
/// ```rust
/// # use usergraph::Client;
///
/// let client = Client::new_with_http("http://localhost:8081/graphql");
/// ```
#[derive(Clone, Debug)]
pub enum Client {
    Http { endpoint: String },
    Local { engine: Box<Engine> },
}

impl Client {
    /// Takes the URL of a usergraph service endpoint and returns a new [`Client`] initialized to
    /// query that endpoint.
    ///
    /// [`Client`]: ./enum.Client.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use usergraph::Client;
    ///
    /// let mut client = Client::new_with_http("http://localhost:8081/graphql");
    /// ```
    pub fn new_with_http(endpoint: &str) -> Client {
        trace!("Client::new_with_http called -- endpoint: {}", endpoint);
        Client::Http {
            endpoint: endpoint.to_string(),
        }
    }

    /// Takes a usergraph engine and returns a new [`Client`] initialized to query that engine.
    ///
    /// [`Client`]: ./enum.Client.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::convert::TryFrom;
    /// # use usergraph::Client;
    /// # use usergraph::engine::Engine;
    /// # use usergraph::engine::config::Configuration;
    /// # use usergraph::engine::store::Store;
    ///
    /// let store = Store::try_from(Configuration::sample()).unwrap();
    /// let engine = Engine::new(store).build().unwrap();
    ///
    /// let mut client = Client::new_with_engine(engine);
    /// ```
    pub fn new_with_engine(engine: Engine) -> Client {
        trace!("Client::new_with_engine called");
        Client::Local {
            engine: Box::new(engine),
        }
    }

    /// Executes a graphql query
    ///
    /// # Arguments
    ///
    /// * query - text of the query statement, parameterized to avoid query injection attacks
    /// * variables - a [`serde_json::Value`], specifically a Value::Object, holding the query
    /// variables
    /// * result_field - an optional name of a field under 'data' that holds the GraphQL response.
    /// If present, the object with name `result_field` under `data` will be returned. If `None`,
    /// the `data` object will be returned.
    ///
    /// # Return
    ///
    /// A [`serde_json::Value`] containing the query response
    ///
    /// # Errors
    ///
    /// * [`ClientRequestFailed`] - if the HTTP request fails or the response is not JSON
    /// * [`SerializationFailed`] - if the request cannot be handed to a local engine
    /// * [`PayloadNotFound`] - if the JSON response body is not a valid GraphQL response, or has
    /// no `data`
    ///
    /// [`ClientRequestFailed`]: ../enum.Error.html#variant.ClientRequestFailed
    /// [`SerializationFailed`]: ../enum.Error.html#variant.SerializationFailed
    /// [`PayloadNotFound`]: ../enum.Error.html#variant.PayloadNotFound
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use usergraph::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut client = Client::new_with_http("http://localhost:8081/graphql");
    ///
    /// let results = client.graphql("query { getUsers { id name } }", None,
    ///     Some("getUsers")).await;
    /// # }
    /// ```
    pub async fn graphql(
        &mut self,
        query: &str,
        variables: Option<&Value>,
        result_field_opt: Option<&str>,
    ) -> Result<Value, Error> {
        trace!(
            "Client::graphql called -- query: {} | variables: {:#?} | result_field: {:#?}",
            query,
            variables,
            result_field_opt,
        );

        // format request body
        let req_body = json!({
            "query": query.to_string(),
            "variables": variables
        });

        debug!("Client::graphql making request -- req_body: {}", req_body);
        let mut body = match self {
            Client::Http { endpoint } => {
                let client = reqwest::Client::new();
                let response = client
                    .post(endpoint.as_str())
                    .json(&req_body)
                    .send()
                    .await?;
                response.json::<Value>().await?
            }
            Client::Local { engine } => {
                let req: GraphQLRequest = serde_json::from_value(req_body)?;
                engine.execute(&req)?
            }
        };
        debug!("Client::graphql -- response body: {:#?}", body);

        if let Some(result_field) = result_field_opt {
            body.as_object_mut()
                .and_then(|m| m.remove("data"))
                .and_then(|mut d| d.as_object_mut().and_then(|dm| dm.remove(result_field)))
                .ok_or_else(|| Error::PayloadNotFound {
                    response: body.to_owned(),
                })
        } else {
            body.as_object_mut()
                .and_then(|m| m.remove("data"))
                .filter(|d| !d.is_null())
                .ok_or_else(|| Error::PayloadNotFound {
                    response: body.to_owned(),
                })
        }
    }

    /// Queries the users that match an optional filter
    ///
    /// # Arguments
    ///
    /// * shape - the GraphQL query shape, meaning the selection of properties to be returned
    /// for each user
    /// * filter - a [`serde_json::Value`], specifically a Value::Object, with optional `email`
    /// and `gender` conditions
    ///
    /// # Return
    ///
    /// A [`serde_json::Value`] holding the list of matching users
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] under the same conditions as [`graphql`]
    ///
    /// [`Error`]: ../enum.Error.html
    /// [`graphql`]: #method.graphql
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use serde_json::json;
    /// # use usergraph::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut client = Client::new_with_http("http://localhost:8081/graphql");
    ///
    /// let women = client.get_users("id name", Some(&json!({"gender": "FEMALE"}))).await;
    /// # }
    /// ```
    pub async fn get_users(&mut self, shape: &str, filter: Option<&Value>) -> Result<Value, Error> {
        trace!(
            "Client::get_users called -- shape: {} | filter: {:#?}",
            shape,
            filter
        );

        let query = Client::fmt_get_users_query(shape);
        let variables = json!({ "filter": filter });
        self.graphql(&query, Some(&variables), Some("getUsers"))
            .await
    }

    /// Queries a single user by identifier. Returns a JSON `null` if there is no such user.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] under the same conditions as [`graphql`]
    ///
    /// [`Error`]: ../enum.Error.html
    /// [`graphql`]: #method.graphql
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use usergraph::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut client = Client::new_with_http("http://localhost:8081/graphql");
    ///
    /// let mary = client.get_user("name children { name }", "ccc").await;
    /// # }
    /// ```
    pub async fn get_user(&mut self, shape: &str, id: &str) -> Result<Value, Error> {
        trace!("Client::get_user called -- shape: {} | id: {}", shape, id);

        let query = Client::fmt_get_user_query(shape);
        let variables = json!({ "id": id });
        self.graphql(&query, Some(&variables), Some("getUser"))
            .await
    }

    fn fmt_get_users_query(shape: &str) -> String {
        format!(
            "query GetUsers($filter: UsersFilter) {{ getUsers(filter: $filter) {{ {shape} }} }}",
            shape = shape
        )
    }

    fn fmt_get_user_query(shape: &str) -> String {
        format!(
            "query GetUser($id: String) {{ getUser(id: $id) {{ {shape} }} }}",
            shape = shape
        )
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        match self {
            Self::Http { endpoint } => write!(f, "{}", endpoint),
            Self::Local { engine } => {
                write!(f, "local engine serving {} users", engine.store().len())
            }
        }
    }
}
