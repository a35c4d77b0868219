//! This module provides the usergraph engine, including supporting modules for configuration,
//! the user store, filtering, resolvers, and GraphQL schema generation.

use crate::error::Error;
use context::GraphQLContext;
use juniper::http::GraphQLRequest;
use log::debug;
use schema::{create_root_node, describe, RootRef, Schema};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use store::Store;

pub mod config;
pub mod context;
pub mod filter;
mod objects;
pub mod resolvers;
pub mod schema;
pub mod store;
pub mod value;

/// Builder for an [`Engine`], returned by [`Engine::new`].
///
/// [`Engine`]: ./struct.Engine.html
/// [`Engine::new`]: ./struct.Engine.html#method.new
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    store: Arc<Store>,
    schema: Schema,
}

impl EngineBuilder {
    /// Replaces the schema description served by the engine. Defaults to [`describe`].
    ///
    /// [`describe`]: ./schema/fn.describe.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::convert::TryFrom;
    /// use usergraph::engine::Engine;
    /// use usergraph::engine::config::Configuration;
    /// use usergraph::engine::schema::describe;
    /// use usergraph::engine::store::Store;
    ///
    /// let store = Store::try_from(Configuration::sample()).unwrap();
    /// let engine = Engine::new(store).with_schema(describe()).build().unwrap();
    /// ```
    pub fn with_schema(mut self, schema: Schema) -> EngineBuilder {
        self.schema = schema;
        self
    }

    /// Builds a configured [`Engine`], validating the schema description and generating the
    /// Juniper schema from it.
    ///
    /// [`Engine`]: ./struct.Engine.html
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`SchemaItemNotFound`] or [`SchemaItemInvalid`] if the
    /// schema description is inconsistent.
    ///
    /// [`Error`]: ../error/enum.Error.html
    /// [`SchemaItemNotFound`]: ../error/enum.Error.html#variant.SchemaItemNotFound
    /// [`SchemaItemInvalid`]: ../error/enum.Error.html#variant.SchemaItemInvalid
    pub fn build(self) -> Result<Engine, Error> {
        let root_node = create_root_node(&self.schema)?;

        Ok(Engine {
            store: self.store,
            schema: self.schema,
            root_node,
        })
    }
}

/// A usergraph GraphQL engine.
///
/// The [`Engine`] holds the user store and builds a Juniper GraphQL service on top of it, with
/// a resolver behind each of the `getUsers`, `getUser`, and `User.children` fields.
///
/// [`Engine`]: ./struct.Engine.html
///
/// # Examples
///
/// ```rust
/// use std::convert::TryFrom;
/// use juniper::http::GraphQLRequest;
/// use usergraph::engine::Engine;
/// use usergraph::engine::config::Configuration;
/// use usergraph::engine::store::Store;
///
/// let store = Store::try_from(Configuration::sample()).unwrap();
/// let engine = Engine::new(store).build().unwrap();
///
/// let query = "query { getUser(id: \"aaa\") { name } }".to_string();
/// let req = GraphQLRequest::new(query, None, None);
/// let res = engine.execute(&req).unwrap();
/// assert_eq!(res["data"]["getUser"]["name"], "Bob");
/// ```
#[derive(Clone)]
pub struct Engine {
    store: Arc<Store>,
    schema: Schema,
    root_node: RootRef,
}

impl Engine {
    /// Creates a new [`EngineBuilder`] serving `store`, with the default schema description.
    ///
    /// [`EngineBuilder`]: ./struct.EngineBuilder.html
    ///
    /// # Examples
    ///
    /// ```rust
    /// use usergraph::engine::Engine;
    /// use usergraph::engine::store::Store;
    ///
    /// let engine = Engine::new(Store::default()).build().unwrap();
    /// ```
    #[allow(clippy::new_ret_no_self)]
    pub fn new(store: Store) -> EngineBuilder {
        EngineBuilder {
            store: Arc::new(store),
            schema: describe(),
        }
    }

    /// Executes a GraphQL request and returns the response, holding `data` and/or `errors`.
    /// Errors raised while validating or resolving the request are part of the response, not
    /// of the returned `Result`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`SerializationFailed`] if the response cannot be converted
    /// to JSON.
    ///
    /// [`Error`]: ../error/enum.Error.html
    /// [`SerializationFailed`]: ../error/enum.Error.html#variant.SerializationFailed
    pub fn execute(&self, req: &GraphQLRequest) -> Result<serde_json::Value, Error> {
        debug!("Engine::execute called -- req: {:#?}", req);

        let ctx = GraphQLContext::new(self.store.clone());
        let res = req.execute_sync(&self.root_node, &ctx);
        let value = serde_json::to_value(&res)?;

        debug!("Engine::execute -- res: {:#?}", value);
        Ok(value)
    }

    /// Returns the schema description served by the engine
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the schema served by the engine as GraphQL SDL
    pub fn sdl(&self) -> String {
        self.schema.to_sdl()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("store", &self.store)
            .field("schema", &self.schema)
            .finish()
    }
}
