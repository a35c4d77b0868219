//! This module provides a Juniper Context for GraphQL queries. The context carries the user
//! store that the resolvers read from.
use super::store::Store;
use juniper::Context;
use std::sync::Arc;

/// Juniper Context for the engine's GraphQL queries. The [`GraphQLContext`] is used to pass
/// the shared, read-only [`Store`] in to the resolvers.
///
/// [`GraphQLContext`]: ./struct.GraphQLContext.html
/// [`Store`]: ../store/struct.Store.html
#[derive(Clone, Debug)]
pub struct GraphQLContext {
    store: Arc<Store>,
}

impl GraphQLContext {
    /// Takes a shared [`Store`] and returns a [`GraphQLContext`] containing it.
    ///
    /// [`Store`]: ../store/struct.Store.html
    /// [`GraphQLContext`]: ./struct.GraphQLContext.html
    pub fn new(store: Arc<Store>) -> GraphQLContext {
        GraphQLContext { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Context for GraphQLContext {}
