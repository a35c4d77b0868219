//! usergraph serves an in-memory collection of users through a GraphQL endpoint. Users carry a
//! name, an email address, a gender, and a list of children that are themselves users. Clients
//! can list every user, narrow the list with a filter on email and gender, look up a single
//! user by identifier, and walk from a user to its children, optionally narrowed by gender.
//!
//! The GraphQL schema is generated from a static description of the types, in which every
//! field is routed to exactly one resolver. The description is validated when the [`Engine`]
//! is built, and is served as SDL by the HTTP server.
//!
//! [`Engine`]: ./engine/struct.Engine.html

#![doc(html_root_url = "https://docs.rs/usergraph/0.1.0")]

pub use client::Client;
pub use engine::Engine;
pub use error::Error;

pub mod client;
pub mod engine;
pub mod error;
pub mod server;
