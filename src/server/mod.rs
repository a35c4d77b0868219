//! This module provides the usergraph HTTP server: an actix-web service that prints the schema,
//! executes GraphQL requests against an [`Engine`], and hosts a GraphQL Playground.
//!
//! [`Engine`]: ../engine/struct.Engine.html

use crate::engine::Engine;
use crate::error::Error;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data, Json, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer};
use juniper::http::playground::playground_source;
use juniper::http::GraphQLRequest;
use log::{debug, error, info};
use serde_json::json;
use std::env::var_os;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_BIND_PORT: &str = "8081";

/// Returns the bind port named by the environment variable `env_name`, or 8081 if it is unset
pub fn bind_port_from_env(env_name: &str) -> String {
    var_os(env_name)
        .and_then(|v| v.into_string().ok())
        .unwrap_or_else(|| DEFAULT_BIND_PORT.to_string())
}

/// Returns the bind address named by the environment variable `env_name`, or 127.0.0.1 if it is
/// unset
pub fn bind_addr_from_env(env_name: &str) -> String {
    var_os(env_name)
        .and_then(|v| v.into_string().ok())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

fn graphql_error(err: &Error) -> String {
    match serde_json::to_string(&json!({ "message": err.to_string() })) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to serialize error object:  {:#?}", e);
            "INTERNAL SERVER ERROR".to_string()
        }
    }
}

#[derive(Clone)]
struct AppData {
    engine: Engine,
    graphql_endpoint: String,
}

async fn graphql(data: Data<AppData>, req: Json<GraphQLRequest>) -> HttpResponse {
    match data.engine.execute(&req) {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            error!("graphql handler failed -- e: {}", e);
            HttpResponse::InternalServerError()
                .content_type("application/json")
                .body(graphql_error(&e))
        }
    }
}

async fn sdl(data: Data<AppData>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(data.engine.sdl())
}

async fn playground(data: Data<AppData>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(&data.graphql_endpoint, None))
}

/// Returns a function that registers the usergraph routes on an actix-web application:
///
/// * `GET /` returns the schema as GraphQL SDL
/// * `POST /` and `POST {graphql_endpoint}` execute a GraphQL request
/// * `GET {playground_endpoint}`, if set, serves a GraphQL Playground aimed at the GraphQL
///   endpoint
///
/// # Examples
///
/// ```rust
/// use actix_web::App;
/// use std::convert::TryFrom;
/// use usergraph::engine::Engine;
/// use usergraph::engine::config::Configuration;
/// use usergraph::engine::store::Store;
/// use usergraph::server::configure;
///
/// let store = Store::try_from(Configuration::sample()).unwrap();
/// let engine = Engine::new(store).build().unwrap();
///
/// let app = App::new().configure(configure(
///     engine,
///     "/graphql".to_string(),
///     Some("/playground".to_string()),
/// ));
/// ```
pub fn configure(
    engine: Engine,
    graphql_endpoint: String,
    playground_endpoint: Option<String>,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        debug!(
            "server::configure -- graphql_endpoint: {}, playground_endpoint: {:?}",
            graphql_endpoint, playground_endpoint
        );

        cfg.app_data(Data::new(AppData {
            engine,
            graphql_endpoint: graphql_endpoint.clone(),
        }))
        .route("/", web::get().to(sdl))
        .route("/", web::post().to(graphql))
        .route(&graphql_endpoint, web::post().to(graphql));

        if let Some(pe) = playground_endpoint {
            cfg.route(&pe, web::get().to(playground));
        }
    }
}

/// A usergraph GraphQL server.
///
/// The [`Server`] struct wraps an actix-web server around an [`Engine`], with request logging
/// and permissive CORS.
///
/// [`Server`]: ./struct.Server.html
/// [`Engine`]: ../engine/struct.Engine.html
///
/// # Examples
///
/// ```rust,no_run
/// use std::convert::TryFrom;
/// use usergraph::engine::Engine;
/// use usergraph::engine::config::Configuration;
/// use usergraph::engine::store::Store;
/// use usergraph::server::{bind_port_from_env, Server};
///
/// #[actix_web::main]
/// async fn main() {
///     let store = Store::try_from(Configuration::sample()).unwrap();
///     let engine = Engine::new(store).build().unwrap();
///
///     Server::new(engine)
///         .with_bind_port(bind_port_from_env("USERGRAPH_BIND_PORT"))
///         .run()
///         .await
///         .unwrap();
/// }
/// ```
pub struct Server {
    engine: Engine,
    bind_addr: String,
    bind_port: String,
    graphql_endpoint: String,
    playground_endpoint: Option<String>,
}

impl Server {
    /// Creates a new [`Server`] for `engine`, bound to 127.0.0.1:8081, with the GraphQL endpoint
    /// at `/graphql` and the playground at `/playground`.
    ///
    /// [`Server`]: ./struct.Server.html
    pub fn new(engine: Engine) -> Server {
        Server {
            engine,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            bind_port: DEFAULT_BIND_PORT.to_string(),
            graphql_endpoint: "/graphql".to_string(),
            playground_endpoint: Some("/playground".to_string()),
        }
    }

    /// Sets bind address on server
    pub fn with_bind_addr(mut self, bind_addr: String) -> Server {
        self.bind_addr = bind_addr;
        self
    }

    /// Sets bind port on server
    pub fn with_bind_port(mut self, bind_port: String) -> Server {
        self.bind_port = bind_port;
        self
    }

    /// Sets the endpoint that will handle the graphql queries
    pub fn with_graphql_endpoint(mut self, graphql_endpoint: String) -> Server {
        self.graphql_endpoint = graphql_endpoint;
        self
    }

    /// Sets the endpoint where the UI playground is hosted, or disables it with `None`
    pub fn with_playground_endpoint(mut self, playground_endpoint: Option<String>) -> Server {
        self.playground_endpoint = playground_endpoint;
        self
    }

    /// Returns the address the server binds to, as `addr:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.bind_port)
    }

    /// Binds the server and serves requests until the server is stopped.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`PortNotParsed`] if the bind port is not a number,
    /// [`AddrNotAvailable`] if the server cannot bind to its address, or [`ServerFailed`] if
    /// the server stops with an I/O error.
    ///
    /// [`Error`]: ../error/enum.Error.html
    /// [`PortNotParsed`]: ../error/enum.Error.html#variant.PortNotParsed
    /// [`AddrNotAvailable`]: ../error/enum.Error.html#variant.AddrNotAvailable
    /// [`ServerFailed`]: ../error/enum.Error.html#variant.ServerFailed
    pub async fn run(self) -> Result<(), Error> {
        let port = self.bind_port.parse::<u16>()?;
        let addr = self.addr();

        let engine = self.engine;
        let graphql_endpoint = self.graphql_endpoint;
        let playground_endpoint = self.playground_endpoint;

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .wrap(Cors::permissive())
                .configure(configure(
                    engine.clone(),
                    graphql_endpoint.clone(),
                    playground_endpoint.clone(),
                ))
        })
        .bind((self.bind_addr.as_str(), port))
        .map_err(|e| Error::AddrNotAvailable {
            addr: addr.clone(),
            source: e,
        })?;

        info!("Server available on: {}", addr);
        server
            .run()
            .await
            .map_err(|e| Error::ServerFailed { source: e })
    }
}
