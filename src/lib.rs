//! # gatehouse
//!
//! A minimal HTTP service built around one idea: request handling is a chain
//! of small, independent stages wrapped around a handler.
//!
//! - **Middleware** turns the next handler into a new handler. A
//!   [`Chain`](middleware::Chain) composes middleware in the order it is
//!   written, and is itself middleware.
//! - **Authentication** reads `Authorization: Bearer <user-id>`, resolves a
//!   [`UserIdentity`], classifies it into a [`Role`] and adds both to the
//!   request's [`RequestContext`](context::RequestContext).
//! - **Authorization** gates a route on an explicit allow-list of roles.
//! - **Logging** records the downstream response with a [`ResponseRecorder`]
//!   so its status can be logged before it is sent.
//!
//! The bearer "token" is just a user id. Nothing is signed or verified; this
//! authentication is insecure by design and exists to exercise the pipeline.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gatehouse::middleware::{Chain, Middleware, authenticate, request_response_logger, require_roles};
//! use gatehouse::{Method, Request, Role, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gatehouse::Error> {
//!     let admin = Chain::new()
//!         .with(request_response_logger())
//!         .with(authenticate())
//!         .with(require_roles([Role::Root]));
//!
//!     let app = Router::new().on(Method::Get, "/resource", admin.apply(resource));
//!
//!     Server::bind("0.0.0.0:8080".parse().unwrap()).await?.serve(app).await
//! }
//!
//! async fn resource(req: Request) -> String {
//!     let who = req.context().identity().map(|id| id.to_string()).unwrap_or_default();
//!     format!("hello {who}")
//! }
//! ```

mod error;
mod handler;
mod identity;
mod method;
mod recorder;
mod request;
mod response;
mod role;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod context;
pub mod directory;
pub mod health;
pub mod middleware;

pub use config::{Config, LogFormat};
pub use directory::{InMemoryDirectory, UserDirectory};
pub use error::{AuthError, Error};
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use identity::UserIdentity;
pub use method::Method;
pub use recorder::ResponseRecorder;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder, ResponseWriter};
pub use role::Role;
pub use router::Router;
pub use server::Server;
pub use status::Status;
