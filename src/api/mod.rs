//! The service's HTTP surface.
//!
//! Each API version is its own [`Router`], mounted for every method under a
//! catch-all path and wrapped as a whole in the version's chain. The chain
//! runs before route matching, so an anonymous caller gets `401` for every
//! path under a version, whether or not a route exists there.
//!
//! | Prefix | Chain |
//! |---|---|
//! | `/api/v1/` | `authenticate` |
//! | `/api/v2/` | `request_response_logger` → `authenticate` |
//!
//! `GET /api/v1/user/id/{user_id}` additionally requires superuser or higher.

mod v1;
mod v2;

use std::sync::Arc;

use tracing::warn;

use crate::directory::UserDirectory;
use crate::error::AuthError;
use crate::health;
use crate::method::Method;
use crate::middleware::{Chain, Middleware, authenticate, logged_authentication};
use crate::request::Request;
use crate::router::Router;

/// Builds the full route table over `directory`.
pub fn routes(directory: Arc<dyn UserDirectory>) -> Router {
    let v1 = Chain::new().with(authenticate()).apply(v1::routes(&directory).into_handler());
    let v2 = logged_authentication().apply(v2::routes(&directory).into_handler());

    Router::new()
        .on(Method::Get, "/health", health::liveness)
        .any("/api/v1/{*rest}", v1)
        .any("/api/v2/{*rest}", v2)
}

/// The authenticated caller's id.
///
/// Only fails if a handler is mounted without [`authenticate`] in front of it.
fn caller_id(req: &Request) -> Result<&str, AuthError> {
    req.context()
        .identity()
        .map(|id| id.as_str())
        .ok_or_else(|| {
            warn!(path = req.path(), "handler reached without an authenticated identity");
            AuthError::MissingIdentity
        })
}

fn describe_user(directory: &dyn UserDirectory, user_id: &str, prefix: &str) -> String {
    match directory.get(user_id) {
        Some(name) => format!("{prefix}User ID: {user_id} Name: {name}"),
        None => format!("{prefix}Not found user {user_id}  name"),
    }
}
