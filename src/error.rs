//! Unified error type.

use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::role::Role;
use crate::status::Status;

/// The error type returned by gatehouse's fallible infrastructure operations.
///
/// Application-level failures (401, 404, 400, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// failures to start or configure the service: binding to a port, accepting a
/// connection, or reading an invalid setting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: invalid {key} `{value}`: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Why a request was refused by authentication or authorization.
///
/// Every variant renders to the client as the same `401 Unauthorized`; the
/// detail here is only for server-side logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no Authorization header")]
    MissingCredential,

    #[error("empty user id")]
    EmptyIdentity,

    #[error("invalid user id `{0}`")]
    MalformedIdentity(String),

    #[error("no user identity in request context")]
    MissingIdentity,

    #[error("no role in request context")]
    MissingRole,

    #[error("role `{0}` is not allowed")]
    RoleNotAllowed(Role),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Response::builder()
            .status(Status::Unauthorized)
            .text("Unauthorized")
    }
}
