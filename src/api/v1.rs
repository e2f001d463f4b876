//! `/api/v1` handlers.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::{caller_id, describe_user};
use crate::directory::UserDirectory;
use crate::handler::Handler;
use crate::method::Method;
use crate::middleware::{Middleware, require_superuser_or_higher};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;

#[derive(Deserialize)]
struct SetName {
    name: String,
}

/// The v1 route table. Expects to be mounted behind `authenticate`.
pub(super) fn routes(directory: &Arc<dyn UserDirectory>) -> Router {
    Router::new()
        .on(Method::Get, "/api/v1/user/name", get_own_name(Arc::clone(directory)))
        .on(Method::Post, "/api/v1/user/name", set_own_name(Arc::clone(directory)))
        .on(
            Method::Get,
            "/api/v1/user/id/{user_id}",
            require_superuser_or_higher().apply(get_name_by_id(Arc::clone(directory))),
        )
}

/// `GET /api/v1/user/name`
fn get_own_name(directory: Arc<dyn UserDirectory>) -> impl Handler {
    move |req: Request| {
        let directory = Arc::clone(&directory);
        async move {
            caller_id(&req).map(|user_id| describe_user(directory.as_ref(), user_id, ""))
        }
    }
}

/// `POST /api/v1/user/name` with `{"name": "..."}`
fn set_own_name(directory: Arc<dyn UserDirectory>) -> impl Handler {
    move |req: Request| {
        let directory = Arc::clone(&directory);
        async move {
            let user_id = match caller_id(&req) {
                Ok(id) => id,
                Err(e) => return e.into_response(),
            };
            let SetName { name } = match serde_json::from_slice::<SetName>(req.body()) {
                Ok(body) => body,
                Err(e) => {
                    return Response::builder()
                        .status(Status::BadRequest)
                        .text(e.to_string());
                }
            };

            info!(user_id, name = %name, "saving user");
            let reply = format!("User Name: {name}");
            directory.set(user_id, name);
            Response::text(reply)
        }
    }
}

/// `GET /api/v1/user/id/{user_id}`, superuser or higher
fn get_name_by_id(directory: Arc<dyn UserDirectory>) -> impl Handler {
    move |req: Request| {
        let directory = Arc::clone(&directory);
        async move {
            match req.param("user_id") {
                Some(user_id) => Response::text(describe_user(directory.as_ref(), user_id, "")),
                None => Response::status(Status::NotFound),
            }
        }
    }
}
