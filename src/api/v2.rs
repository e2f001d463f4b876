//! `/api/v2` handlers.

use std::sync::Arc;

use super::{caller_id, describe_user};
use crate::directory::UserDirectory;
use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;
use crate::router::Router;

/// The v2 route table. Expects to be mounted behind the logged
/// authentication chain.
pub(super) fn routes(directory: &Arc<dyn UserDirectory>) -> Router {
    Router::new()
        .on(Method::Get, "/api/v2/user/name", get_own_name(Arc::clone(directory)))
        .on(Method::Get, "/api/v2/version", version)
}

/// `GET /api/v2/user/name`
fn get_own_name(directory: Arc<dyn UserDirectory>) -> impl Handler {
    move |req: Request| {
        let directory = Arc::clone(&directory);
        async move {
            caller_id(&req).map(|user_id| describe_user(directory.as_ref(), user_id, "V2: "))
        }
    }
}

/// `GET /api/v2/version`
async fn version(_req: Request) -> &'static str {
    "API v2"
}
