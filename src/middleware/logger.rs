//! Request and response logging.

use tracing::info;

use super::{Middleware, Next, from_fn};
use crate::recorder::ResponseRecorder;
use crate::request::Request;
use crate::response::Response;

/// Logs method and request target (path plus query), then hands the request
/// on untouched.
pub fn request_logger() -> impl Middleware + Clone {
    from_fn(|req: Request, next: Next| async move {
        info!(method = %req.method(), path = %req.target(), "request");
        next.run(req).await
    })
}

/// Logs method and request target, records the downstream response, logs its
/// status, then replays it to the caller.
///
/// The whole downstream response is buffered before any of it is returned.
pub fn request_response_logger() -> impl Middleware + Clone {
    from_fn(|req: Request, next: Next| async move {
        info!(method = %req.method(), path = %req.target(), "request");

        let recorder = ResponseRecorder::record(next.run(req).await);
        let status = recorder.status();

        let mut response = Response::empty();
        recorder.replay(&mut response);

        info!(status, "response");
        response
    })
}
