//! Health-check handler.
//!
//! Mounted at `/health` outside every middleware chain, so probes need no
//! credential.

use crate::{Request, Response};

/// Always `200 OK` with body `"OK"`. If the process can answer HTTP at all,
/// it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("OK")
}
