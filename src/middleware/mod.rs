//! Middleware and chains.
//!
//! A [`Middleware`] turns the next handler into a new handler. It can answer
//! on its own without calling the next stage (rejecting a request), call the
//! next stage unchanged, or call it with an extended
//! [`RequestContext`](crate::context::RequestContext).
//!
//! A [`Chain`] folds several middleware into one. The first stage added runs
//! first:
//!
//! ```text
//! Chain::new().with(a).with(b).apply(handler)
//!
//!   a pre → b pre → handler → b post → a post
//! ```
//!
//! Chains are themselves middleware, so they nest. Wrapping happens once, when
//! routes are registered; the resulting handler is shared by every request.
//!
//! Built-in stages:
//! - [`request_logger`] / [`request_response_logger`]: method, path, status
//! - [`authenticate`]: bearer credential → identity + role in the context
//! - [`require_roles`] / [`require_superuser_or_higher`]: role allow-list

mod auth;
mod logger;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

pub use auth::{
    AUTHORIZATION, RequireRoles, authenticate, require_roles, require_superuser_or_higher,
};
pub use logger::{request_logger, request_response_logger};

/// A request-processing stage wrapped around an inner handler.
///
/// Any `Fn(BoxedHandler) -> BoxedHandler` is a middleware. Stages that only
/// need to run code around the next handler are easier to write with
/// [`from_fn`].
pub trait Middleware: Send + Sync + 'static {
    /// Builds the handler that runs this stage and then, possibly, `next`.
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;

    /// Wraps a handler of any shape.
    fn apply(&self, handler: impl Handler) -> BoxedHandler
    where
        Self: Sized,
    {
        self.wrap(handler.into_boxed_handler())
    }
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

// ── Next ─────────────────────────────────────────────────────────────────────

/// The rest of the chain, as seen from inside a [`from_fn`] stage.
#[derive(Clone, Debug)]
pub struct Next(BoxedHandler);

impl Next {
    pub async fn run(self, req: Request) -> Response {
        self.0.call(req).await
    }
}

// ── from_fn ──────────────────────────────────────────────────────────────────

/// Middleware built from an async function of the request and the rest of the
/// chain.
///
/// ```rust
/// use gatehouse::middleware::{from_fn, Next};
/// use gatehouse::Request;
///
/// let timing = from_fn(|req: Request, next: Next| async move {
///     let started = std::time::Instant::now();
///     let res = next.run(req).await;
///     tracing::debug!(elapsed = ?started.elapsed(), "done");
///     res
/// });
/// # let _ = timing;
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    FromFn(Arc::new(f))
}

/// See [`from_fn`].
pub struct FromFn<F>(Arc<F>);

impl<F> Clone for FromFn<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F, Fut> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let f = Arc::clone(&self.0);
        (move |req: Request| f(req, Next(next.clone()))).into_boxed_handler()
    }
}

// ── Chain ────────────────────────────────────────────────────────────────────

/// An ordered, immutable composition of middleware.
#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage. It runs after every stage already in the chain.
    pub fn with(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Middleware for Chain {
    /// Wraps in reverse so the first stage ends up outermost.
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self.stages.iter().rev().fold(next, |next, stage| stage.wrap(next))
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("stages", &self.stages.len()).finish()
    }
}

/// Request/response logging around authentication, as one reusable chain.
pub fn logged_authentication() -> Chain {
    Chain::new()
        .with(request_response_logger())
        .with(authenticate())
}
