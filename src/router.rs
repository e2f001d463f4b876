//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Middleware is not a router
//! concern: wrap a handler in a [`Chain`](crate::middleware::Chain) before
//! registering it and the router stores the composed handler like any other.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with
    /// [`Request::param`].
    ///
    /// ```rust
    /// # use gatehouse::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// Router::new().on(Method::Get, "/users/{id}", get_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an earlier route for
    /// the same method. Routes are registered at startup, so this surfaces
    /// before the server accepts traffic.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Registers `handler` under `path` for every [`Method`].
    ///
    /// # Panics
    ///
    /// Same as [`Router::on`].
    pub fn any(self, path: &str, handler: impl Handler) -> Self {
        let handler = handler.into_boxed_handler();
        Method::ALL.into_iter().fold(self, |router, method| router.on(method, path, handler.clone()))
    }

    /// Turns the whole router into one handler.
    ///
    /// Mount it under a catch-all path such as `/api/v1/{*rest}` and wrap it in
    /// a [`Chain`](crate::middleware::Chain): the chain then runs before route
    /// matching, so misses inside the subtree pass through it too. The inner
    /// router sees the full request path.
    pub fn into_handler(self) -> impl Handler {
        let router = Arc::new(self);
        move |req: Request| {
            let router = Arc::clone(&router);
            async move { router.handle(req).await }
        }
    }

    /// Routes one request to its handler. Unmatched requests get `404`.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => {
                req.set_params(params);
                handler.call(req).await
            }
            None => Response::status(Status::NotFound),
        }
    }

    fn lookup(&self, method: Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = matched.value.clone();
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    #[tokio::test]
    async fn routes_by_method_and_path() {
        let router = Router::new()
            .on(Method::Get, "/users/{id}", echo_id)
            .on(Method::Post, "/users", |_req: Request| async { Status::Created });

        let got = router.handle(Request::new(Method::Get, "/users/42")).await;
        assert_eq!(got.body(), b"42");

        let created = router.handle(Request::new(Method::Post, "/users")).await;
        assert_eq!(created.status_code(), 201);
    }

    #[tokio::test]
    async fn unmatched_is_404() {
        let router = Router::new().on(Method::Get, "/users/{id}", echo_id);

        assert_eq!(router.handle(Request::new(Method::Get, "/nope")).await.status_code(), 404);
        assert_eq!(router.handle(Request::new(Method::Delete, "/users/1")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn any_matches_every_method() {
        let router = Router::new().on(Method::Get, "/other", echo_id).any("/all", echo_id);

        for method in Method::ALL {
            assert_eq!(router.handle(Request::new(method, "/all")).await.status_code(), 200, "{method}");
        }
        assert_eq!(router.handle(Request::new(Method::Post, "/other")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn nested_router_sees_full_path_and_its_own_params() {
        let inner = Router::new().on(Method::Get, "/v1/users/{id}", echo_id);
        let outer = Router::new().any("/v1/{*rest}", inner.into_handler());

        let got = outer.handle(Request::new(Method::Get, "/v1/users/9")).await;
        assert_eq!(got.body(), b"9");

        let miss = outer.handle(Request::new(Method::Get, "/v1/nope")).await;
        assert_eq!(miss.status_code(), 404);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::Get, "/a/{x}", echo_id)
            .on(Method::Get, "/a/{x}", echo_id);
    }
}
