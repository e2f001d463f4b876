//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::context::{Key, RequestContext};
use crate::method::Method;

/// An incoming HTTP request.
///
/// Besides the wire data, every request carries its own [`RequestContext`].
/// Middleware extends it with [`Request::with_value`]; handlers read it back
/// through [`Request::context`].
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
    pub(crate) params: HashMap<String, String>,
    pub(crate) context: RequestContext,
}

impl Request {
    /// A request with no headers, no body and an empty context.
    ///
    /// `target` is the request target as sent on the wire: a path, optionally
    /// followed by `?` and a query string. The server builds requests from the
    /// wire; this constructor is also for driving a [`Router`](crate::Router)
    /// or handler directly.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        let mut path = target.into();
        let query = path.find('?').map(|at| {
            let query = path[at + 1..].to_owned();
            path.truncate(at);
            query
        });
        Self {
            method,
            path,
            query,
            headers: Vec::new(),
            body: Vec::new(),
            params: HashMap::new(),
            context: RequestContext::new(),
        }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Replaces the body. Returns `self` for chaining.
    pub fn body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn context(&self) -> &RequestContext { &self.context }

    /// Path plus query string, as the client sent it.
    pub fn target(&self) -> Cow<'_, str> {
        match &self.query {
            Some(query) => Cow::Owned(format!("{}?{query}", self.path)),
            None => Cow::Borrowed(&self.path),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Swaps this request's context for one that also carries `key = value`.
    ///
    /// The previous context value is left untouched; see
    /// [`RequestContext::with`] for what happens when `key` is already set.
    pub fn with_value<T>(mut self, key: &Key<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.context = self.context.with(key, value);
        self
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ROLE;
    use crate::role::Role;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Get, "/").header("Authorization", "Bearer 7");
        assert_eq!(req.header_value("authorization"), Some("Bearer 7"));
        assert_eq!(req.header_value("x-missing"), None);
    }

    #[test]
    fn query_is_split_from_the_path_and_kept() {
        let req = Request::new(Method::Get, "/users?page=2&sort=name");
        assert_eq!(req.path(), "/users");
        assert_eq!(req.query(), Some("page=2&sort=name"));
        assert_eq!(req.target(), "/users?page=2&sort=name");

        let bare = Request::new(Method::Get, "/users");
        assert_eq!(bare.query(), None);
        assert_eq!(bare.target(), "/users");
    }

    #[test]
    fn with_value_extends_the_context() {
        let req = Request::new(Method::Get, "/").with_value(&ROLE, Role::Buyer);
        assert_eq!(req.context().role(), Some(Role::Buyer));
    }
}
