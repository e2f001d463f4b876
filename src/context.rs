//! Per-request context carried from middleware to handlers.
//!
//! A [`RequestContext`] is an immutable, append-only map. Each
//! [`with`](RequestContext::with) returns a *new* context that shares every
//! earlier entry with its parent, so forking a context is one allocation and
//! the parent stays observably unchanged.
//!
//! Keys are typed. A [`Key<T>`] names an entry and fixes the type stored under
//! it, so reading a value back never needs a cast at the call site:
//!
//! ```rust
//! use gatehouse::context::{RequestContext, ROLE};
//! use gatehouse::Role;
//!
//! let ctx = RequestContext::new().with(&ROLE, Role::Root);
//! assert_eq!(ctx.get(&ROLE), Some(&Role::Root));
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::identity::UserIdentity;
use crate::role::Role;

/// Typed name of a context entry.
pub struct Key<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, _type: PhantomData }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The authenticated user, set by [`authenticate`](crate::middleware::authenticate).
pub const USER_IDENTITY: Key<UserIdentity> = Key::new("userIdentity");

/// The caller's role, set by [`authenticate`](crate::middleware::authenticate).
pub const ROLE: Key<Role> = Key::new("role");

struct Entry {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

/// Immutable key/value carrier threaded through a middleware chain.
#[derive(Clone, Default)]
pub struct RequestContext {
    head: Option<Arc<Entry>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a context holding every entry of `self` plus `key = value`.
    ///
    /// Entries are write-once: if `key` is already present the returned
    /// context is equal to `self` and the new value is discarded.
    pub fn with<T>(&self, key: &Key<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        if self.contains(key) {
            debug!(key = key.name, "context entry already set, keeping original");
            return self.clone();
        }

        Self {
            head: Some(Arc::new(Entry {
                name: key.name,
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up `key`. Absence is an ordinary outcome, not an error.
    pub fn get<T: 'static>(&self, key: &Key<T>) -> Option<&T> {
        self.entries()
            .find(|e| e.name == key.name)
            .and_then(|e| e.value.downcast_ref::<T>())
    }

    pub fn contains<T>(&self, key: &Key<T>) -> bool {
        self.entries().any(|e| e.name == key.name)
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.get(&USER_IDENTITY)
    }

    pub fn role(&self) -> Option<Role> {
        self.get(&ROLE).copied()
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        std::iter::successors(self.head.as_deref(), |e| e.parent.as_deref())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries().map(|e| e.name)).finish()
    }
}
