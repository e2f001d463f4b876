//! User name storage used by the API handlers.
//!
//! Handlers depend on the [`UserDirectory`] capability, never on a concrete
//! store. Implementations are shared by every in-flight request and must be
//! safe to call concurrently.

use dashmap::DashMap;

/// Name lookup and update keyed by user id.
pub trait UserDirectory: Send + Sync + 'static {
    fn get(&self, user_id: &str) -> Option<String>;
    fn set(&self, user_id: &str, name: String);
}

/// Process-local directory on a sharded concurrent map. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    names: DashMap<String, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl UserDirectory for InMemoryDirectory {
    fn get(&self, user_id: &str) -> Option<String> {
        self.names.get(user_id).map(|name| name.value().clone())
    }

    fn set(&self, user_id: &str, name: String) {
        self.names.insert(user_id.to_owned(), name);
    }
}
