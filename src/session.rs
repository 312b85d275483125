//! Session store boundary
//!
//! Token acquisition happens elsewhere (the OAuth block). The pipeline only
//! ever reads the bearer token back out under a configured key.

use std::collections::HashMap;
use std::sync::RwLock;

/// Read-only view of the host's session storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory session store for the CLI and tests
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a bearer token under `key`
    pub fn with_token(key: &str, token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(key, token);
        store
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.into());
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned())
            .filter(|token| !token.is_empty())
    }
}
