//! Browser-local storage seam.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// Keyed local-only storage shared by every context of one browser
/// profile.
///
/// Injected rather than looked up ambiently, so the owner controls
/// initialisation and teardown. Embedders provide durable
/// implementations; [`MemoryStore`] covers tests and single-run use.
pub trait LocalStore: Send + Sync {
    /// The value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
}

/// In-memory store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}
