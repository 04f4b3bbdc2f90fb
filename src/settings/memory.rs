use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::{empty_value, Settings};

/// In-memory settings. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Settings for MemorySettings {
    fn get(&self, key: &str) -> Value {
        self.inner
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(empty_value)
    }

    fn set(&self, key: &str, value: Value) {
        self.inner.write().insert(key.to_string(), value);
    }
}
