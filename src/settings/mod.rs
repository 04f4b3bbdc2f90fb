//! Key-value settings collaborator.
//!
//! The terminal persists a small amount of data here (the last loaded state
//! table). Reads never fail: a missing key yields an empty JSON object.

mod file;
mod memory;

pub use file::{FileSettings, SettingsError};
pub use memory::MemorySettings;

use serde_json::{Map, Value};

/// Settings storage shared by one or more terminal instances.
pub trait Settings: Send + Sync {
    /// Value stored under `key`, or an empty object when absent.
    fn get(&self, key: &str) -> Value;

    /// Store `value` under `key`. Storage failures are the store's concern.
    fn set(&self, key: &str, value: Value);
}

/// The value returned for missing keys.
pub fn empty_value() -> Value {
    Value::Object(Map::new())
}
