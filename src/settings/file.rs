//! JSON-file backed settings.
//!
//! The whole map is rewritten on every `set`. Write failures are logged and
//! the in-memory value is kept, so the terminal keeps working on a read-only
//! or full disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use super::{empty_value, Settings};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct FileSettings {
    path: PathBuf,
    values: RwLock<HashMap<String, Value>>,
}

impl FileSettings {
    /// Open the settings file at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| SettingsError::ReadError {
                path: path.clone(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| SettingsError::ParseError {
                path: path.clone(),
                source: e,
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, Value>) -> Result<(), SettingsError> {
        let write_error = |e| SettingsError::WriteError {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }
        let content = serde_json::to_string_pretty(values).map_err(|e| {
            write_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(&self.path, content).map_err(write_error)
    }
}

impl Settings for FileSettings {
    fn get(&self, key: &str) -> Value {
        self.values
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(empty_value)
    }

    fn set(&self, key: &str, value: Value) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value);
        if let Err(err) = self.persist(&values) {
            tracing::warn!(error = %err, "Settings not persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let settings = FileSettings::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.get("state_tables"), json!({}));
    }

    #[test]
    fn test_set_persists_and_reopens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = FileSettings::open(&path).unwrap();
        settings.set("state_tables", json!(["001K003004004127127127127127"]));
        assert!(path.exists());

        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(
            reopened.get("state_tables"),
            json!(["001K003004004127127127127127"])
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileSettings::open(&path),
            Err(SettingsError::ParseError { .. })
        ));
    }
}
