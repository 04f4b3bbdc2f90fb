use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::states::StateNumber;

/// Why a terminal config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Default config location: `ndc-terminal/config.toml` under the
    /// platform config directory, or under `.` when there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("ndc-terminal").join("config.toml")
    }

    /// Config from the default location. A terminal without a config file
    /// runs with defaults (initial state `000`, tables restored, `info` logs).
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Read, parse and validate an explicit config file. Unlike [`Config::load`]
    /// a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject an initial state that is not a three-digit state number and an
    /// empty log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.initial_state.parse::<StateNumber>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Initial state '{}' is not a three-digit state number",
                    self.terminal.initial_state
                ),
            });
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Logging filter must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
