use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Behaviour of the terminal core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// State entered on "Go in-service" when the loaded table has it (default: "000").
    #[serde(default = "default_initial_state")]
    pub initial_state: String,
    /// Reinstall the state table persisted in settings at startup (default: true).
    #[serde(default = "default_restore_state_tables")]
    pub restore_state_tables: bool,
}

/// Diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Settings storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// JSON file backing the settings store. In-memory when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_initial_state() -> String {
    "000".to_string()
}

fn default_restore_state_tables() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            initial_state: default_initial_state(),
            restore_state_tables: default_restore_state_tables(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}
