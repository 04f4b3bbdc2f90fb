//! Terminal configuration file.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, SettingsConfig, TerminalConfig};
