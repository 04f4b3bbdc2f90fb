use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize tracing for the process.
///
/// `RUST_LOG` takes precedence over the configured filter. Logs go to stderr
/// unless a file is configured, in which case they are appended to it. If the
/// file cannot be opened, logging stays disabled; the terminal does not depend
/// on it. Calling this more than once is harmless.
pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let Some(path) = &config.file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(UtcTime::rfc_3339())
            .try_init();
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "Warning: Failed to open log file {}: {}",
                path.display(),
                err
            );
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
