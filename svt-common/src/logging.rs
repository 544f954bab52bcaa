//! Tracing initialisation
//!
//! One subscriber per process: an `EnvFilter` (RUST_LOG wins over the
//! configured level), a plain-text file layer for the run log and a stderr
//! layer for the console.

use crate::{Error, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr only if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Install the global subscriber
///
/// Returns the log file actually in use. A log file that cannot be created is
/// reported on stderr and the run continues with console logging only.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let mut active_file = None;
    let file_layer = match &config.file {
        Some(path) => match File::create(path) {
            Ok(file) => {
                active_file = Some(path.clone());
                Some(
                    fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
            }
            Err(e) => {
                eprintln!("Error: could not open log file {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(active_file)
}
