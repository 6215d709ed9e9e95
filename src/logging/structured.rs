//! Dual-sink logging setup using tracing
//!
//! Every event goes to two sinks with the same filter:
//! - the console, human readable and colorized
//! - an append-only log file through a non-blocking writer
//!
//! # Example
//!
//! ```no_run
//! use drive_backup::logging::init_logging;
//! use drive_backup::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config.level, &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{BackupError, Result};
use std::path::Path;
use tracing::{Dispatch, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Build the logging subscriber without installing it
///
/// The returned guard flushes the file sink when dropped.
///
/// # Errors
///
/// Returns a configuration error for an unknown level or when the log file
/// directory cannot be created.
pub fn build_dispatch(
    log_level_str: &str,
    config: &LoggingConfig,
) -> Result<(Dispatch, LoggingGuard)> {
    let log_level = parse_log_level(log_level_str)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_filter(make_filter(log_level));
    layers.push(console_layer.boxed());

    let file_guard = if config.file_enabled {
        let path = Path::new(&config.file_path);
        let file_name = path.file_name().ok_or_else(|| {
            BackupError::Configuration(format!("Invalid log file path: {}", config.file_path))
        })?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(directory).map_err(|e| {
            BackupError::Configuration(format!(
                "Failed to create log directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(make_filter(log_level));
        layers.push(file_layer.boxed());

        Some(guard)
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry().with(layers);

    Ok((Dispatch::new(subscriber), LoggingGuard::new(file_guard)))
}

/// Initialize the logging system as the process-wide default
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the program
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let (dispatch, guard) = build_dispatch(log_level_str, config)?;

    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| BackupError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        level = %log_level_str,
        file_enabled = config.file_enabled,
        file_path = %config.file_path,
        "Logging initialized"
    );

    Ok(guard)
}

/// `RUST_LOG` wins over the configured level
fn make_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drive_backup={}", level)))
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(BackupError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}
