//! Logging and observability
//!
//! Leveled, line-atomic logging to the console and an append-only file. The
//! subscriber is constructed explicitly by the binary from
//! [`LoggingConfig`](crate::config::LoggingConfig); library code only emits
//! events through the `tracing` macros.
//!
//! # Example
//!
//! ```no_run
//! use drive_backup::logging::init_logging;
//! use drive_backup::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Backup started");
//! ```

pub mod structured;

pub use structured::{build_dispatch, init_logging, LoggingGuard};

/// Log the completion of one export
///
/// # Example
///
/// ```no_run
/// use drive_backup::log_export_done;
///
/// log_export_done!("20240301-120000-ledger.pdf", 1024u64);
/// ```
#[macro_export]
macro_rules! log_export_done {
    ($file_name:expr, $bytes:expr) => {
        tracing::info!(
            file = %$file_name,
            bytes = $bytes,
            "Done: {}",
            $file_name
        );
    };
}

/// Log a failed export together with its cause
///
/// # Example
///
/// ```no_run
/// use drive_backup::log_export_failed;
/// use drive_backup::domain::BackupError;
///
/// let error = BackupError::ExportRequestFailed("403 Forbidden".to_string());
/// log_export_failed!("abc123", "20240301-120000-ledger.pdf", &error);
/// ```
#[macro_export]
macro_rules! log_export_failed {
    ($document_id:expr, $file_name:expr, $error:expr) => {
        tracing::error!(
            document_id = %$document_id,
            file = %$file_name,
            error = %$error,
            "Error during download"
        );
    };
}
