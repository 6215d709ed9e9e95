//! Error context extension trait
//!
//! This module provides a context extension trait similar to `anyhow::Context`
//! that works with `Result<T, BackupError>`. Unlike `anyhow`, the context is
//! folded into the message of the original variant, so callers can still tell
//! a failed request from a failed write after context has been added.
//!
//! # Examples
//!
//! ```rust
//! use drive_backup::domain::{BackupError, Result};
//! use drive_backup::domain::context::ResultExt;
//!
//! fn read_manifest(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .context(format!("Failed to read manifest: {}", path))
//! }
//!
//! fn export(id: &str) -> Result<()> {
//!     request(id).with_context(|| format!("Failed to export document {}", id))?;
//!     Ok(())
//! }
//! # fn request(id: &str) -> Result<()> { Ok(()) }
//! ```

use crate::domain::errors::BackupError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// The context is evaluated eagerly; use `.with_context()` if it is
    /// expensive to compute.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation)
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BackupError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().prefixed(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().prefixed(f()))
    }
}

impl BackupError {
    /// Same variant with `context` prepended to its message
    fn prefixed(self, context: impl Display) -> Self {
        let wrap = |message: String| format!("{context}: {message}");
        match self {
            BackupError::Configuration(m) => BackupError::Configuration(wrap(m)),
            BackupError::CredentialMissing(m) => BackupError::CredentialMissing(wrap(m)),
            BackupError::CredentialMalformed(m) => BackupError::CredentialMalformed(wrap(m)),
            BackupError::Authentication(m) => BackupError::Authentication(wrap(m)),
            BackupError::Api(m) => BackupError::Api(wrap(m)),
            BackupError::ExportRequestFailed(m) => BackupError::ExportRequestFailed(wrap(m)),
            BackupError::StreamWriteFailed(m) => BackupError::StreamWriteFailed(wrap(m)),
            BackupError::Manifest(m) => BackupError::Manifest(wrap(m)),
            BackupError::Serialization(m) => BackupError::Serialization(wrap(m)),
            BackupError::Io(m) => BackupError::Io(wrap(m)),
            BackupError::Other(m) => BackupError::Other(wrap(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_context_keeps_variant() {
        let result: Result<()> = Err(BackupError::StreamWriteFailed("disk full".to_string()));
        let err = result
            .context("Failed to write 20240301-120000-ledger.pdf")
            .unwrap_err();

        assert!(matches!(err, BackupError::StreamWriteFailed(_)));
        assert_eq!(
            err.to_string(),
            "Stream write failed: Failed to write 20240301-120000-ledger.pdf: disk full"
        );
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        let result: Result<i32> = Ok(42);
        let with_context = result.with_context(|| {
            called_clone.store(true, Ordering::SeqCst);
            "Expensive context"
        });

        // Context should NOT be evaluated for Ok results
        assert!(with_context.is_ok());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_with_context_error_evaluation() {
        let result: Result<()> = Err(BackupError::ExportRequestFailed("403".to_string()));
        let err = result
            .with_context(|| format!("Failed to export {}", "abc123"))
            .unwrap_err();

        assert!(matches!(err, BackupError::ExportRequestFailed(_)));
        assert!(err.to_string().contains("Failed to export abc123: 403"));
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<()> = Err(BackupError::Api("500".to_string()));
        let err = result
            .context("Failed to list files")
            .context("list-files")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Drive API error: list-files: Failed to list files: 500"
        );
    }

    #[test]
    fn test_io_error_with_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let result: std::result::Result<(), std::io::Error> = Err(io_error);
        let err = result.context("Failed to read token file").unwrap_err();

        assert!(matches!(err, BackupError::Io(_)));
        assert!(err.to_string().contains("Failed to read token file: File not found"));
    }
}
