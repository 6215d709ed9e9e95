//! Domain error types
//!
//! This module defines the error hierarchy for drive-backup.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main drive-backup error type
///
/// Credential errors are fatal to a whole run. Export and stream errors are
/// local to the job that raised them.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token file absent or unreadable
    #[error("Credential missing: {0}")]
    CredentialMissing(String),

    /// Token file content is not a valid stored credential
    #[error("Credential malformed: {0}")]
    CredentialMalformed(String),

    /// OAuth token exchange or refresh failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Drive API call other than an export failed
    #[error("Drive API error: {0}")]
    Api(String),

    /// The export call for a single document failed
    #[error("Export request failed: {0}")]
    ExportRequestFailed(String),

    /// Writing an export to its destination failed
    #[error("Stream write failed: {0}")]
    StreamWriteFailed(String),

    /// Backup manifest could not be read or parsed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl BackupError {
    /// Whether this error prevents the whole run from starting
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            BackupError::CredentialMissing(_) | BackupError::CredentialMalformed(_)
        )
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        BackupError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        BackupError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BackupError {
    fn from(err: toml::de::Error) -> Self {
        BackupError::Configuration(format!("TOML parse error: {err}"))
    }
}
