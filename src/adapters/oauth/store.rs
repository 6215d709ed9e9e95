//! Token file persistence

use super::credentials::StoredCredential;
use crate::domain::context::ResultExt;
use crate::domain::{BackupError, Result};
use std::path::{Path, PathBuf};

/// Reads and writes the stored OAuth token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the stored credential
    ///
    /// # Errors
    ///
    /// - [`BackupError::CredentialMissing`] when the file cannot be read
    /// - [`BackupError::CredentialMalformed`] when its content does not parse
    pub fn load(&self) -> Result<StoredCredential> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            BackupError::CredentialMissing(format!("{}: {}", self.path.display(), e))
        })?;
        StoredCredential::from_json(&contents)
    }

    /// Write the credential, creating the token directory if needed
    pub fn save(&self, credential: &StoredCredential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create token directory {}", parent.display())
                })?;
            }
        }

        std::fs::write(&self.path, credential.to_json()?)
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), "Token stored to {}", self.path.display());
        Ok(())
    }
}
