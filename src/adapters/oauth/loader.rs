//! Credential loading for unattended runs

use super::client::OAuthClient;
use super::credentials::AppCredentials;
use super::session::AuthenticatedClient;
use super::store::TokenStore;
use crate::config::AuthConfig;
use crate::domain::Result;
use std::path::{Path, PathBuf};

/// Builds an authenticated client from the files on disk
///
/// Never prompts and never performs network I/O; an absent token is reported
/// and left for the `authorize` command to fix.
#[derive(Debug, Clone)]
pub struct CredentialLoader {
    client_secret_path: PathBuf,
    store: TokenStore,
}

impl CredentialLoader {
    pub fn new(client_secret_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            client_secret_path: client_secret_path.into(),
            store: TokenStore::new(token_path),
        }
    }

    /// Resolve paths from configuration, the token under `$HOME`
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Ok(Self::new(&config.client_secret_path, config.token_path()?))
    }

    pub fn token_path(&self) -> &Path {
        self.store.path()
    }

    /// Load the app registration and the stored token
    ///
    /// # Errors
    ///
    /// - Configuration error when the app registration is unusable
    /// - [`CredentialMissing`](crate::domain::BackupError::CredentialMissing)
    ///   or [`CredentialMalformed`](crate::domain::BackupError::CredentialMalformed)
    ///   for the token file; both are logged as "Token not on file"
    pub fn load(&self) -> Result<AuthenticatedClient> {
        let app = AppCredentials::load(&self.client_secret_path)?;

        let credential = self.store.load().inspect_err(|e| {
            tracing::error!(
                path = %self.store.path().display(),
                error = %e,
                "Token not on file"
            );
        })?;

        tracing::debug!(path = %self.store.path().display(), "Loaded stored token");

        Ok(AuthenticatedClient::new(OAuthClient::new(app), credential))
    }
}
