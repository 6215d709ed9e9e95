//! Authenticated session handed to API clients

use super::client::OAuthClient;
use super::credentials::{AppCredentials, StoredCredential};
use crate::domain::{BackupError, Result};
use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

/// OAuth client carrying a loaded credential
///
/// Expired access tokens are renewed in memory only; the token file is left
/// untouched so an unattended run never rewrites user credentials. A refresh
/// is attempted at most once per session: after a rejection every caller gets
/// the same authentication error.
pub struct AuthenticatedClient {
    oauth: OAuthClient,
    state: RwLock<SessionState>,
}

struct SessionState {
    credential: StoredCredential,
    refresh_failed: Option<String>,
}

impl AuthenticatedClient {
    pub fn new(oauth: OAuthClient, credential: StoredCredential) -> Self {
        Self {
            oauth,
            state: RwLock::new(SessionState {
                credential,
                refresh_failed: None,
            }),
        }
    }

    pub fn app(&self) -> &AppCredentials {
        self.oauth.app()
    }

    /// Access token to present to the API
    ///
    /// # Errors
    ///
    /// Returns an authentication error when an expired token cannot be
    /// refreshed.
    pub async fn access_token(&self) -> Result<String> {
        let state = self.state.read().await;
        if let Some(reason) = &state.refresh_failed {
            return Err(BackupError::Authentication(reason.clone()));
        }
        if !state.credential.is_expired_at(Utc::now()) {
            return Ok(state.credential.access_token.expose_secret().as_ref().to_string());
        }
        drop(state);

        let mut state = self.state.write().await;

        // Another task may have refreshed, or failed to, while we waited for the write lock
        if let Some(reason) = &state.refresh_failed {
            return Err(BackupError::Authentication(reason.clone()));
        }
        if !state.credential.is_expired_at(Utc::now()) {
            return Ok(state.credential.access_token.expose_secret().as_ref().to_string());
        }

        let refresh_token = match state.credential.refresh_token.as_ref() {
            Some(token) if state.credential.can_refresh() => {
                token.expose_secret().as_ref().to_string()
            }
            _ => {
                tracing::warn!("Access token expired and no refresh token is stored");
                return Ok(state.credential.access_token.expose_secret().as_ref().to_string());
            }
        };

        tracing::info!("Refreshing expired access token");
        match self.oauth.refresh(&refresh_token).await {
            Ok(credential) => {
                state.credential = credential;
                Ok(state.credential.access_token.expose_secret().as_ref().to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "Token refresh failed");
                let reason = match e {
                    BackupError::Authentication(message) => message,
                    other => other.to_string(),
                };
                state.refresh_failed = Some(reason.clone());
                Err(BackupError::Authentication(reason))
            }
        }
    }

    /// `Authorization` header value
    pub async fn auth_header(&self) -> Result<String> {
        Ok(format!("Bearer {}", self.access_token().await?))
    }
}
