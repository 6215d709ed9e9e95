//! OAuth app registration and stored token models
//!
//! Two files feed authentication:
//! - the app-registration file (`client_secret.json`) with an `installed`
//!   object describing the OAuth client
//! - the token file written by the `authorize` command, in the format the
//!   Google auth libraries use (`expiry_date` in epoch milliseconds)

use crate::config::{secret_string, SecretString};
use crate::domain::{BackupError, Result};
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Google OAuth2 authorization endpoint
pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google OAuth2 token endpoint
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens expiring within this window are treated as expired
const EXPIRY_MARGIN_MINUTES: i64 = 5;

#[derive(Deserialize)]
struct AppCredentialsFile {
    installed: InstalledApp,
}

#[derive(Deserialize)]
struct InstalledApp {
    client_id: String,
    client_secret: SecretString,
    #[serde(default)]
    redirect_uris: Vec<String>,
    #[serde(default)]
    auth_uri: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

/// OAuth client registration for an installed application
#[derive(Debug, Clone)]
pub struct AppCredentials {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: SecretString,

    /// First redirect URI of the registration
    pub redirect_uri: String,

    /// Authorization endpoint
    pub auth_uri: String,

    /// Token endpoint
    pub token_uri: String,
}

impl AppCredentials {
    /// Parses the app-registration JSON
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the JSON has no `installed` object
    /// or its `redirect_uris` list is empty.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: AppCredentialsFile = serde_json::from_str(contents).map_err(|e| {
            BackupError::Configuration(format!("Invalid app credential file: {e}"))
        })?;
        let installed = file.installed;

        let redirect_uri = installed.redirect_uris.into_iter().next().ok_or_else(|| {
            BackupError::Configuration(
                "App credential file has an empty redirect_uris list".to_string(),
            )
        })?;

        Ok(Self {
            client_id: installed.client_id,
            client_secret: installed.client_secret,
            redirect_uri,
            auth_uri: installed
                .auth_uri
                .unwrap_or_else(|| GOOGLE_AUTH_URI.to_string()),
            token_uri: installed
                .token_uri
                .unwrap_or_else(|| GOOGLE_TOKEN_URI.to_string()),
        })
    }

    /// Reads and parses the app-registration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BackupError::Configuration(format!(
                "Failed to read app credential file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }
}

/// Persisted OAuth token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Bearer token sent with API calls
    pub access_token: SecretString,

    /// Long-lived token used to obtain new access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<SecretString>,

    /// Access token expiry, milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,

    /// Granted scopes, space separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Token type, normally "Bearer"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl StoredCredential {
    /// Create a credential holding only an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: secret_string(access_token.into()),
            refresh_token: None,
            expiry_date: None,
            scope: None,
            token_type: Some("Bearer".to_string()),
        }
    }

    /// Set the refresh token
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(secret_string(refresh_token.into()));
        self
    }

    /// Set the expiry time
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expires_at.timestamp_millis());
        self
    }

    /// Parses token file content
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::CredentialMalformed`] when the content is not a
    /// JSON object with a non-empty `access_token`.
    pub fn from_json(contents: &str) -> Result<Self> {
        let credential: StoredCredential = serde_json::from_str(contents)
            .map_err(|e| BackupError::CredentialMalformed(format!("Invalid token content: {e}")))?;

        if credential.access_token.expose_secret().is_empty() {
            return Err(BackupError::CredentialMalformed(
                "Token content has an empty access_token".to_string(),
            ));
        }

        Ok(credential)
    }

    /// Serializes the credential for the token file
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Access token expiry, if known
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.and_then(DateTime::from_timestamp_millis)
    }

    /// Whether the access token is expired or about to expire at `now`
    ///
    /// Tokens without an expiry are assumed valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at < now + Duration::minutes(EXPIRY_MARGIN_MINUTES),
            None => false,
        }
    }

    /// Whether the access token can be renewed without user interaction
    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty())
    }
}
