//! OAuth2 token endpoint client
//!
//! Talks to the token endpoint named in the app registration for the two
//! grants this tool needs: exchanging an authorization code and refreshing an
//! access token.

use super::credentials::{AppCredentials, StoredCredential};
use crate::config::secret_string;
use crate::domain::{BackupError, Result};
use chrono::{Duration, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use url::Url;

/// Full Drive access, needed to export arbitrary documents
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_credential(self, fallback_refresh_token: Option<&str>) -> StoredCredential {
        let expires_in = self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expiry = Utc::now() + Duration::seconds(expires_in);

        StoredCredential {
            access_token: secret_string(self.access_token),
            refresh_token: self
                .refresh_token
                .or_else(|| fallback_refresh_token.map(str::to_string))
                .map(secret_string),
            expiry_date: Some(expiry.timestamp_millis()),
            scope: self.scope,
            token_type: self.token_type,
        }
    }
}

/// OAuth2 client for an installed application
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    app: AppCredentials,
}

impl OAuthClient {
    pub fn new(app: AppCredentials) -> Self {
        Self::with_http_client(app, Client::new())
    }

    pub fn with_http_client(app: AppCredentials, http: Client) -> Self {
        Self { http, app }
    }

    pub fn app(&self) -> &AppCredentials {
        &self.app
    }

    /// Consent page URL requesting offline access to Drive
    pub fn authorization_url(&self) -> Result<String> {
        let url = Url::parse_with_params(
            &self.app.auth_uri,
            &[
                ("access_type", "offline"),
                ("scope", DRIVE_SCOPE),
                ("response_type", "code"),
                ("client_id", self.app.client_id.as_str()),
                ("redirect_uri", self.app.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| BackupError::Configuration(format!("Invalid auth URI: {e}")))?;

        Ok(url.to_string())
    }

    /// Exchange an authorization code for a credential
    pub async fn exchange_code(&self, code: &str) -> Result<StoredCredential> {
        let client_secret = self.app.client_secret.expose_secret();
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.app.client_id.as_str()),
            ("client_secret", client_secret.as_ref()),
            ("redirect_uri", self.app.redirect_uri.as_str()),
        ];

        let response = self.request_token(&params, "Token exchange").await?;
        Ok(response.into_credential(None))
    }

    /// Obtain a fresh access token
    ///
    /// The refresh token is kept when the endpoint does not issue a new one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<StoredCredential> {
        let client_secret = self.app.client_secret.expose_secret();
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.app.client_id.as_str()),
            ("client_secret", client_secret.as_ref()),
        ];

        let response = self.request_token(&params, "Token refresh").await?;
        Ok(response.into_credential(Some(refresh_token)))
    }

    async fn request_token(&self, params: &[(&str, &str)], action: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.app.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| BackupError::Authentication(format!("{action} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackupError::Authentication(format!(
                "{action} failed with status {status}: {body}"
            )));
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            BackupError::Authentication(format!("{action} returned an invalid response: {e}"))
        })
    }
}
