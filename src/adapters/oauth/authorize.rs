//! Interactive consent flow
//!
//! Prints the consent URL, reads the code the user pastes back, then stores
//! the resulting token. Only the `authorize` command runs this; backup runs never
//! prompt.

use super::client::OAuthClient;
use super::credentials::StoredCredential;
use super::store::TokenStore;
use crate::domain::{BackupError, Result};
use std::io::{BufRead, Write};

/// Runs the installed-app consent flow against a token store
pub struct InteractiveAuthorizer {
    oauth: OAuthClient,
    store: TokenStore,
}

impl InteractiveAuthorizer {
    pub fn new(oauth: OAuthClient, store: TokenStore) -> Self {
        Self { oauth, store }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Consent URL the user opens in a browser
    pub fn authorization_url(&self) -> Result<String> {
        self.oauth.authorization_url()
    }

    /// Exchange an authorization code and store the token it yields
    pub async fn complete(&self, code: &str) -> Result<StoredCredential> {
        let credential = self.oauth.exchange_code(code).await.inspect_err(|e| {
            tracing::error!(error = %e, "Error while trying to retrieve access token");
        })?;

        self.store.save(&credential)?;
        Ok(credential)
    }
}

/// Print the consent URL and read back the code the user pastes
///
/// Blocks on `input`; callers on an async runtime run it on a blocking thread.
pub fn prompt_for_code<R, W>(url: &str, input: &mut R, output: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Authorize this app by visiting this url: {url}")?;
    write!(output, "Enter the code from that page here: ")?;
    output.flush()?;

    let mut code = String::new();
    input.read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        return Err(BackupError::Authentication(
            "No authorization code entered".to_string(),
        ));
    }

    Ok(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::oauth::AppCredentials;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn app_for(token_uri: String) -> AppCredentials {
        AppCredentials {
            client_id: "client-id".to_string(),
            client_secret: secret_string("client-secret".to_string()),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri,
        }
    }

    #[tokio::test]
    async fn test_authorize_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.granted","refresh_token":"1//r","expires_in":3599}"#)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join(".credentials").join("token.json");
        let authorizer = InteractiveAuthorizer::new(
            OAuthClient::new(app_for(format!("{}/token", server.url()))),
            TokenStore::new(&token_path),
        );

        let url = authorizer.authorization_url().unwrap();
        let mut input = Cursor::new(b"4/code-from-browser\n".to_vec());
        let mut output = Vec::new();
        let code = prompt_for_code(&url, &mut input, &mut output).unwrap();
        assert_eq!(code, "4/code-from-browser");

        let credential = authorizer.complete(&code).await.unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("https://accounts.google.com/o/oauth2/auth?"));
        assert!(printed.contains("Enter the code from that page here: "));
        assert_eq!(credential.access_token.expose_secret(), "ya29.granted");

        let stored = TokenStore::new(&token_path).load().unwrap();
        assert_eq!(stored.access_token.expose_secret(), "ya29.granted");
    }

    #[test]
    fn test_prompt_empty_code() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut output = Vec::new();
        let err = prompt_for_code(
            "https://accounts.google.com/o/oauth2/auth?client_id=id",
            &mut input,
            &mut output,
        )
        .unwrap_err();

        assert!(matches!(err, BackupError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_complete_rejected_code_stores_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token.json");
        let authorizer = InteractiveAuthorizer::new(
            OAuthClient::new(app_for(format!("{}/token", server.url()))),
            TokenStore::new(&token_path),
        );

        let err = authorizer.complete("4/expired").await.unwrap_err();

        assert!(matches!(err, BackupError::Authentication(_)));
        assert!(!token_path.exists());
    }
}
