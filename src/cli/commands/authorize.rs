//! Authorize command implementation
//!
//! This module implements the `authorize` command, the one-time interactive
//! setup that stores the OAuth token later backup runs rely on.

use crate::adapters::oauth::{
    prompt_for_code, AppCredentials, InteractiveAuthorizer, OAuthClient, TokenStore,
};
use crate::config::DriveBackupConfig;
use crate::domain::BackupError;
use clap::Args;

/// Arguments for the authorize command
#[derive(Args, Debug, Default)]
pub struct AuthorizeArgs {
    /// Replace an existing token
    #[arg(short, long)]
    pub force: bool,
}

impl AuthorizeArgs {
    /// Execute the authorize command
    pub async fn execute(&self, config: &DriveBackupConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting authorize command");

        let app = match AppCredentials::load(&config.auth.client_secret_path) {
            Ok(app) => app,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load app credentials");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let token_path = match config.auth.token_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let store = TokenStore::new(token_path);
        if store.exists() && !self.force {
            println!(
                "A token is already stored at {}. Use --force to replace it.",
                store.path().display()
            );
            return Ok(0);
        }

        let authorizer = InteractiveAuthorizer::new(OAuthClient::new(app), store);
        let url = authorizer.authorization_url()?;

        // Stdin is read on a blocking thread and released before the code exchange
        let prompt = tokio::task::spawn_blocking(move || {
            let mut input = std::io::stdin().lock();
            let mut output = std::io::stdout();
            prompt_for_code(&url, &mut input, &mut output)
        })
        .await?;

        let result = match prompt {
            Ok(code) => authorizer.complete(&code).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => {
                println!("Token stored to {}", authorizer.store().path().display());
                Ok(0)
            }
            Err(e @ BackupError::Authentication(_)) => {
                eprintln!("{e}");
                Ok(4) // Authentication error exit code
            }
            Err(e) => Err(e.into()),
        }
    }
}
