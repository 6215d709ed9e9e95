//! List files command implementation
//!
//! This module implements the `list-files` command, a quick check that the
//! stored token works and a way to look up document IDs for the manifest.

use crate::adapters::drive::{DriveClient, DriveFile};
use crate::adapters::oauth::CredentialLoader;
use crate::config::DriveBackupConfig;
use clap::Args;
use std::sync::Arc;

/// Arguments for the list-files command
#[derive(Args, Debug)]
pub struct ListFilesArgs {
    /// Number of files to list
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
}

impl ListFilesArgs {
    /// Execute the list-files command
    pub async fn execute(&self, config: &DriveBackupConfig) -> anyhow::Result<i32> {
        tracing::info!(page_size = self.page_size, "Starting list-files command");

        let auth = match CredentialLoader::from_config(&config.auth).and_then(|l| l.load()) {
            Ok(auth) => auth,
            Err(e) if e.is_credential_error() => {
                eprintln!("{e}");
                return Ok(3); // Credential exit code
            }
            Err(e) => {
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let client = match DriveClient::new(&config.drive.api_base_url, Arc::new(auth)) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        match client.list_files(self.page_size).await {
            Ok(list) => {
                print!("{}", render_files(&list.files));
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "The API returned an error");
                println!("The API returned an error: {e}");
                Ok(4) // API error exit code
            }
        }
    }
}

fn render_files(files: &[DriveFile]) -> String {
    if files.is_empty() {
        return "No files found.\n".to_string();
    }

    let mut out = String::from("Files:\n");
    for file in files {
        out.push_str(&format!("{} ({})\n", file.name, file.id));
    }
    out
}
