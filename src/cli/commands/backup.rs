//! Backup command implementation
//!
//! This module implements the `backup` command, the unattended entry point
//! run from cron. It never prompts: without a stored token it logs the
//! problem and exits.

use crate::adapters::drive::DriveClient;
use crate::adapters::oauth::CredentialLoader;
use crate::config::DriveBackupConfig;
use crate::core::export::ExportRunner;
use crate::domain::load_manifest;
use clap::Args;
use std::sync::Arc;

/// Arguments for the backup command
#[derive(Args, Debug, Default)]
pub struct BackupArgs {
    /// Override the manifest path
    #[arg(long)]
    pub manifest: Option<String>,

    /// Override the backup directory
    #[arg(long)]
    pub backup_dir: Option<String>,

    /// Cap the number of exports in flight
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

impl BackupArgs {
    /// Execute the backup command
    pub async fn execute(&self, config: &DriveBackupConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting backup command");

        let mut config = config.clone();
        if let Some(manifest) = &self.manifest {
            config.backup.manifest_path = manifest.clone();
        }
        if let Some(backup_dir) = &self.backup_dir {
            config.backup.backup_dir = backup_dir.clone();
        }
        if self.max_concurrent.is_some() {
            config.backup.max_concurrent_exports = self.max_concurrent;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        let jobs = match load_manifest(&config.backup.manifest_path) {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load backup manifest");
                return Ok(2); // Manifest error exit code
            }
        };

        let loader = match CredentialLoader::from_config(&config.auth) {
            Ok(loader) => loader,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve token path");
                return Ok(2);
            }
        };

        let auth = match loader.load() {
            Ok(auth) => auth,
            Err(e) if e.is_credential_error() => {
                // Already logged by the loader
                return Ok(3); // Credential exit code
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load app credentials");
                return Ok(2);
            }
        };

        let client = match DriveClient::new(&config.drive.api_base_url, Arc::new(auth)) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Drive client");
                return Ok(2);
            }
        };

        let runner = ExportRunner::new(Arc::new(client), &config.backup.backup_dir)
            .with_max_concurrency(config.backup.max_concurrent_exports);

        let summary = runner.run(&jobs).await;

        if summary.is_successful() {
            Ok(0)
        } else {
            Ok(1) // Partial failure exit code
        }
    }
}
