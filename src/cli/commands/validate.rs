//! Validate config command implementation
//!
//! This module implements the `validate-config` command. It checks the
//! configuration, the manifest and both credential files without touching the
//! network.

use crate::adapters::oauth::{AppCredentials, TokenStore};
use crate::config::{load_config, DriveBackupConfig};
use crate::domain::load_manifest;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loads the configuration from `config_path` (or the environment alone)
    /// and validates it before checking the files it names.
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!("Validating configuration");

        println!("🔍 Validating drive-backup configuration");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        println!("✅ Configuration is valid");

        Ok(check_files(&config))
    }
}

/// Check the backup directory, manifest and credential files a valid
/// configuration points at
fn check_files(config: &DriveBackupConfig) -> i32 {
    if Path::new(&config.backup.backup_dir).is_dir() {
        println!("✅ Backup directory exists");
    } else {
        println!("⚠️  Backup directory does not exist: {}", config.backup.backup_dir);
    }

    let jobs = match load_manifest(&config.backup.manifest_path) {
        Ok(jobs) => {
            println!("✅ Manifest loaded: {} job(s)", jobs.len());
            jobs
        }
        Err(e) => {
            println!("❌ Failed to load manifest");
            println!("   Error: {e}");
            return 2;
        }
    };

    if let Err(e) = AppCredentials::load(&config.auth.client_secret_path) {
        println!("❌ Failed to load app credentials");
        println!("   Error: {e}");
        return 2;
    }
    println!("✅ App credentials loaded");

    let token_path = match config.auth.token_path() {
        Ok(path) => path,
        Err(e) => {
            println!("❌ {e}");
            return 2;
        }
    };
    let token_check = TokenStore::new(&token_path).load();

    println!();
    println!("Configuration Summary:");
    println!("  Backup Directory: {}", config.backup.backup_dir);
    println!("  Manifest: {}", config.backup.manifest_path);
    println!(
        "  Max Concurrent Exports: {}",
        config
            .backup
            .max_concurrent_exports
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string())
    );
    println!("  Token File: {}", token_path.display());
    println!("  Drive API: {}", config.drive.api_base_url);
    println!("  Log Level: {}", config.logging.level);
    if config.logging.file_enabled {
        println!("  Log File: {}", config.logging.file_path);
    }
    for job in &jobs {
        println!(
            "  Job: {} as {} -> {}.{}",
            job.document_id, job.export_mime_type, job.base_file_name, job.file_extension
        );
    }
    println!();

    match token_check {
        Ok(_) => {
            println!("✅ Stored token found");
            0
        }
        Err(e) => {
            println!("❌ {e}");
            println!("   Run `drive-backup authorize` to create it");
            3 // Credential exit code
        }
    }
}
