//! Core business logic for drive-backup.
//!
//! # Modules
//!
//! - [`export`] - Concurrent export runner, output naming and run summary
//!
//! # Backup Workflow
//!
//! 1. **Load Credentials**: Read the app registration and the stored token
//! 2. **Load Manifest**: Read the list of documents to back up
//! 3. **Export**: Start one export per job, all at once
//! 4. **Stream**: Write each response body to its timestamped file
//! 5. **Report**: Log one line per job and a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use drive_backup::adapters::drive::DriveClient;
//! use drive_backup::adapters::oauth::CredentialLoader;
//! use drive_backup::config::load_config;
//! use drive_backup::core::export::ExportRunner;
//! use drive_backup::domain::load_manifest;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let auth = CredentialLoader::from_config(&config.auth)?.load()?;
//! let jobs = load_manifest(&config.backup.manifest_path)?;
//!
//! let client = DriveClient::new(&config.drive.api_base_url, Arc::new(auth))?;
//! let runner = ExportRunner::new(Arc::new(client), &config.backup.backup_dir);
//! let summary = runner.run(&jobs).await;
//!
//! println!("Successful: {}", summary.successful);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
