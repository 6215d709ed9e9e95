//! # drive-backup - Google Drive document backup
//!
//! drive-backup exports a fixed list of Google Drive documents to a local
//! directory. It is meant to run unattended, typically from cron.
//!
//! ## Overview
//!
//! A run:
//! - **Loads** the stored OAuth token and the backup manifest
//! - **Exports** every listed document concurrently through the Drive v3 API
//! - **Writes** each export to `{backup_dir}/{YYYYMMDD-HHmmss}-{fileName}.{extension}`
//! - **Logs** one line per document to the console and `google-drive-backup.log`
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Backup execution and reporting
//! - [`adapters`] - External integrations (Google OAuth, Google Drive)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Console and file logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drive_backup::adapters::drive::DriveClient;
//! use drive_backup::adapters::oauth::CredentialLoader;
//! use drive_backup::config::load_config;
//! use drive_backup::core::export::ExportRunner;
//! use drive_backup::domain::load_manifest;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(None)?;
//!     let jobs = load_manifest(&config.backup.manifest_path)?;
//!     let auth = CredentialLoader::from_config(&config.auth)?.load()?;
//!
//!     let client = DriveClient::new(&config.drive.api_base_url, Arc::new(auth))?;
//!     let summary = ExportRunner::new(Arc::new(client), &config.backup.backup_dir)
//!         .run(&jobs)
//!         .await;
//!
//!     println!("Exported {} of {} documents", summary.successful, summary.total_jobs);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::BackupError`]. A missing or malformed token
//! stops the run before any export is requested; a failed export only affects
//! its own job.
//!
//! ## Logging
//!
//! drive-backup uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, error};
//!
//! info!(file = "20240301-120000-ledger.pdf", "Done: 20240301-120000-ledger.pdf");
//! error!(document_id = "abc123", "Error during download");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
