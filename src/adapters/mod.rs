//! External system integrations for drive-backup.
//!
//! - [`oauth`] - Google OAuth2 credentials, token storage and refresh
//! - [`drive`] - Google Drive v3 client and the export abstraction
//!
//! # Design Pattern
//!
//! The backup runner only sees [`drive::DocumentExporter`], so runs can be
//! tested with in-memory exporters and no network.
//!
//! ```rust,no_run
//! use drive_backup::adapters::drive::DriveClient;
//! use drive_backup::adapters::oauth::CredentialLoader;
//! use drive_backup::config::load_config;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let auth = CredentialLoader::from_config(&config.auth)?.load()?;
//! let client = DriveClient::new(&config.drive.api_base_url, Arc::new(auth))?;
//! # Ok(())
//! # }
//! ```

pub mod drive;
pub mod oauth;
