//! Configuration management for drive-backup.
//!
//! Configuration comes from three layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file, with `${VAR_NAME}` substitution
//! 3. Environment variables (a `.env` file is loaded by the binary first)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use drive_backup::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // BACKUP_DIR, TOKEN_DIRECTORY, TOKEN_FILENAME and LOG_LEVEL from the environment
//! let config = load_config(None)?;
//!
//! println!("Backups go to {}", config.backup.backup_dir);
//! println!("Token file: {}", config.auth.token_path()?.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Setting |
//! |---|---|
//! | `BACKUP_DIR` | destination directory (required, must exist) |
//! | `TOKEN_DIRECTORY` | token directory under `$HOME` |
//! | `TOKEN_FILENAME` | token file name |
//! | `LOG_LEVEL` | log verbosity, default `debug` |
//! | `MANIFEST_PATH` | backup manifest, default `backup_file_list.json` |
//! | `CLIENT_SECRET_PATH` | app registration, default `client_secret.json` |
//! | `MAX_CONCURRENT_EXPORTS` | cap on exports in flight |
//! | `DRIVE_API_BASE_URL` | Drive v3 endpoint |
//! | `LOG_FILE`, `LOG_FILE_ENABLED` | file sink |
//!
//! # Example Configuration
//!
//! ```toml
//! [backup]
//! backup_dir = "${HOME}/backups/drive"
//! max_concurrent_exports = 4
//!
//! [auth]
//! token_directory = ".credentials"
//! token_filename = "drive-backup.json"
//!
//! [logging]
//! level = "info"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, resolve_config};
pub use schema::{AuthConfig, BackupConfig, DriveBackupConfig, DriveConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
