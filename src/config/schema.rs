//! Configuration schema types
//!
//! Every field has a default except `backup.backup_dir`, which must come from
//! the TOML file or the `BACKUP_DIR` environment variable.

use crate::domain::{BackupError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root drive-backup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriveBackupConfig {
    /// Where exports go and what to export
    #[serde(default)]
    pub backup: BackupConfig,

    /// OAuth credential locations
    #[serde(default)]
    pub auth: AuthConfig,

    /// Drive API endpoint settings
    #[serde(default)]
    pub drive: DriveConfig,

    /// Log level and sinks
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DriveBackupConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.backup.validate()?;
        self.auth.validate()?;
        self.drive.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Backup destination and manifest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Destination directory; must already exist when jobs run
    #[serde(default)]
    pub backup_dir: String,

    /// Path of the JSON manifest listing the documents to export
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Upper bound on exports in flight; unlimited when unset
    #[serde(default)]
    pub max_concurrent_exports: Option<usize>,
}

impl BackupConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.backup_dir.trim().is_empty() {
            return Err("backup.backup_dir is required (set BACKUP_DIR)".to_string());
        }

        if self.manifest_path.trim().is_empty() {
            return Err("backup.manifest_path cannot be empty".to_string());
        }

        if self.max_concurrent_exports == Some(0) {
            return Err("backup.max_concurrent_exports must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            backup_dir: String::new(),
            manifest_path: default_manifest_path(),
            max_concurrent_exports: None,
        }
    }
}

/// OAuth credential locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token directory, relative to the user's home directory
    #[serde(default = "default_token_directory")]
    pub token_directory: String,

    /// Token file name inside `token_directory`
    #[serde(default = "default_token_filename")]
    pub token_filename: String,

    /// App-registration file holding the `installed` client credentials
    #[serde(default = "default_client_secret_path")]
    pub client_secret_path: String,
}

impl AuthConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.token_directory.trim().is_empty() {
            return Err("auth.token_directory cannot be empty (set TOKEN_DIRECTORY)".to_string());
        }
        if self.token_filename.trim().is_empty() {
            return Err("auth.token_filename cannot be empty (set TOKEN_FILENAME)".to_string());
        }
        if self.client_secret_path.trim().is_empty() {
            return Err("auth.client_secret_path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Token directory under the given home directory
    pub fn token_dir_in(&self, home: &Path) -> PathBuf {
        home.join(&self.token_directory)
    }

    /// Token file path under the given home directory
    pub fn token_path_in(&self, home: &Path) -> PathBuf {
        self.token_dir_in(home).join(&self.token_filename)
    }

    /// Token file path under the current user's home directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no home directory can be determined.
    pub fn token_path(&self) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            BackupError::Configuration("Unable to determine the home directory".to_string())
        })?;
        Ok(self.token_path_in(&home))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_directory: default_token_directory(),
            token_filename: default_token_filename(),
            client_secret_path: default_client_secret_path(),
        }
    }
}

/// Drive API endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Base URL of the Drive v3 REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl DriveConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(format!(
                "drive.api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }
        Ok(())
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also append log lines to `file_path`
    #[serde(default = "default_true")]
    pub file_enabled: bool,

    /// Append-only log file
    #[serde(default = "default_log_file")]
    pub file_path: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        if self.file_enabled && self.file_path.trim().is_empty() {
            return Err("logging.file_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_enabled: true,
            file_path: default_log_file(),
        }
    }
}

// Default value functions
fn default_manifest_path() -> String {
    "backup_file_list.json".to_string()
}

fn default_token_directory() -> String {
    ".credentials".to_string()
}

fn default_token_filename() -> String {
    "drive-backup.json".to_string()
}

fn default_client_secret_path() -> String {
    "client_secret.json".to_string()
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_file() -> String {
    "google-drive-backup.log".to_string()
}

fn default_true() -> bool {
    true
}
