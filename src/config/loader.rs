//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DriveBackupConfig;
use crate::domain::errors::BackupError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from an optional TOML file plus the environment
///
/// This function:
/// 1. Starts from built-in defaults, or reads the TOML file when given
/// 2. Performs environment variable substitution (${VAR} syntax) on the file
/// 3. Applies environment variable overrides (`BACKUP_DIR`, `LOG_LEVEL`, ...)
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - The given file does not exist or cannot be read
/// - TOML parsing fails
/// - A referenced `${VAR}` is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use drive_backup::config::loader::load_config;
/// use std::path::Path;
///
/// let from_env = load_config(None).expect("Failed to load config");
/// let from_file = load_config(Some(Path::new("drive-backup.toml"))).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<DriveBackupConfig> {
    let config = resolve_config(path)?;

    config.validate().map_err(|e| {
        BackupError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Layers defaults, the optional TOML file and the environment without
/// validating the result
///
/// Commands that need only part of the configuration (such as `authorize`,
/// which has no use for a backup directory) validate what they use.
pub fn resolve_config(path: Option<&Path>) -> Result<DriveBackupConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => DriveBackupConfig::default(),
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<DriveBackupConfig> {
    if !path.exists() {
        return Err(BackupError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BackupError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: DriveBackupConfig = toml::from_str(&contents)
        .map_err(|e| BackupError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BackupError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BackupError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies overrides from the process environment
fn apply_env_overrides(config: &mut DriveBackupConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Applies overrides from any key lookup
///
/// Unparseable numeric or boolean values are ignored and the previous value
/// is kept.
fn apply_overrides<F>(config: &mut DriveBackupConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // Backup overrides
    if let Some(val) = lookup("BACKUP_DIR") {
        config.backup.backup_dir = val;
    }
    if let Some(val) = lookup("MANIFEST_PATH") {
        config.backup.manifest_path = val;
    }
    if let Some(val) = lookup("MAX_CONCURRENT_EXPORTS") {
        if let Ok(cap) = val.parse() {
            config.backup.max_concurrent_exports = Some(cap);
        }
    }

    // Auth overrides
    if let Some(val) = lookup("TOKEN_DIRECTORY") {
        config.auth.token_directory = val;
    }
    if let Some(val) = lookup("TOKEN_FILENAME") {
        config.auth.token_filename = val;
    }
    if let Some(val) = lookup("CLIENT_SECRET_PATH") {
        config.auth.client_secret_path = val;
    }

    // Drive overrides
    if let Some(val) = lookup("DRIVE_API_BASE_URL") {
        config.drive.api_base_url = val;
    }

    // Logging overrides
    if let Some(val) = lookup("LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = lookup("LOG_FILE") {
        config.logging.file_path = val;
    }
    if let Some(val) = lookup("LOG_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(config.logging.file_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DRIVE_BACKUP_TEST_VAR", "test_value");
        let input = "backup_dir = \"${DRIVE_BACKUP_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "backup_dir = \"test_value\"\n");
        std::env::remove_var("DRIVE_BACKUP_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DRIVE_BACKUP_MISSING_VAR");
        let input = "backup_dir = \"${DRIVE_BACKUP_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# backup_dir = \"${DRIVE_BACKUP_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${DRIVE_BACKUP_COMMENTED_VAR}"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = DriveBackupConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("BACKUP_DIR", "/srv/backups"),
                ("TOKEN_DIRECTORY", ".drive"),
                ("TOKEN_FILENAME", "token.json"),
                ("LOG_LEVEL", "info"),
                ("MAX_CONCURRENT_EXPORTS", "3"),
                ("LOG_FILE_ENABLED", "false"),
            ]),
        );

        assert_eq!(config.backup.backup_dir, "/srv/backups");
        assert_eq!(config.auth.token_directory, ".drive");
        assert_eq!(config.auth.token_filename, "token.json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.backup.max_concurrent_exports, Some(3));
        assert!(!config.logging.file_enabled);
    }

    #[test]
    fn test_apply_overrides_ignores_unparseable_numbers() {
        let mut config = DriveBackupConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[("MAX_CONCURRENT_EXPORTS", "lots")]),
        );
        assert!(config.backup.max_concurrent_exports.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(Path::new("nonexistent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_config_file() {
        let toml_content = r#"
[backup]
backup_dir = "/var/backups/drive"
manifest_path = "jobs.json"
max_concurrent_exports = 2

[auth]
token_directory = ".credentials"
token_filename = "drive-backup.json"

[logging]
level = "warn"
file_enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = read_config_file(temp_file.path()).unwrap();
        assert_eq!(config.backup.backup_dir, "/var/backups/drive");
        assert_eq!(config.backup.manifest_path, "jobs.json");
        assert_eq!(config.backup.max_concurrent_exports, Some(2));
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file_enabled);
        assert_eq!(config.auth.client_secret_path, "client_secret.json");
    }
}
