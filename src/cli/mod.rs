//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for drive-backup using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// drive-backup - scheduled Google Drive document exports
#[derive(Parser, Debug)]
#[command(name = "drive-backup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "DRIVE_BACKUP_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute; `backup` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every document in the manifest to the backup directory
    Backup(commands::backup::BackupArgs),

    /// Run the one-time consent flow and store the token
    Authorize(commands::authorize::AuthorizeArgs),

    /// List files visible to the stored token
    ListFiles(commands::list_files::ListFilesArgs),

    /// Validate configuration, manifest and credential files
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_command() {
        let cli = Cli::parse_from(["drive-backup"]);
        assert!(cli.command.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_cli_parse_backup() {
        let cli = Cli::parse_from(["drive-backup", "backup"]);
        assert!(matches!(cli.command, Some(Commands::Backup(_))));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["drive-backup", "--config", "custom.toml", "backup"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["drive-backup", "--log-level", "info", "backup"]);
        assert_eq!(cli.log_level, Some("info".to_string()));
    }

    #[test]
    fn test_cli_parse_authorize() {
        let cli = Cli::parse_from(["drive-backup", "authorize", "--force"]);
        match cli.command {
            Some(Commands::Authorize(args)) => assert!(args.force),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list_files() {
        let cli = Cli::parse_from(["drive-backup", "list-files"]);
        match cli.command {
            Some(Commands::ListFiles(args)) => assert_eq!(args.page_size, 10),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["drive-backup", "validate-config"]);
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
    }
}
