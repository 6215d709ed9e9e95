use clap::Parser;
use drive_backup::cli::commands::backup::BackupArgs;
use drive_backup::cli::{Cli, Commands};
use drive_backup::config::{resolve_config, DriveBackupConfig};
use drive_backup::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2); // Configuration error exit code
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    // Keep the guard alive so the file sink is flushed on exit
    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "drive-backup - Google Drive document backup"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &DriveBackupConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Backup(args)) => args.execute(config).await,
        Some(Commands::Authorize(args)) => args.execute(config).await,
        Some(Commands::ListFiles(args)) => args.execute(config).await,
        Some(Commands::ValidateConfig(args)) => {
            args.execute(cli.config.as_deref().map(Path::new)).await
        }
        None => BackupArgs::default().execute(config).await,
    }
}
