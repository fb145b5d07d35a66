use anyhow::{Context, Result};
use std::env;

use morsalink_logging::{get_logs_dir, RequestLogger};

use crate::cli::Cli;
use crate::config::{AppConfig, FileConfig};

/// Build the application configuration from CLI flags, environment and the
/// optional config file.
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let work_dir = env::current_dir().context("Failed to get current directory")?;

    let (file, path) = FileConfig::discover(cli.config.as_deref(), &work_dir)?;
    if let Some(path) = &path {
        log::info!("Loaded config from {}", path.display());
    }

    let logs_dir = if cli.log_requests {
        let dir = get_logs_dir()?;
        log::info!("Logging upstream requests to {}", dir.display());
        Some(dir)
    } else {
        None
    };
    let logger = RequestLogger::new(cli.verbose, logs_dir);

    let config = AppConfig::resolve(cli, file, logger)?;
    log::debug!("Resolved configuration: {:?}", config.chat);

    Ok(config)
}
