//! Logging setup
//!
//! Library code logs through the `log` macros. The binary installs a `fern`
//! dispatcher: with logging enabled, records at the configured level go to
//! `datekit.log` in the platform data directory; otherwise only warnings and
//! errors reach stderr.

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Install the global logger
///
/// Returns the log file path when file logging is enabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let path = if config.enabled {
        let path = get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        Some(path)
    } else {
        None
    };

    dispatch(config, path.as_deref())?
        .apply()
        .context("Failed to install logger")?;

    if let Some(path) = &path {
        log::info!("Logging to {}", path.display());
    }
    Ok(path)
}

/// Build the dispatcher without installing it
pub fn dispatch(config: &LoggingConfig, file: Option<&Path>) -> Result<fern::Dispatch> {
    let base = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{} {} {}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            message
        ))
    });

    let dispatch = match file {
        Some(path) => {
            let level = parse_level(&config.level)?;
            let log_file =
                fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            base.level(level).chain(log_file)
        }
        None => base.level(LevelFilter::Warn).chain(std::io::stderr()),
    };
    Ok(dispatch)
}

/// Parse a level name such as "info" or "DEBUG"
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", level))
}

/// Get the log file path in the platform data directory
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}
