//! Configuration management for datekit
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, MINUTES_PLACEHOLDER, XDG_CONFIG_FILE_NAME};
use crate::labels::{LabelPreset, Labels};
use crate::pattern::Pattern;
use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub labels: LabelsConfig,
    pub logging: LoggingConfig,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Timezone used for rendering and parsing
    /// Options: "local", "utc", or a fixed offset such as "+08:00"
    pub timezone: String,
    /// Pattern used by `datekit now` when none is given
    pub default_pattern: String,
}

/// Label configuration
///
/// A preset picks the base table; any field set here replaces the preset's
/// entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabelsConfig {
    pub preset: LabelPreset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<[String; 7]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub just_now: Option<String>,
    /// Template with a `{}` placeholder for the minute count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_ago: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yesterday: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable file logging
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

/// Resolved timezone setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezoneSetting {
    Local,
    Fixed(FixedOffset),
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            default_pattern: "yyyy.MM.dd HH:mm".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LabelsConfig {
    /// Build the label table: preset first, then per-field overrides
    pub fn resolve(&self) -> Labels {
        let mut labels = Labels::from_preset(self.preset);
        if let Some(weekdays) = &self.weekdays {
            labels.weekdays = weekdays.clone();
        }
        if let Some(just_now) = &self.just_now {
            labels.just_now = just_now.clone();
        }
        if let Some(minutes_ago) = &self.minutes_ago {
            labels.minutes_ago = minutes_ago.clone();
        }
        if let Some(yesterday) = &self.yesterday {
            labels.yesterday = yesterday.clone();
        }
        labels
    }
}

impl TimezoneSetting {
    /// Parse "local", "utc" or a fixed offset like "+08:00"
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Fixed(FixedOffset::east_opt(0).context("UTC offset out of range")?)),
            other => other
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", value, e)),
        }
    }
}

impl Config {
    /// Load the configuration for a run
    ///
    /// An explicit path must exist. Otherwise the first existing file among
    /// [`Config::search_paths`] is used, and defaults when there is none.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => {
                log::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Candidate files in lookup order: `$DATEKIT_CONFIG`, `./datekit.toml`,
    /// then `<config dir>/datekit/config.toml`
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            paths.push(PathBuf::from(env_path));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        if let Ok(path) = Self::get_default_config_path() {
            paths.push(path);
        }
        paths
    }

    /// Load, parse and validate one file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;

        if let Err(e) = Pattern::compile(&self.display.default_pattern) {
            anyhow::bail!("Invalid default_pattern '{}': {}", self.display.default_pattern, e);
        }

        if let Some(template) = &self.labels.minutes_ago {
            if !template.contains(MINUTES_PLACEHOLDER) {
                anyhow::bail!(
                    "labels.minutes_ago '{}' must contain the '{}' placeholder",
                    template,
                    MINUTES_PLACEHOLDER
                );
            }
        }

        if self.labels.weekdays.as_ref().is_some_and(|days| days.iter().any(String::is_empty)) {
            anyhow::bail!("labels.weekdays entries cannot be empty");
        }

        self.log_level()?;
        Ok(())
    }

    /// Resolved timezone setting
    pub fn timezone(&self) -> Result<TimezoneSetting> {
        TimezoneSetting::parse(&self.display.timezone)
    }

    /// Resolved label table
    pub fn labels(&self) -> Labels {
        self.labels.resolve()
    }

    /// Resolved log level filter
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        crate::logger::parse_level(&self.logging.level)
    }

    /// Write the default configuration, with a header comment, to `path`
    ///
    /// Missing parent directories are created. An existing file is left
    /// untouched and reported as an error.
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }

        let body = toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")?;
        let content = format!(
            "# datekit Configuration File\n# Generated on {}\n# Lookup order: ${}, ./{}, <config dir>/{}/{}\n\n{}",
            chrono::Local::now().format("%Y-%m-%d"),
            CONFIG_ENV_VAR,
            CONFIG_FILE_NAME,
            APP_DIR_NAME,
            XDG_CONFIG_FILE_NAME,
            body
        );

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        std::fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;
        log::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(XDG_CONFIG_FILE_NAME))
    }
}
