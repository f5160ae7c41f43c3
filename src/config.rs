//! Optional user configuration.
//!
//! Stored as TOML at `~/.config/ssi/config.toml` (or the platform
//! equivalent); the `SSI_CONFIG` environment variable overrides the path.
//! A missing file is not an error — everything has a default.
//!
//! # Example
//!
//! ```toml
//! dataset = "/data/global-superstore.xls"
//! default_level = "sub-category"
//! default_regions = ["East", "West"]
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analytics::{DetailLevel, ParseLevelError};

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Level(#[from] ParseLevelError),
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsiConfig {
    /// Default dataset path, used when `--data` is not given.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Default profitability level; must name one of the three levels.
    #[serde(default)]
    pub default_level: Option<String>,

    /// Default region filter for seasonality; empty means every region.
    #[serde(default)]
    pub default_regions: Vec<String>,
}

impl SsiConfig {
    /// Resolve the config file path: `SSI_CONFIG` wins, then the platform
    /// config directory.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("SSI_CONFIG") {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "ssi").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                let text = std::fs::read_to_string(&path)?;
                let config: Self = toml::from_str(&text)?;
                // Validate eagerly so a typo fails at startup, not mid-report.
                config.level()?;
                Ok(config)
            }
            _ => Ok(Self::default()),
        }
    }

    /// The configured default level, or [`DetailLevel::Category`] when unset.
    pub fn level(&self) -> Result<DetailLevel, ParseLevelError> {
        match &self.default_level {
            Some(raw) => raw.parse(),
            None => Ok(DetailLevel::default()),
        }
    }
}
