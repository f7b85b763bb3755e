//! Configuration loading and representation.
//!
//! Layering, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. optional JSON file
//! 3. environment (`BOARDSTOCK_WARNING_THRESHOLD`, `BOARDSTOCK_WARNINGS_ENABLED`)
//! 4. explicit overrides from the caller (command-line flags)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use boardstock_core::DomainError;
use boardstock_inventory::WarningSettings;

pub const ENV_WARNING_THRESHOLD: &str = "BOARDSTOCK_WARNING_THRESHOLD";
pub const ENV_WARNINGS_ENABLED: &str = "BOARDSTOCK_WARNINGS_ENABLED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Startup configuration of a yard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    pub warnings: WarningSettings,
    /// Start with the demonstration warehouses instead of an empty yard.
    pub seed_demo_stock: bool,
}

impl Default for YardConfig {
    fn default() -> Self {
        Self {
            warnings: WarningSettings::default(),
            seed_demo_stock: true,
        }
    }
}

impl YardConfig {
    /// Defaults, then the file (if any), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_WARNING_THRESHOLD) {
            self.warnings.threshold = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_WARNING_THRESHOLD,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_WARNINGS_ENABLED) {
            self.warnings.enabled = parse_switch(&value).ok_or_else(|| ConfigError::Env {
                var: ENV_WARNINGS_ENABLED,
                value: value.clone(),
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.warnings.validate()?;
        Ok(())
    }
}

/// Parse an on/off style switch.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
