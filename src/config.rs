//! Worksheet defaults and validator settings loaded from TOML.
//!
//! Example:
//!
//! ```toml
//! default_type = "times-tables"
//! default_difficulty = "easy"
//! default_count = 30
//! max_count = 100
//!
//! [validator]
//! samples = 50
//! min_distinct = 20
//! seed = "check"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::worksheet_engine::{
    generator::DEFAULT_MAX_COUNT, registry::DEFAULT_TYPE, validator::ValidatorConfig, Difficulty,
};

pub const CONFIG_PATH_ENV: &str = "WORKSHEET_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorksheetConfig {
    /// Type used when none is requested or the requested one is unknown.
    pub default_type: String,
    pub default_difficulty: Difficulty,
    pub default_count: usize,
    /// Larger requests are clamped to this.
    pub max_count: usize,
    pub validator: ValidatorConfig,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            default_type: DEFAULT_TYPE.into(),
            default_difficulty: Difficulty::Normal,
            default_count: 20,
            max_count: DEFAULT_MAX_COUNT,
            validator: ValidatorConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            ConfigError::Parse { path, source } => write!(f, "invalid config {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

pub fn parse_config(text: &str, path: &Path) -> Result<WorksheetConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

pub fn load_config(path: impl AsRef<Path>) -> Result<WorksheetConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    parse_config(&text, path)
}

/// Load from `WORKSHEET_CONFIG_PATH`. `None` when unset or on any error;
/// errors are logged.
pub fn load_config_from_env() -> Option<WorksheetConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).ok()?;
    match load_config(&path) {
        Ok(cfg) => {
            info!(target: "worksheet", %path, "Loaded worksheet config (TOML)");
            Some(cfg)
        }
        Err(e) => {
            error!(target: "worksheet", %path, error = %e, "Failed to load worksheet config");
            None
        }
    }
}
