//! Validator configuration loading and resolution
//!
//! Configuration file location follows this priority order:
//! 1. `HEAUDIT_CONFIG` environment variable
//! 2. User config directory (`~/.config/heaudit/config.toml` on Linux)
//! 3. System config file (`/etc/heaudit/config.toml`, Linux only)
//! 4. Compiled defaults
//!
//! A missing file is not an error. An unreadable or malformed file is logged
//! and the compiled defaults are used instead.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::checks::Interval;
use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "HEAUDIT_CONFIG";

/// Area bound set applied to roof, ceiling and floor areas
///
/// The two sets are never merged; one is active per validator and applies to
/// flat and nested records alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaBounds {
    /// `[1, 25000]` inclusive
    Legacy,
    /// `[4, 25000)`
    #[default]
    Schema,
}

impl AreaBounds {
    pub fn range(self) -> (f64, f64, Interval) {
        match self {
            AreaBounds::Legacy => (1.0, 25000.0, Interval::Closed),
            AreaBounds::Schema => (4.0, 25000.0, Interval::HalfOpen),
        }
    }
}

/// Logging section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Validator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Fixed upper bound for installation years; defaults to the local year
    pub current_year: Option<i32>,
    /// Fixed "today" for assessment-date checks; defaults to the local date
    pub today: Option<NaiveDate>,
    /// Area bound set for every record, whatever its addressing mode
    pub area_bounds: AreaBounds,
    pub logging: LoggingConfig,
}

/// Date snapshot taken once per validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub today: NaiveDate,
    pub current_year: i64,
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ValidatorConfig = toml::from_str(&content)?;
        if let (Some(year), Some(today)) = (config.current_year, config.today) {
            if i64::from(year) < i64::from(today.year()) {
                return Err(Error::Config(format!(
                    "current_year {} precedes today ({})",
                    year, today
                )));
            }
        }
        Ok(config)
    }

    /// Resolve configuration using the priority order in the module docs
    pub fn resolve() -> Self {
        let Some(path) = resolve_config_path(CONFIG_ENV_VAR) else {
            debug!("No config file found, using compiled defaults");
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Snapshot the dates this configuration validates against
    pub fn clock(&self) -> Clock {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let current_year = self
            .current_year
            .map(i64::from)
            .unwrap_or_else(|| i64::from(today.year()));
        Clock { today, current_year }
    }
}

/// Locate the config file, highest priority first
///
/// The environment variable wins even when the file it names is missing, so
/// that a typo surfaces as a load warning instead of silently picking another
/// file.
pub fn resolve_config_path(env_var_name: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    if let Some(user_config) = dirs::config_dir().map(|d| d.join("heaudit").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/heaudit/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
