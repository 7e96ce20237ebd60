//! Support code for the `heaudit` command
//!
//! Kept separate from `main.rs` so the integration tests can drive the same
//! code paths without spawning a process.

use anyhow::{Context, Result};
use heaudit_common::config::{resolve_config_path, CONFIG_ENV_VAR};
use heaudit_common::{Validator, ValidatorConfig};

/// Exit status for an argument that is not valid JSON
pub const EXIT_BAD_INPUT: u8 = 2;

/// Exit status for any other failure
pub const EXIT_FAILURE: u8 = 1;

/// Build identification captured by `build.rs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "heaudit v{} [{}] built {} ({})",
            self.version, self.git_hash, self.build_timestamp, self.build_profile
        )
    }
}

/// Load configuration before logging is up
///
/// Same priority order as [`ValidatorConfig::resolve`], but a load failure is
/// handed back as text so it can be logged once the subscriber exists.
pub fn load_config() -> (ValidatorConfig, Option<String>) {
    let Some(path) = resolve_config_path(CONFIG_ENV_VAR) else {
        return (ValidatorConfig::default(), None);
    };
    match ValidatorConfig::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (
            ValidatorConfig::default(),
            Some(format!("Ignoring config file {}: {}", path.display(), e)),
        ),
    }
}

/// Validate one record given as JSON text and render the result as JSON
pub fn run(validator: &Validator, text: &str) -> Result<String> {
    let result = validator
        .validate_json(text)
        .context("Record argument is not valid JSON")?;
    serde_json::to_string(&result).context("Failed to render the validation result")
}

/// Process exit status for a failed [`run`]: [`EXIT_BAD_INPUT`] when the text
/// did not parse, [`EXIT_FAILURE`] otherwise
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if error.downcast_ref::<heaudit_common::Error>().is_some() {
        EXIT_BAD_INPUT
    } else {
        EXIT_FAILURE
    }
}
