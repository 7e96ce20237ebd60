//! # Home Energy Audit Validation Library
//!
//! Cross-field validation and derivation engine for home energy audit
//! records, including:
//! - Flat and nested record front ends (`address`)
//! - Derived building geometry (`derive`)
//! - Per-field rule registry (`rules`)
//! - Conditionally required fields (`required`)
//! - Severity-bucketed results (`result`)
//! - Configuration loading (`config`)

pub mod address;
pub mod checks;
pub mod config;
pub mod derive;
pub mod engine;
pub mod error;
pub mod field;
pub mod record;
pub mod required;
pub mod result;
pub mod rules;
pub mod tables;

pub use address::Mode;
pub use config::ValidatorConfig;
pub use engine::Validator;
pub use error::{Error, Result};
pub use result::{ResultSet, Severity};

/// Validate a record with the configuration resolved from the environment
pub fn validate(input: &serde_json::Value) -> ResultSet {
    Validator::new(ValidatorConfig::resolve()).validate(input)
}
