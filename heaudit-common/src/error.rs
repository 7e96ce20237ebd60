//! Common error types for heaudit
//!
//! Validation outcomes are never errors: blockers, errors and mandatory
//! omissions are data in a [`ResultSet`](crate::result::ResultSet). The
//! variants here cover the operational failures around a validation call.

use thiserror::Error;

/// Common result type for heaudit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Operational error types
#[derive(Error, Debug)]
pub enum Error {
    /// Input text was not valid JSON (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
