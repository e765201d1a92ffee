//! Error types for tuning data loading.

use thiserror::Error;

/// Errors that can occur when loading or validating the tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Tuning file not found: {0}")]
    FileNotFound(String),

    /// The file exists but reading it failed (permissions, encoding).
    #[error("Could not read tuning file '{path}': {details}")]
    ReadError { path: String, details: String },

    #[error("Malformed tuning in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A value parsed fine but makes no sense for the game.
    #[error("Tuning value '{field}' {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
