//! Configuration errors.

use super::error_code::{self, PleitoErrorCode};

/// Errors while loading or validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl PleitoErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
