//! Top-level engine errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, PleitoErrorCode};
use super::{ApportionmentError, ConfigError, MismatchError, ValidationError};
use crate::types::JobStatus;

/// Errors that can terminate an engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Apportionment error: {0}")]
    Apportionment(#[from] ApportionmentError),

    #[error("Mismatch error: {0}")]
    Mismatch(#[from] MismatchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Projection cancelled")]
    Cancelled,

    #[error("Internal numerical failure: {message}")]
    Internal { message: String },
}

impl EngineError {
    /// The caller-visible job status this error maps to.
    pub fn status(&self) -> JobStatus {
        match self {
            Self::Cancelled => JobStatus::Cancelled,
            _ => JobStatus::Failed,
        }
    }
}

impl PleitoErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Apportionment(e) => e.error_code(),
            Self::Mismatch(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
            Self::Internal { .. } => error_code::INTERNAL_ERROR,
        }
    }
}
