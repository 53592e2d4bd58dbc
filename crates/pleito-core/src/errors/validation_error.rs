//! Request validation errors.
//!
//! Every variant is detected before any sampling begins and surfaced
//! verbatim to the caller — validation failures are never retried.

use super::error_code::{self, PleitoErrorCode};
use crate::types::EntityId;

/// Malformed or inconsistent request contents.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Entity universe is empty")]
    EmptyUniverse,

    #[error("Duplicate entity {entity} in universe")]
    DuplicateEntity { entity: EntityId },

    #[error("Channel weights are all zero or not normalizable")]
    ZeroWeights,

    #[error("Iteration count must be positive")]
    NonPositiveIterations,

    #[error("Confidence level {value} outside (0, 1)")]
    ConfidenceOutOfRange { value: f64 },

    #[error("Share {value} for {entity} outside [0, 1]")]
    ShareOutOfRange { entity: EntityId, value: f64 },

    #[error("Adjustment delta {value} for {entity} outside [-1, 1]")]
    DeltaOutOfRange { entity: EntityId, value: f64 },

    #[error("Magnitude {value} outside [0, 1] for factor \"{description}\"")]
    MagnitudeOutOfRange { description: String, value: f64 },

    #[error("Baseline shares for year {year} sum to {sum}, above 1")]
    BaselineOverflow { year: i32, sum: f64 },

    #[error("Non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

impl PleitoErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
