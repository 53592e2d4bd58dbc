//! Seat apportionment errors.

use super::error_code::{self, PleitoErrorCode};
use crate::types::EntityId;

/// Errors from the highest-quotient seat allocator.
///
/// Degenerate but meaningful inputs (everyone below the viability
/// threshold, an all-zero vector) are handled by fallback rules and do
/// not error.
#[derive(Debug, thiserror::Error)]
pub enum ApportionmentError {
    #[error("Empty vote-share vector")]
    EmptyShares,

    #[error("Vote shares sum to {sum}, expected 1 within {tolerance}")]
    UnnormalizedShares { sum: f64, tolerance: f64 },

    #[error("Non-finite share {value} for {entity}")]
    NonFiniteShare { entity: EntityId, value: f64 },
}

impl PleitoErrorCode for ApportionmentError {
    fn error_code(&self) -> &'static str {
        error_code::APPORTIONMENT_ERROR
    }
}
