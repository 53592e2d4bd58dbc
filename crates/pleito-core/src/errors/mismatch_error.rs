//! Scenario comparison errors.

use super::error_code::{self, PleitoErrorCode};
use crate::types::EntityId;

/// Comparison attempted across incompatible entity universes.
#[derive(Debug, thiserror::Error)]
pub enum MismatchError {
    #[error("Entity universes differ in size: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Entity {entity} present in only one projection")]
    MissingEntity { entity: EntityId },
}

impl PleitoErrorCode for MismatchError {
    fn error_code(&self) -> &'static str {
        error_code::MISMATCH_ERROR
    }
}
