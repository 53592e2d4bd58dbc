//! Scenario comparison — structured delta between two completed
//! projections over the same entity universe.

use pleito_core::config::TrendConfig;
use pleito_core::errors::MismatchError;
use pleito_core::types::{ComparisonResult, EntityDelta, ProjectionResult, Trend};

/// Computes per-entity before/after deltas.
pub struct ScenarioComparator<'a> {
    config: &'a TrendConfig,
}

impl<'a> ScenarioComparator<'a> {
    pub fn new(config: &'a TrendConfig) -> Self {
        Self { config }
    }

    /// Compare two projections labelled "before" and "after".
    ///
    /// Both results keep their rows sorted by entity id, so a pairwise
    /// walk is enough to detect any universe mismatch.
    pub fn compare(
        &self,
        before: &ProjectionResult,
        after: &ProjectionResult,
    ) -> Result<ComparisonResult, MismatchError> {
        if before.entities.len() != after.entities.len() {
            return Err(MismatchError::SizeMismatch {
                left: before.entities.len(),
                right: after.entities.len(),
            });
        }

        let mut deltas = Vec::with_capacity(before.entities.len());
        for (b, a) in before.entities.iter().zip(&after.entities) {
            if b.entity != a.entity {
                // The first id where the sorted rows disagree is
                // present in only one universe.
                let entity = if b.entity < a.entity {
                    b.entity.clone()
                } else {
                    a.entity.clone()
                };
                return Err(MismatchError::MissingEntity { entity });
            }
            let change = a.point_estimate - b.point_estimate;
            deltas.push(EntityDelta {
                entity: b.entity.clone(),
                before: b.point_estimate,
                after: a.point_estimate,
                change,
                trend: Trend::from_delta(change, self.config.epsilon),
            });
        }

        Ok(ComparisonResult { deltas })
    }
}
