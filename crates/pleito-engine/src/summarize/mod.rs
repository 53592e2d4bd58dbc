//! Ensemble summarization — point estimates, empirical confidence
//! intervals, seat projection, and trend labels.

use pleito_core::config::EngineConfig;
use pleito_core::errors::EngineError;
use pleito_core::types::{EntityProjection, ProjectionResult, Trend};

use crate::aggregate::BaseDistribution;
use crate::apportion::SeatApportioner;
use crate::sample::ProjectionEnsemble;

/// Reduces an ensemble into a [`ProjectionResult`].
pub struct ProjectionSummarizer<'a> {
    config: &'a EngineConfig,
}

impl<'a> ProjectionSummarizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Summarize the ensemble at `confidence_level`.
    ///
    /// Bounds are non-parametric empirical percentiles. Seats derive
    /// once from the point-estimate vector, not from per-iteration
    /// apportionment.
    pub fn summarize(
        &self,
        ensemble: &ProjectionEnsemble,
        base: &BaseDistribution,
        confidence_level: f64,
        total_seats: u32,
    ) -> Result<ProjectionResult, EngineError> {
        let n = ensemble.entity_ids().len();
        let low_q = (1.0 - confidence_level) / 2.0;
        let high_q = 1.0 - low_q;

        let mut points = Vec::with_capacity(n);
        let mut bounds = Vec::with_capacity(n);
        for col in 0..n {
            let point = ensemble.column_mean(col);
            if !point.is_finite() {
                return Err(EngineError::Internal {
                    message: format!("non-finite point estimate in column {col}"),
                });
            }
            let sorted = ensemble.column_sorted(col);
            // Bounds widen to include the mean so the reported point
            // never escapes its own interval.
            let low = percentile(&sorted, low_q).min(point);
            let high = percentile(&sorted, high_q).max(point);
            points.push(point);
            bounds.push((low, high));
        }

        // Renormalize the point-estimate vector before apportionment;
        // column means of unit rows are only unit-sum up to rounding.
        let others_point = ensemble.column_mean(n);
        let total: f64 = points.iter().sum::<f64>() + others_point;
        if total <= 0.0 || !total.is_finite() {
            return Err(EngineError::Internal {
                message: format!("degenerate point-estimate mass {total}"),
            });
        }
        let shares: Vec<_> = ensemble
            .entity_ids()
            .iter()
            .zip(&points)
            .map(|(id, &p)| (id.clone(), p / total))
            .collect();
        let seats = SeatApportioner::new(&self.config.apportionment).apportion(
            &shares,
            others_point / total,
            total_seats,
        )?;

        let epsilon = self.config.trend.epsilon;
        let entities = ensemble
            .entity_ids()
            .iter()
            .enumerate()
            .map(|(i, id)| EntityProjection {
                entity: id.clone(),
                point_estimate: points[i],
                low: bounds[i].0,
                high: bounds[i].1,
                seats: seats[i],
                trend: Trend::from_delta(points[i] - base.entities[i].baseline, epsilon),
            })
            .collect();

        Ok(ProjectionResult {
            entities,
            iterations: ensemble.iterations() as u32,
            confidence_level,
        })
    }
}

/// Overall confidence scalar for a summarized projection:
/// 1 − mean confidence interval width, clamped to [0, 1].
pub fn overall_confidence(result: &ProjectionResult) -> f64 {
    if result.entities.is_empty() {
        return 0.0;
    }
    let mean_width: f64 = result
        .entities
        .iter()
        .map(|e| e.high - e.low)
        .sum::<f64>()
        / result.entities.len() as f64;
    (1.0 - mean_width).clamp(0.0, 1.0)
}

/// Nearest-rank percentile of a sorted slice, `q` in [0, 1].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (q * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
