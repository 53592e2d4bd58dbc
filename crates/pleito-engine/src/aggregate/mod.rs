//! Input aggregation — polls, history, adjustments, and external
//! factors blended into one base vote-share distribution.
//!
//! Channel blending follows the configured weights; analyst adjustments
//! and external-factor effects are additive after blending, never
//! blended themselves.

use rustc_hash::{FxHashMap, FxHashSet};

use pleito_core::config::EngineConfig;
use pleito_core::errors::ValidationError;
use pleito_core::types::{EntityId, ProjectionRequest};

/// Blended (mean, variance) pair for one entity, plus the baseline
/// share retained for trend classification downstream.
#[derive(Debug, Clone)]
pub struct EntityBase {
    pub entity: EntityId,
    /// Blended and adjusted share, in [0, 1].
    pub mean: f64,
    /// Dispersion across poll samples, floored by config.
    pub variance: f64,
    /// Historical share this entity is measured against.
    pub baseline: f64,
}

/// Base vote-share distribution over the entity universe.
///
/// `entities` is sorted by id. `others` is the residual share held by
/// entities outside the universe; it absorbs rounding during
/// renormalization and never competes for seats.
#[derive(Debug, Clone)]
pub struct BaseDistribution {
    pub entities: Vec<EntityBase>,
    pub others: f64,
}

impl BaseDistribution {
    /// Columns in an ensemble row: one per entity plus the residual.
    pub fn width(&self) -> usize {
        self.entities.len() + 1
    }
}

/// Merges all input channels into one [`BaseDistribution`].
pub struct InputAggregator<'a> {
    config: &'a EngineConfig,
}

impl<'a> InputAggregator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Validate the request and produce the base distribution.
    ///
    /// Validation runs before any arithmetic; a malformed request never
    /// reaches the sampler.
    pub fn aggregate(
        &self,
        request: &ProjectionRequest,
    ) -> Result<BaseDistribution, ValidationError> {
        validate_request(request)?;

        let (weights, renormalized) = request
            .weights
            .normalized()
            .ok_or(ValidationError::ZeroWeights)?;
        if renormalized {
            tracing::warn!(
                target: "pleito::aggregate",
                sum = request.weights.sum(),
                "channel weights did not sum to 1; renormalized"
            );
        }

        let mut ids: Vec<EntityId> = request.entities.clone();
        ids.sort();
        let index: FxHashMap<&EntityId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let n = ids.len();

        // Poll channel: collect each entity's sample shares.
        let mut poll_shares: Vec<Vec<f64>> = vec![Vec::new(); n];
        for poll in &request.polls {
            match index.get(&poll.entity) {
                Some(&i) => poll_shares[i].push(poll.share),
                None => tracing::debug!(
                    target: "pleito::aggregate",
                    entity = %poll.entity,
                    "poll sample for entity outside the universe; ignored"
                ),
            }
        }

        // History channel: shares for the selected baseline year.
        let baseline = select_baseline(request);

        // Adjustment deltas and external-factor effects, accumulated
        // per entity.
        let mut offsets = vec![0.0f64; n];
        for adjustment in &request.adjustments {
            if let Some(&i) = index.get(&adjustment.entity) {
                offsets[i] += adjustment.delta;
            }
        }
        for factor in &request.factors {
            let effect = factor.signed_effect(self.config.factors.retention(factor.duration));
            for affected in &factor.affected {
                if let Some(&i) = index.get(affected) {
                    offsets[i] += effect;
                }
            }
        }

        let floor = self.config.sampling.min_variance_floor;
        let mut entities = Vec::with_capacity(n);
        for (i, id) in ids.iter().enumerate() {
            let samples = &poll_shares[i];
            let historical = baseline.get(id).copied().unwrap_or(0.0);

            let blended = if samples.is_empty() {
                // No poll channel for this entity: its weight is
                // redistributed proportionally across the remaining
                // channels. The adjustment channel blends zero mass,
                // so only the history share survives.
                let rest = weights.history + weights.adjustment;
                if rest > 0.0 {
                    (weights.history / rest) * historical
                } else {
                    0.0
                }
            } else {
                weights.poll * mean(samples) + weights.history * historical
            };

            let adjusted = (blended + offsets[i]).clamp(0.0, 1.0);
            let variance = if samples.len() >= 2 {
                sample_variance(samples).max(floor)
            } else {
                floor
            };

            entities.push(EntityBase {
                entity: id.clone(),
                mean: adjusted,
                variance,
                baseline: historical,
            });
        }

        // Renormalize the universe: scale down an overflowing sum, or
        // hand the remainder to the residual bucket.
        let sum: f64 = entities.iter().map(|e| e.mean).sum();
        let others = if sum > 1.0 {
            let scale = 1.0 / sum;
            for entity in &mut entities {
                entity.mean *= scale;
            }
            0.0
        } else {
            1.0 - sum
        };

        tracing::debug!(
            target: "pleito::aggregate",
            entities = entities.len(),
            others,
            "base distribution ready"
        );

        Ok(BaseDistribution { entities, others })
    }
}

/// Validate a projection request. Every failure here is surfaced
/// verbatim and never retried.
pub fn validate_request(request: &ProjectionRequest) -> Result<(), ValidationError> {
    if request.entities.is_empty() {
        return Err(ValidationError::EmptyUniverse);
    }
    let mut seen = FxHashSet::default();
    for entity in &request.entities {
        if !seen.insert(entity) {
            return Err(ValidationError::DuplicateEntity {
                entity: entity.clone(),
            });
        }
    }
    if request.iterations == 0 {
        return Err(ValidationError::NonPositiveIterations);
    }
    if !request.confidence_level.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "confidence_level",
            value: request.confidence_level,
        });
    }
    if !(0.0 < request.confidence_level && request.confidence_level < 1.0) {
        return Err(ValidationError::ConfidenceOutOfRange {
            value: request.confidence_level,
        });
    }
    if request.weights.normalized().is_none() {
        return Err(ValidationError::ZeroWeights);
    }

    for poll in &request.polls {
        if !poll.share.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "poll.share",
                value: poll.share,
            });
        }
        if !(0.0..=1.0).contains(&poll.share) {
            return Err(ValidationError::ShareOutOfRange {
                entity: poll.entity.clone(),
                value: poll.share,
            });
        }
    }

    let mut year_sums: FxHashMap<i32, f64> = FxHashMap::default();
    for result in &request.baseline {
        if !result.share.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "baseline.share",
                value: result.share,
            });
        }
        if !(0.0..=1.0).contains(&result.share) {
            return Err(ValidationError::ShareOutOfRange {
                entity: result.entity.clone(),
                value: result.share,
            });
        }
        *year_sums.entry(result.year).or_insert(0.0) += result.share;
    }
    for (year, sum) in year_sums {
        if sum > 1.0 + 1e-9 {
            return Err(ValidationError::BaselineOverflow { year, sum });
        }
    }

    for adjustment in &request.adjustments {
        if !adjustment.delta.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "adjustment.delta",
                value: adjustment.delta,
            });
        }
        if !(-1.0..=1.0).contains(&adjustment.delta) {
            return Err(ValidationError::DeltaOutOfRange {
                entity: adjustment.entity.clone(),
                value: adjustment.delta,
            });
        }
    }

    for factor in &request.factors {
        if !factor.magnitude.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "factor.magnitude",
                value: factor.magnitude,
            });
        }
        if !(0.0..=1.0).contains(&factor.magnitude) {
            return Err(ValidationError::MagnitudeOutOfRange {
                description: factor.description.clone(),
                value: factor.magnitude,
            });
        }
    }

    Ok(())
}

/// Pick the baseline year (explicit `base_year`, or the most recent
/// year present) and map entity → share for it.
fn select_baseline(request: &ProjectionRequest) -> FxHashMap<EntityId, f64> {
    let year = match request.scope.base_year {
        Some(year) => Some(year),
        None => request.baseline.iter().map(|r| r.year).max(),
    };
    let mut map = FxHashMap::default();
    if let Some(year) = year {
        for result in &request.baseline {
            if result.year == year {
                map.insert(result.entity.clone(), result.share);
            }
        }
    }
    map
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Unbiased sample variance (n − 1 denominator).
fn sample_variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (xs.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use pleito_core::types::{
        AdjustmentSpec, ExternalFactor, HistoricalResult, ImpactDuration, Office, Polarity,
        PollSample, Scope, SimulationKind, WeightConfig,
    };

    use super::*;

    fn base_request(entities: &[&str]) -> ProjectionRequest {
        ProjectionRequest {
            scope: Scope {
                office: Office::FederalDeputy,
                state: Some("SP".into()),
                target_year: 2026,
                base_year: Some(2022),
            },
            kind: SimulationKind::Prediction,
            weights: WeightConfig {
                poll: 0.3,
                history: 0.5,
                adjustment: 0.2,
            },
            iterations: 1000,
            confidence_level: 0.95,
            total_seats: 10,
            entities: entities.iter().map(|&e| EntityId::from(e)).collect(),
            polls: vec![],
            baseline: vec![],
            adjustments: vec![],
            factors: vec![],
            seed: 1,
        }
    }

    #[test]
    fn test_blended_mean_matches_hand_computation() {
        // poll 0.3 * 0.40 + history 0.5 * 0.35 + adjustment 0.2 * 0
        // - 0.05 = 0.245
        let mut request = base_request(&["X"]);
        request.polls = vec![PollSample {
            entity: EntityId::from("X"),
            share: 0.40,
            source: "institute-a".into(),
        }];
        request.baseline = vec![HistoricalResult {
            entity: EntityId::from("X"),
            share: 0.35,
            year: 2022,
        }];
        request.adjustments = vec![AdjustmentSpec {
            entity: EntityId::from("X"),
            delta: -0.05,
            rationale: "coalition split".into(),
        }];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();

        assert!((base.entities[0].mean - 0.245).abs() < 1e-12);
        assert!((base.others - 0.755).abs() < 1e-12);
    }

    #[test]
    fn test_no_polls_redistributes_channel_weight() {
        // Without polls, history carries history/(history+adjustment)
        // of the mass: 0.5 / 0.7 * 0.35 = 0.25.
        let mut request = base_request(&["X"]);
        request.baseline = vec![HistoricalResult {
            entity: EntityId::from("X"),
            share: 0.35,
            year: 2022,
        }];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();

        assert!((base.entities[0].mean - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_factor_effect_scaled_by_duration_retention() {
        let mut request = base_request(&["X"]);
        request.factors = vec![ExternalFactor {
            description: "televised debate win".into(),
            polarity: Polarity::Positive,
            magnitude: 0.10,
            duration: ImpactDuration::ShortTerm,
            affected: vec![EntityId::from("X")],
        }];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();

        // Default short-term retention is 0.35.
        assert!((base.entities[0].mean - 0.035).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_gets_variance_floor() {
        let mut request = base_request(&["X", "Y"]);
        request.polls = vec![
            PollSample {
                entity: EntityId::from("X"),
                share: 0.30,
                source: "a".into(),
            },
            PollSample {
                entity: EntityId::from("Y"),
                share: 0.20,
                source: "a".into(),
            },
            PollSample {
                entity: EntityId::from("Y"),
                share: 0.40,
                source: "b".into(),
            },
        ];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();

        let x = &base.entities[0];
        let y = &base.entities[1];
        assert_eq!(x.variance, config.sampling.min_variance_floor);
        // Two samples at 0.20/0.40: sample variance 0.02.
        assert!((y.variance - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_means_scaled_back_to_one() {
        let mut request = base_request(&["X", "Y"]);
        request.weights = WeightConfig {
            poll: 1.0,
            history: 0.0,
            adjustment: 0.0,
        };
        request.polls = vec![
            PollSample {
                entity: EntityId::from("X"),
                share: 0.8,
                source: "a".into(),
            },
            PollSample {
                entity: EntityId::from("Y"),
                share: 0.6,
                source: "a".into(),
            },
        ];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();

        let sum: f64 = base.entities.iter().map(|e| e.mean).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(base.others, 0.0);
    }

    #[test]
    fn test_empty_universe_rejected() {
        let request = base_request(&[]);
        let config = EngineConfig::default();
        let err = InputAggregator::new(&config).aggregate(&request).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyUniverse));
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let request = base_request(&["X", "X"]);
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateEntity { .. }));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut request = base_request(&["X"]);
        request.weights = WeightConfig {
            poll: 0.0,
            history: 0.0,
            adjustment: 0.0,
        };
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ValidationError::ZeroWeights));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut request = base_request(&["X"]);
        request.iterations = 0;
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveIterations));
    }

    #[test]
    fn test_confidence_level_bounds_rejected() {
        for bad in [0.0, 1.0, -0.5, 1.7] {
            let mut request = base_request(&["X"]);
            request.confidence_level = bad;
            let err = validate_request(&request).unwrap_err();
            assert!(matches!(err, ValidationError::ConfidenceOutOfRange { .. }));
        }
    }

    #[test]
    fn test_baseline_overflow_rejected() {
        let mut request = base_request(&["X", "Y"]);
        request.baseline = vec![
            HistoricalResult {
                entity: EntityId::from("X"),
                share: 0.7,
                year: 2022,
            },
            HistoricalResult {
                entity: EntityId::from("Y"),
                share: 0.6,
                year: 2022,
            },
        ];
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ValidationError::BaselineOverflow { .. }));
    }

    #[test]
    fn test_latest_year_selected_without_base_year() {
        let mut request = base_request(&["X"]);
        request.scope.base_year = None;
        request.baseline = vec![
            HistoricalResult {
                entity: EntityId::from("X"),
                share: 0.20,
                year: 2018,
            },
            HistoricalResult {
                entity: EntityId::from("X"),
                share: 0.30,
                year: 2022,
            },
        ];

        let config = EngineConfig::default();
        let base = InputAggregator::new(&config).aggregate(&request).unwrap();
        assert!((base.entities[0].baseline - 0.30).abs() < 1e-12);
    }
}
