//! Projection request payload — the engine's single input.

use serde::{Deserialize, Serialize};

use super::entities::{
    AdjustmentSpec, EntityId, ExternalFactor, HistoricalResult, PollSample,
};

/// Relative trust in each input channel.
///
/// The three weights are renormalized to sum 1 before use; a config
/// that needs renormalization is accepted with a warning, but all-zero
/// weights are rejected during validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightConfig {
    pub poll: f64,
    pub history: f64,
    pub adjustment: f64,
}

impl WeightConfig {
    pub fn sum(&self) -> f64 {
        self.poll + self.history + self.adjustment
    }

    /// Renormalized copy summing to 1, plus whether renormalization was
    /// actually needed. Returns `None` when the weights cannot be
    /// normalized (all zero, negative, or non-finite).
    pub fn normalized(&self) -> Option<(WeightConfig, bool)> {
        let sum = self.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return None;
        }
        if self.poll < 0.0 || self.history < 0.0 || self.adjustment < 0.0 {
            return None;
        }
        let needed = (sum - 1.0).abs() > 1e-9;
        Some((
            WeightConfig {
                poll: self.poll / sum,
                history: self.history / sum,
                adjustment: self.adjustment / sum,
            },
            needed,
        ))
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            poll: 0.5,
            history: 0.3,
            adjustment: 0.2,
        }
    }
}

/// Proportional offices the engine projects.
///
/// Majoritarian races (president, senator, mayor) are out of scope —
/// they have no party-list seat apportionment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Office {
    FederalDeputy,
    StateDeputy,
    CityCouncilor,
}

impl Office {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FederalDeputy => "federal_deputy",
            Self::StateDeputy => "state_deputy",
            Self::CityCouncilor => "city_councilor",
        }
    }
}

impl std::fmt::Display for Office {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Electoral scope of one projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub office: Office,
    /// Two-letter state code (`"SP"`, `"BA"`); `None` for nationwide runs.
    pub state: Option<String>,
    pub target_year: i32,
    /// Baseline election year. `None` selects the most recent year
    /// present in the historical results.
    pub base_year: Option<i32>,
}

/// Simulation variant. Dispatch over this enum is exhaustive — adding
/// a variant is a compile error at every match site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    Prediction,
    Comparison,
    EventImpact,
    WhatIf,
}

impl SimulationKind {
    /// All simulation kinds.
    pub const ALL: &'static [SimulationKind] = &[
        Self::Prediction,
        Self::Comparison,
        Self::EventImpact,
        Self::WhatIf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Prediction => "prediction",
            Self::Comparison => "comparison",
            Self::EventImpact => "event_impact",
            Self::WhatIf => "what_if",
        }
    }
}

impl std::fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One invocation's full parameter set. Immutable once submitted: the
/// engine takes it by shared reference and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub scope: Scope,
    pub kind: SimulationKind,
    pub weights: WeightConfig,
    /// Monte Carlo iteration count, > 0.
    pub iterations: u32,
    /// Confidence level in (0, 1), e.g. 0.95.
    pub confidence_level: f64,
    /// Seats contested by the scoped office.
    pub total_seats: u32,
    /// Entity universe competing in this scope.
    pub entities: Vec<EntityId>,
    pub polls: Vec<PollSample>,
    pub baseline: Vec<HistoricalResult>,
    pub adjustments: Vec<AdjustmentSpec>,
    pub factors: Vec<ExternalFactor>,
    /// Seed for the sampler's deterministic iteration streams.
    pub seed: u64,
}
