//! Projection result payloads — the engine's outputs.

use serde::{Deserialize, Serialize};

use super::entities::EntityId;

/// Direction of an entity's projected movement relative to a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Growing,
    Declining,
    Stable,
}

impl Trend {
    /// Classify a signed difference against an epsilon band.
    pub fn from_delta(delta: f64, epsilon: f64) -> Self {
        if delta > epsilon {
            Self::Growing
        } else if delta < -epsilon {
            Self::Declining
        } else {
            Self::Stable
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Summarized projection for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityProjection {
    pub entity: EntityId,
    /// Ensemble mean share.
    pub point_estimate: f64,
    /// Lower empirical confidence bound; `low <= point_estimate`.
    pub low: f64,
    /// Upper empirical confidence bound; `point_estimate <= high`.
    pub high: f64,
    pub seats: u32,
    pub trend: Trend,
}

/// The summarized output of one run. Rows are sorted by entity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub entities: Vec<EntityProjection>,
    pub iterations: u32,
    pub confidence_level: f64,
}

impl ProjectionResult {
    /// Look up one entity's projection. Rows are sorted by id, so this
    /// is a binary search.
    pub fn get(&self, id: &EntityId) -> Option<&EntityProjection> {
        self.entities
            .binary_search_by(|row| row.entity.cmp(id))
            .ok()
            .map(|idx| &self.entities[idx])
    }

    /// Sum of assigned seats across all entities.
    pub fn total_seats(&self) -> u32 {
        self.entities.iter().map(|row| row.seats).sum()
    }
}

/// Delta between two projections for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDelta {
    pub entity: EntityId,
    pub before: f64,
    pub after: f64,
    /// `after - before`, exact.
    pub change: f64,
    pub trend: Trend,
}

/// Structured delta between two completed projections over the same
/// entity universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub deltas: Vec<EntityDelta>,
}

impl ComparisonResult {
    /// Look up one entity's delta. Rows are sorted by id.
    pub fn get(&self, id: &EntityId) -> Option<&EntityDelta> {
        self.deltas
            .binary_search_by(|row| row.entity.cmp(id))
            .ok()
            .map(|idx| &self.deltas[idx])
    }
}

/// One candidate's share of simulated wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinProbability {
    pub entity: EntityId,
    /// Fraction of iterations won, ties split equally. Sums to 1
    /// across all candidates.
    pub probability: f64,
}

/// Win probabilities plus the overall-winner call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    /// Sorted by probability descending, then entity id.
    pub win_probabilities: Vec<WinProbability>,
    pub winner: EntityId,
}

/// Projection plus run-level aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub result: ProjectionResult,
    /// 1 − mean confidence interval width, clamped to [0, 1].
    pub overall_confidence: f64,
    /// Present for comparison runs; `None` for plain predictions.
    pub ranking: Option<Ranking>,
}

/// Before/after legs of an impact run with their comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub before: ProjectionResult,
    pub after: ProjectionResult,
    pub comparison: ComparisonResult,
}

/// Outcome of one engine invocation, tagged by simulation kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Prediction(ProjectionReport),
    Comparison(ProjectionReport),
    EventImpact(ImpactReport),
    WhatIf(ImpactReport),
}

/// Caller-visible job status vocabulary, shared with the external job
/// layer so both sides agree on spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_delta() {
        assert_eq!(Trend::from_delta(0.03, 0.005), Trend::Growing);
        assert_eq!(Trend::from_delta(-0.02, 0.005), Trend::Declining);
        assert_eq!(Trend::from_delta(0.004, 0.005), Trend::Stable);
        assert_eq!(Trend::from_delta(-0.005, 0.005), Trend::Stable);
    }

    #[test]
    fn test_result_lookup_sorted() {
        let result = ProjectionResult {
            entities: vec![
                EntityProjection {
                    entity: EntityId::from("MDB"),
                    point_estimate: 0.2,
                    low: 0.18,
                    high: 0.22,
                    seats: 2,
                    trend: Trend::Stable,
                },
                EntityProjection {
                    entity: EntityId::from("PT"),
                    point_estimate: 0.3,
                    low: 0.27,
                    high: 0.33,
                    seats: 3,
                    trend: Trend::Growing,
                },
            ],
            iterations: 1000,
            confidence_level: 0.95,
        };
        assert_eq!(result.get(&EntityId::from("PT")).unwrap().seats, 3);
        assert!(result.get(&EntityId::from("NOVO")).is_none());
        assert_eq!(result.total_seats(), 5);
    }

    #[test]
    fn test_outcome_serde_tag() {
        let outcome = SimulationOutcome::Prediction(ProjectionReport {
            result: ProjectionResult {
                entities: vec![],
                iterations: 100,
                confidence_level: 0.9,
            },
            overall_confidence: 0.8,
            ranking: None,
        });
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"kind\":\"prediction\""));
    }

    #[test]
    fn test_job_status_names() {
        let json = serde_json::to_string(&JobStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
