//! pleito-engine: the projection/simulation engine for proportional
//! elections under Brazilian-style rules.
//!
//! The engine is a pure computation: a fully materialized
//! `ProjectionRequest` goes in, a `SimulationOutcome` or typed error
//! comes out. Pipeline, leaves first:
//! - Aggregate: polls + history + adjustments + external factors →
//!   base distribution (mean, variance per entity)
//! - Sample: N deterministic Monte Carlo perturbations → flat ensemble
//! - Apportion: one vote-share vector → integer seats (D'Hondt)
//! - Summarize: ensemble → point estimates, confidence bounds, seats,
//!   trends
//! - Compare: two summarized projections → per-entity deltas
//! - Rank: ensemble → win probabilities and the overall winner
//!
//! `engine::ProjectionEngine` wires these together and dispatches on
//! the simulation kind.

pub mod aggregate;
pub mod apportion;
pub mod compare;
pub mod engine;
pub mod rank;
pub mod sample;
pub mod summarize;

// Re-exports for convenience
pub use aggregate::{BaseDistribution, EntityBase, InputAggregator};
pub use apportion::SeatApportioner;
pub use compare::ScenarioComparator;
pub use engine::ProjectionEngine;
pub use rank::CandidateRanker;
pub use sample::{MonteCarloSampler, ProjectionEnsemble};
pub use summarize::ProjectionSummarizer;
