//! Domain types for projection requests and results.
//!
//! Everything here is an owned serde value: the engine receives a fully
//! materialized [`ProjectionRequest`] and returns a fully materialized
//! [`SimulationOutcome`]. No type in this module performs I/O.

pub mod entities;
pub mod request;
pub mod result;

pub use entities::{
    AdjustmentSpec, EntityId, ExternalFactor, HistoricalResult, ImpactDuration, Polarity,
    PollSample,
};
pub use request::{Office, ProjectionRequest, Scope, SimulationKind, WeightConfig};
pub use result::{
    ComparisonResult, EntityDelta, EntityProjection, ImpactReport, JobStatus,
    ProjectionReport, ProjectionResult, Ranking, SimulationOutcome, Trend, WinProbability,
};
