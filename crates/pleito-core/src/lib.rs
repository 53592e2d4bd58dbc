//! pleito-core: domain types and ambient plumbing for the Pleito
//! election projection engine.
//!
//! This crate carries everything the engine crate and its callers share:
//! - Types: requests, results, entities, simulation kinds, job statuses
//! - Errors: one `thiserror` enum per subsystem plus the top-level
//!   `EngineError` aggregate
//! - Config: layered `EngineConfig` resolution (defaults → `pleito.toml`
//!   → `PLEITO_*` environment variables)
//! - Events: synchronous progress/lifecycle dispatch to caller handlers
//! - Cancellation: cooperative token checked between sampler iterations
//! - Tracing: `PLEITO_LOG`-driven subscriber setup
//!
//! No algorithmic code lives here; the computation is in `pleito-engine`.

pub mod cancellation;
pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

// Re-exports for convenience
pub use cancellation::{Cancellable, CancellationToken};
pub use config::{
    ApportionmentConfig, EngineConfig, FactorConfig, SamplingConfig, TrendConfig,
    ViabilityRule,
};
pub use errors::{
    ApportionmentError, ConfigError, EngineError, MismatchError, PleitoErrorCode,
    ValidationError,
};
pub use events::{
    EngineEventHandler, EventDispatcher, ProgressEvent, RunCompleteEvent, RunStartedEvent,
};
pub use types::{
    AdjustmentSpec, ComparisonResult, EntityDelta, EntityId, EntityProjection,
    ExternalFactor, HistoricalResult, ImpactDuration, ImpactReport, JobStatus, Office,
    Polarity, PollSample, ProjectionReport, ProjectionRequest, ProjectionResult, Ranking,
    Scope, SimulationKind, SimulationOutcome, Trend, WeightConfig, WinProbability,
};
