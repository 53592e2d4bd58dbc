//! Top-level projection engine — validation, dispatch on the
//! simulation kind, and outcome assembly.

use std::time::Instant;

use pleito_core::cancellation::CancellationToken;
use pleito_core::config::EngineConfig;
use pleito_core::errors::EngineError;
use pleito_core::events::{EventDispatcher, RunCompleteEvent, RunStartedEvent};
use pleito_core::types::{
    ImpactReport, JobStatus, ProjectionReport, ProjectionRequest, ProjectionResult,
    SimulationKind, SimulationOutcome,
};

use crate::aggregate::InputAggregator;
use crate::compare::ScenarioComparator;
use crate::rank::CandidateRanker;
use crate::sample::{MonteCarloSampler, ProjectionEnsemble};
use crate::summarize::{overall_confidence, ProjectionSummarizer};

/// One engine instance per configuration. Every invocation is a pure,
/// synchronous computation over an immutable request; instances hold no
/// per-run state and invocations never interfere.
pub struct ProjectionEngine {
    config: EngineConfig,
    events: EventDispatcher,
}

impl ProjectionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            events: EventDispatcher::new(),
        }
    }

    /// Build an engine with pre-registered event handlers, typically
    /// the external job layer's progress relay.
    pub fn with_events(config: EngineConfig, events: EventDispatcher) -> Self {
        Self { config, events }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one projection request.
    ///
    /// Validation runs before any sampling; a cancelled run returns
    /// `EngineError::Cancelled` and no partial result.
    pub fn run(
        &self,
        request: &ProjectionRequest,
        cancel: &CancellationToken,
    ) -> Result<SimulationOutcome, EngineError> {
        let started = Instant::now();
        self.events.emit_run_started(&RunStartedEvent {
            kind: request.kind,
            iterations: request.iterations,
        });
        tracing::info!(
            target: "pleito::engine",
            kind = %request.kind,
            iterations = request.iterations,
            total_seats = request.total_seats,
            "projection run started"
        );

        let outcome = self.dispatch(request, cancel);

        let status = match &outcome {
            Ok(_) => JobStatus::Completed,
            Err(e) => e.status(),
        };
        self.events.emit_run_complete(&RunCompleteEvent {
            status,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        match &outcome {
            Ok(_) => tracing::info!(target: "pleito::engine", status = %status, "projection run finished"),
            Err(e) => {
                tracing::warn!(target: "pleito::engine", status = %status, error = %e, "projection run failed")
            }
        }

        outcome
    }

    fn dispatch(
        &self,
        request: &ProjectionRequest,
        cancel: &CancellationToken,
    ) -> Result<SimulationOutcome, EngineError> {
        match request.kind {
            SimulationKind::Prediction => {
                let (result, _ensemble) = self.project(request, cancel)?;
                Ok(SimulationOutcome::Prediction(ProjectionReport {
                    overall_confidence: overall_confidence(&result),
                    result,
                    ranking: None,
                }))
            }
            SimulationKind::Comparison => {
                let (result, ensemble) = self.project(request, cancel)?;
                let ranking = CandidateRanker::new().rank(&ensemble)?;
                Ok(SimulationOutcome::Comparison(ProjectionReport {
                    overall_confidence: overall_confidence(&result),
                    result,
                    ranking: Some(ranking),
                }))
            }
            SimulationKind::EventImpact => {
                // The "before" leg strips the scripted external
                // factors; everything else, the seed included, stays.
                let mut before = request.clone();
                before.factors.clear();
                Ok(SimulationOutcome::EventImpact(
                    self.impact(&before, request, cancel)?,
                ))
            }
            SimulationKind::WhatIf => {
                // The "before" leg strips the analyst adjustments.
                let mut before = request.clone();
                before.adjustments.clear();
                Ok(SimulationOutcome::WhatIf(
                    self.impact(&before, request, cancel)?,
                ))
            }
        }
    }

    /// Aggregate → sample → summarize for one request.
    fn project(
        &self,
        request: &ProjectionRequest,
        cancel: &CancellationToken,
    ) -> Result<(ProjectionResult, ProjectionEnsemble), EngineError> {
        let base = InputAggregator::new(&self.config).aggregate(request)?;
        let sampler = MonteCarloSampler::new(&self.config.sampling, &self.events);
        let ensemble = sampler.sample(&base, request.iterations, request.seed, cancel)?;
        let result = ProjectionSummarizer::new(&self.config).summarize(
            &ensemble,
            &base,
            request.confidence_level,
            request.total_seats,
        )?;
        Ok((result, ensemble))
    }

    /// Run both legs of an impact comparison. The legs share the
    /// request seed, so the delta isolates the stripped inputs rather
    /// than sampling noise.
    fn impact(
        &self,
        before_request: &ProjectionRequest,
        after_request: &ProjectionRequest,
        cancel: &CancellationToken,
    ) -> Result<ImpactReport, EngineError> {
        let (before, _) = self.project(before_request, cancel)?;
        let (after, _) = self.project(after_request, cancel)?;
        let comparison =
            ScenarioComparator::new(&self.config.trend).compare(&before, &after)?;
        Ok(ImpactReport {
            before,
            after,
            comparison,
        })
    }
}
