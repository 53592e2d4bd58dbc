//! Monte Carlo sampling — N independent, reproducible perturbations of
//! the base distribution.
//!
//! Iterations are embarrassingly parallel: rayon fans rows out to
//! worker threads, each row seeded from (global seed, row index), and
//! results merge by writing disjoint arena slices. Cancellation is
//! checked per row; progress ticks come from an atomic counter.

pub mod ensemble;
pub mod rng;

use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;

use pleito_core::cancellation::{Cancellable, CancellationToken};
use pleito_core::config::SamplingConfig;
use pleito_core::errors::EngineError;
use pleito_core::events::{EventDispatcher, ProgressEvent};

use crate::aggregate::BaseDistribution;

pub use ensemble::ProjectionEnsemble;
pub use rng::IterationRng;

/// Draws the projection ensemble from a base distribution.
pub struct MonteCarloSampler<'a> {
    config: &'a SamplingConfig,
    events: &'a EventDispatcher,
}

impl<'a> MonteCarloSampler<'a> {
    pub fn new(config: &'a SamplingConfig, events: &'a EventDispatcher) -> Self {
        if config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build_global()
                .ok();
        }
        Self { config, events }
    }

    /// Produce `iterations` outcome vectors.
    ///
    /// Identical (base, iterations, seed) inputs yield a bit-identical
    /// ensemble. A cancelled run returns `EngineError::Cancelled` and
    /// no partial ensemble.
    pub fn sample(
        &self,
        base: &BaseDistribution,
        iterations: u32,
        seed: u64,
        cancel: &CancellationToken,
    ) -> Result<ProjectionEnsemble, EngineError> {
        let width = base.width();
        let entity_ids = base.entities.iter().map(|e| e.entity.clone()).collect();

        let means: Vec<f64> = base.entities.iter().map(|e| e.mean).collect();
        let sigmas: Vec<f64> = base.entities.iter().map(|e| e.variance.sqrt()).collect();
        let residual_sigma = self.config.min_variance_floor.sqrt();

        let mut ensemble = ProjectionEnsemble::zeroed(entity_ids, iterations as usize);
        let completed = AtomicU32::new(0);
        let tick = self.config.progress_tick.max(1);

        ensemble
            .data_mut()
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(i, row)| {
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }

                let mut rng = IterationRng::for_iteration(seed, i as u64);
                for (j, slot) in row.iter_mut().enumerate().take(width - 1) {
                    *slot = rng.next_truncated_normal(means[j], sigmas[j]);
                }
                row[width - 1] = rng.next_truncated_normal(base.others, residual_sigma);

                normalize_row(row, &means, base.others).map_err(|message| {
                    EngineError::Internal {
                        message: format!("iteration {i}: {message}"),
                    }
                })?;

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % tick == 0 {
                    self.events.emit_progress(&ProgressEvent {
                        completed: done,
                        total: iterations,
                    });
                }
                Ok(())
            })?;

        tracing::debug!(
            target: "pleito::sample",
            iterations,
            width,
            "ensemble sampled"
        );

        Ok(ensemble)
    }
}

/// Renormalize one iteration row to sum 1. A row that collapses to
/// all-zero falls back to the base means rather than dividing by zero.
fn normalize_row(row: &mut [f64], means: &[f64], others: f64) -> Result<(), String> {
    let sum: f64 = row.iter().sum();
    if !sum.is_finite() {
        return Err(format!("non-finite row sum {sum}"));
    }
    if sum > 0.0 {
        for slot in row.iter_mut() {
            *slot /= sum;
        }
    } else {
        let width = row.len();
        row[..width - 1].copy_from_slice(means);
        row[width - 1] = others;
        let base_sum: f64 = row.iter().sum();
        if base_sum > 0.0 {
            for slot in row.iter_mut() {
                *slot /= base_sum;
            }
        }
    }
    Ok(())
}
