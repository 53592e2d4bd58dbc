//! Monte Carlo sampling configuration.

use serde::{Deserialize, Serialize};

/// Sampler tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Variance assigned to entities with fewer than two poll samples,
    /// and the lower bound on sample variance otherwise. Avoids
    /// zero-width distributions.
    pub min_variance_floor: f64,

    /// Iterations between progress events. Also the granularity of the
    /// coarse progress ticks relayed by the external job layer.
    pub progress_tick: u32,

    /// Worker threads for iteration fan-out; 0 keeps the rayon default.
    pub threads: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            // (2%)^2 — roughly the margin of error of a mid-size poll.
            min_variance_floor: 0.0004,
            progress_tick: 1000,
            threads: 0,
        }
    }
}
