//! Seat apportionment configuration.

use serde::{Deserialize, Serialize};

/// Minimum-share barrier an entity must clear to compete for seats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ViabilityRule {
    /// Every entity competes.
    None,
    /// Bar entities below `1 / total_seats` — a simplified electoral
    /// quotient.
    ElectoralQuotient,
    /// Bar entities below a fixed share.
    Fixed { share: f64 },
}

impl ViabilityRule {
    /// The minimum share required to compete, for a given seat total.
    pub fn threshold(&self, total_seats: u32) -> f64 {
        match self {
            Self::None => 0.0,
            Self::ElectoralQuotient => {
                if total_seats == 0 {
                    0.0
                } else {
                    1.0 / total_seats as f64
                }
            }
            Self::Fixed { share } => *share,
        }
    }
}

/// Apportioner tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApportionmentConfig {
    pub viability: ViabilityRule,

    /// Accepted deviation of a vote-share vector's sum from 1.
    pub share_sum_tolerance: f64,
}

impl Default for ApportionmentConfig {
    fn default() -> Self {
        Self {
            viability: ViabilityRule::ElectoralQuotient,
            share_sum_tolerance: 1e-6,
        }
    }
}
