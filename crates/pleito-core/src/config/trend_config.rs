//! Trend classification configuration.

use serde::{Deserialize, Serialize};

/// Epsilon band for the growing/declining/stable classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Absolute share movement below which an entity is "stable".
    pub epsilon: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { epsilon: 0.005 }
    }
}
