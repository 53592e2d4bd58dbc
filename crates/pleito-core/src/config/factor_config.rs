//! External-factor decay policy.

use serde::{Deserialize, Serialize};

use crate::types::ImpactDuration;

/// Fraction of a factor's magnitude retained at projection time, per
/// impact duration class.
///
/// A short-term event (a debate gaffe) has mostly faded by election
/// day; a long-term one (an economic downturn) has not. The retention
/// factors are a step policy chosen over a continuous decay curve so
/// analysts can read the config directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorConfig {
    pub short_term_retention: f64,
    pub medium_term_retention: f64,
    pub long_term_retention: f64,
}

impl FactorConfig {
    /// Retention factor for a duration class.
    pub fn retention(&self, duration: ImpactDuration) -> f64 {
        match duration {
            ImpactDuration::ShortTerm => self.short_term_retention,
            ImpactDuration::MediumTerm => self.medium_term_retention,
            ImpactDuration::LongTerm => self.long_term_retention,
        }
    }
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            short_term_retention: 0.35,
            medium_term_retention: 0.65,
            long_term_retention: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retention_ordering() {
        let config = FactorConfig::default();
        assert!(config.retention(ImpactDuration::ShortTerm)
            < config.retention(ImpactDuration::MediumTerm));
        assert!(config.retention(ImpactDuration::MediumTerm)
            < config.retention(ImpactDuration::LongTerm));
    }
}
