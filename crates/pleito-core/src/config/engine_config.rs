//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ApportionmentConfig, FactorConfig, SamplingConfig, TrendConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PLEITO_*`)
/// 2. Project config (`pleito.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sampling: SamplingConfig,
    pub apportionment: ApportionmentConfig,
    pub factors: FactorConfig,
    pub trend: TrendConfig,
}

impl EngineConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("pleito.toml");
        if project_config_path.exists() {
            let raw = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::ReadFailed {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Apply `PLEITO_*` environment variable overrides.
    fn apply_env_overrides(config: &mut EngineConfig) {
        if let Ok(value) = std::env::var("PLEITO_PROGRESS_TICK") {
            if let Ok(parsed) = value.parse() {
                config.sampling.progress_tick = parsed;
            }
        }
        if let Ok(value) = std::env::var("PLEITO_THREADS") {
            if let Ok(parsed) = value.parse() {
                config.sampling.threads = parsed;
            }
        }
        if let Ok(value) = std::env::var("PLEITO_TREND_EPSILON") {
            if let Ok(parsed) = value.parse() {
                config.trend.epsilon = parsed;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        if !(config.sampling.min_variance_floor > 0.0)
            || !config.sampling.min_variance_floor.is_finite()
        {
            return Err(ConfigError::ValidationFailed {
                field: "sampling.min_variance_floor".to_string(),
                message: "must be a positive finite number".to_string(),
            });
        }
        if config.sampling.progress_tick == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "sampling.progress_tick".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&config.trend.epsilon) {
            return Err(ConfigError::ValidationFailed {
                field: "trend.epsilon".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if !(config.apportionment.share_sum_tolerance > 0.0)
            || config.apportionment.share_sum_tolerance >= 0.5
        {
            return Err(ConfigError::ValidationFailed {
                field: "apportionment.share_sum_tolerance".to_string(),
                message: "must be positive and well below 1".to_string(),
            });
        }
        if let super::ViabilityRule::Fixed { share } = config.apportionment.viability {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "apportionment.viability.share".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        for (field, value) in [
            ("factors.short_term_retention", config.factors.short_term_retention),
            ("factors.medium_term_retention", config.factors.medium_term_retention),
            ("factors.long_term_retention", config.factors.long_term_retention),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }
}
