//! Engine configuration with layered resolution.

pub mod apportionment_config;
pub mod engine_config;
pub mod factor_config;
pub mod sampling_config;
pub mod trend_config;

pub use apportionment_config::{ApportionmentConfig, ViabilityRule};
pub use engine_config::EngineConfig;
pub use factor_config::FactorConfig;
pub use sampling_config::SamplingConfig;
pub use trend_config::TrendConfig;
