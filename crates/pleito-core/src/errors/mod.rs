//! Error handling for Pleito.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod apportionment_error;
pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod mismatch_error;
pub mod validation_error;

pub use apportionment_error::ApportionmentError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::PleitoErrorCode;
pub use mismatch_error::MismatchError;
pub use validation_error::ValidationError;
