//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Pleito tracing/logging system.
///
/// Reads the `PLEITO_LOG` environment variable for per-subsystem log
/// levels. Format: `PLEITO_LOG=pleito::sample=debug,pleito::engine=info`
///
/// Falls back to `pleito=info` if `PLEITO_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PLEITO_LOG")
            .unwrap_or_else(|_| EnvFilter::new("pleito=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .init();
    });
}
