//! Event handler trait implemented by the external job layer.

use super::types::{ProgressEvent, RunCompleteEvent, RunStartedEvent};

/// Observer for engine lifecycle events.
///
/// All methods default to no-ops so implementors subscribe only to what
/// they need. Handlers are called from worker threads and must be
/// `Send + Sync`; they should return quickly.
pub trait EngineEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}

    fn on_progress(&self, _event: &ProgressEvent) {}

    fn on_run_complete(&self, _event: &RunCompleteEvent) {}
}
