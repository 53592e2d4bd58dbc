//! Engine lifecycle events.
//!
//! The engine has no notion of subscribers: an external job layer
//! registers handlers on the [`EventDispatcher`] and relays progress
//! ticks to whoever is watching.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::EngineEventHandler;
pub use types::{ProgressEvent, RunCompleteEvent, RunStartedEvent};
