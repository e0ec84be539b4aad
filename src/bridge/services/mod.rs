//! Application services for the bridge.

mod orchestrator;

pub use orchestrator::{BindingError, BindingOrchestrator, BindingResult, BindingSummary};
