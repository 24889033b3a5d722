pub mod format;
pub mod orchestrator;
pub mod queue;
