// Endpoint collectors
pub mod collectors;

// Run orchestrator
pub mod pipeline;

pub use pipeline::{CollectionRun, RunReport};
