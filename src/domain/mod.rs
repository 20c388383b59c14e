// Upstream endpoint descriptors and request outcomes
pub mod endpoint;

// Domain-specific error types
pub mod errors;

// Payload parsing into typed observations
pub mod observations;

// Port interfaces
pub mod ports;
