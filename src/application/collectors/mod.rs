//! Endpoint collectors.
//!
//! Each collector fetches one upstream endpoint, validates the payload and
//! records what it can into the run's [`Metrics`]. Bad fields or entries are
//! reported as warnings; only a fetch failure or a wrong top-level shape ends
//! a collector early, and that never affects the other collectors.

mod live_event;
mod service_health;
mod world_state;

pub use live_event::LiveEventCollector;
pub use service_health::ServiceHealthCollector;
pub use world_state::WorldStateCollector;

use crate::domain::endpoint::Endpoint;
use crate::domain::errors::CollectorError;
use crate::domain::observations::{SchemaWarning, ShapeMismatch};
use crate::infrastructure::observability::{InstrumentedClient, Metrics};
use async_trait::async_trait;

/// What a successful collector recorded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectorReport {
    /// Gauge samples written
    pub recorded: usize,
    pub warnings: Vec<SchemaWarning>,
}

#[async_trait]
pub trait Collector: Send + Sync {
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> &Endpoint;

    async fn collect(
        &self,
        client: &InstrumentedClient,
        metrics: &Metrics,
    ) -> Result<CollectorReport, CollectorError>;
}

fn unexpected_shape(endpoint: &Endpoint, mismatch: ShapeMismatch) -> CollectorError {
    CollectorError::UnexpectedShape {
        endpoint: endpoint.url().to_string(),
        expected: mismatch.expected,
        found: mismatch.found,
    }
}
