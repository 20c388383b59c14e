use super::{Collector, CollectorReport, unexpected_shape};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::CollectorError;
use crate::domain::observations::{LiveEventField, LiveEventWindow};
use crate::infrastructure::observability::{InstrumentedClient, Metrics};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Current live event SNO and time window
pub struct LiveEventCollector {
    endpoint: Endpoint,
}

impl LiveEventCollector {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Collector for LiveEventCollector {
    fn name(&self) -> &'static str {
        "live_event"
    }

    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn collect(
        &self,
        client: &InstrumentedClient,
        metrics: &Metrics,
    ) -> Result<CollectorReport, CollectorError> {
        let payload = client.fetch(&self.endpoint).await?;
        let parsed = LiveEventWindow::from_payload(&payload)
            .map_err(|mismatch| unexpected_shape(&self.endpoint, mismatch))?;

        let mut recorded = 0;
        for field in LiveEventField::ALL {
            if let Some(value) = parsed.value.get(field) {
                debug!("{} = {}", field.key(), value);
                metrics.live_event_gauge(field).set(value);
                recorded += 1;
            }
        }
        for warning in &parsed.warnings {
            warn!("{}", warning);
        }

        Ok(CollectorReport {
            recorded,
            warnings: parsed.warnings,
        })
    }
}
