use super::{Collector, CollectorReport, unexpected_shape};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::CollectorError;
use crate::domain::observations::WorldStateValue;
use crate::infrastructure::observability::{InstrumentedClient, Metrics};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Current world state values, one series per world state
pub struct WorldStateCollector {
    endpoint: Endpoint,
}

impl WorldStateCollector {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Collector for WorldStateCollector {
    fn name(&self) -> &'static str {
        "world_state"
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
        let parsed = WorldStateValue::from_payload(&payload)
            .map_err(|mismatch| unexpected_shape(&self.endpoint, mismatch))?;

        for value in &parsed.value {
            debug!("World state {} = {}", value.world_state, value.value);
            metrics.set_world_state(value);
        }
        for warning in &parsed.warnings {
            warn!("{}", warning);
        }

        Ok(CollectorReport {
            recorded: parsed.value.len(),
            warnings: parsed.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::collectors::log_capture;
    use crate::infrastructure::mock::MockJsonSource;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const URL: &str = "https://d4armory.io/api/worldstate";

    fn setup(source: MockJsonSource) -> (WorldStateCollector, InstrumentedClient, Metrics) {
        let metrics = Metrics::new().unwrap();
        let client = InstrumentedClient::new(Arc::new(source), metrics.clone());
        let collector = WorldStateCollector::new(Endpoint::parse("world_state", URL).unwrap());
        (collector, client, metrics)
    }

    #[tokio::test]
    async fn test_world_state_skips_malformed_entry() {
        let source = MockJsonSource::new().with_json(
            URL,
            json!([{"worldState": "A", "nValue": 1}, {"bogus": true}]),
        );
        let (collector, client, metrics) = setup(source);

        let report = collector.collect(&client, &metrics).await.unwrap();

        assert_eq!(report.recorded, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(metrics.world_state.with_label_values(&["A"]).get(), 1.0);
    }

    #[tokio::test]
    async fn test_world_state_malformed_entry_logs_one_warning() {
        let (logs, _guard) = log_capture::capture();
        let source = MockJsonSource::new().with_json(
            URL,
            json!([{"worldState": "A", "nValue": 1}, {"worldState": "B"}]),
        );
        let (collector, client, metrics) = setup(source);

        collector.collect(&client, &metrics).await.unwrap();

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 1, "{:?}", warnings);
        assert!(warnings[0].contains("Invalid world state info"));
        assert!(warnings[0].contains(r#""worldState":"B""#));
    }

    #[tokio::test]
    async fn test_world_state_null_payload() {
        let source = MockJsonSource::new().with_json(URL, Value::Null);
        let (collector, client, metrics) = setup(source);

        let report = collector.collect(&client, &metrics).await.unwrap();

        assert_eq!(report, CollectorReport::default());
        assert!(!metrics.render().contains("world_state{"));
    }

    #[tokio::test]
    async fn test_world_state_http_error() {
        let source = MockJsonSource::new().with_status(URL, 404);
        let (collector, client, metrics) = setup(source);

        let result = collector.collect(&client, &metrics).await;

        match result {
            Err(CollectorError::Fetch(e)) => assert_eq!(e.status(), Some(404)),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }
}
