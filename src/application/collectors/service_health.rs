use super::{Collector, CollectorReport};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::CollectorError;
use crate::domain::observations::ServiceStatus;
use crate::infrastructure::observability::{InstrumentedClient, Metrics};
use async_trait::async_trait;
use tracing::debug;

/// Up/down state of each d4armory.io service
pub struct ServiceHealthCollector {
    endpoint: Endpoint,
}

impl ServiceHealthCollector {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Collector for ServiceHealthCollector {
    fn name(&self) -> &'static str {
        "service_health"
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

        let statuses = ServiceStatus::from_payload(&payload);
        for status in &statuses {
            debug!("Service {} up={}", status.service, status.up);
            metrics.set_service_status(status);
        }

        Ok(CollectorReport {
            recorded: statuses.len(),
            warnings: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::MockJsonSource;
    use serde_json::json;
    use std::sync::Arc;

    const URL: &str = "https://d4armory.io/status";

    fn setup(source: MockJsonSource) -> (ServiceHealthCollector, InstrumentedClient, Metrics) {
        let metrics = Metrics::new().unwrap();
        let client = InstrumentedClient::new(Arc::new(source), metrics.clone());
        let collector = ServiceHealthCollector::new(Endpoint::parse("status", URL).unwrap());
        (collector, client, metrics)
    }

    #[tokio::test]
    async fn test_service_health_sets_gauges() {
        let source = MockJsonSource::new().with_json(
            URL,
            json!({"character_service": true, "event_service": false, "extra": true}),
        );
        let (collector, client, metrics) = setup(source);

        let report = collector.collect(&client, &metrics).await.unwrap();

        assert_eq!(report.recorded, 2);
        assert!(report.warnings.is_empty());
        let gauge = |s: &str| metrics.d4armory_status.with_label_values(&[s]).get();
        assert_eq!(gauge("character_service"), 1.0);
        assert_eq!(gauge("event_service"), 0.0);
    }

    #[tokio::test]
    async fn test_service_health_missing_field_is_down() {
        let source = MockJsonSource::new().with_json(URL, json!({"event_service": true}));
        let (collector, client, metrics) = setup(source);

        let report = collector.collect(&client, &metrics).await.unwrap();

        assert!(report.warnings.is_empty());
        assert!(metrics
            .render()
            .contains(r#"d4armory_status{service="character_service"} 0"#));
    }

    #[tokio::test]
    async fn test_service_health_fetch_failure_leaves_gauges_unset() {
        let source = MockJsonSource::new().with_unreachable(URL);
        let (collector, client, metrics) = setup(source);

        let result = collector.collect(&client, &metrics).await;

        assert!(matches!(result, Err(CollectorError::Fetch(_))));
        assert!(!metrics.render().contains("d4armory_status{"));
    }
}
