use crate::domain::endpoint::{Endpoint, METHOD_GET};
use crate::domain::errors::FetchError;
use crate::domain::ports::{JsonResponse, JsonSource};
use crate::infrastructure::observability::latency_tracker::RequestTimer;
use crate::infrastructure::observability::metrics::Metrics;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Run `call` against `endpoint`, recording one counter increment and one
/// latency observation for it, whatever the outcome.
pub async fn instrument<F, Fut>(
    metrics: &Metrics,
    endpoint: &Endpoint,
    call: F,
) -> Result<Value, FetchError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<JsonResponse, FetchError>>,
{
    let mut timer = RequestTimer::start(metrics.clone(), endpoint, METHOD_GET);

    let result = call().await;
    let status = match &result {
        Ok(response) => Some(response.status),
        Err(e) => e.status(),
    };
    if let Some(status) = status {
        timer.set_status(status);
    }
    drop(timer);

    result.map(|response| response.body)
}

/// Shared upstream client. Every fetch goes through [`instrument`].
#[derive(Clone)]
pub struct InstrumentedClient {
    source: Arc<dyn JsonSource>,
    metrics: Metrics,
}

impl InstrumentedClient {
    pub fn new(source: Arc<dyn JsonSource>, metrics: Metrics) -> Self {
        Self { source, metrics }
    }

    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        instrument(&self.metrics, endpoint, || self.source.get_json(endpoint.url())).await
    }
}
