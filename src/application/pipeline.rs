//! Collection run orchestrator
//!
//! Runs every collector against a fresh registry, waits for all of them, then
//! pushes the registry once. Collector failures are logged and tolerated; a
//! push failure fails the run.

use crate::application::collectors::{
    Collector, CollectorReport, LiveEventCollector, ServiceHealthCollector, WorldStateCollector,
};
use crate::config::{Config, EndpointEnvConfig};
use crate::domain::errors::{CollectorError, PushError};
use crate::domain::ports::JsonSource;
use crate::infrastructure::observability::{InstrumentedClient, Metrics, PushGateway};
use crate::infrastructure::{HttpClientFactory, HttpJsonSource};
use anyhow::Context;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of one collector
#[derive(Debug)]
pub struct CollectorOutcome {
    pub name: &'static str,
    pub result: Result<CollectorReport, CollectorError>,
}

/// Outcome of every collector in a run, in collector order
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<CollectorOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn warnings(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|r| r.warnings.len())
            .sum()
    }

    pub fn recorded(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|r| r.recorded)
            .sum()
    }

    pub fn outcome(&self, name: &str) -> Option<&CollectorOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// One collection run: a fresh registry, the shared client and the collectors
pub struct CollectionRun {
    client: InstrumentedClient,
    metrics: Metrics,
    collectors: Vec<Box<dyn Collector>>,
}

impl CollectionRun {
    /// Run over the real upstream endpoints using the retrying HTTP client
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let http = HttpClientFactory::create_client(&config.http)
            .context("Failed to build HTTP client")?;
        Self::new(Arc::new(HttpJsonSource::new(http)), &config.endpoints)
    }

    pub fn new(source: Arc<dyn JsonSource>, endpoints: &EndpointEnvConfig) -> anyhow::Result<Self> {
        let metrics = Metrics::new().context("Failed to create metric registry")?;
        let client = InstrumentedClient::new(source, metrics.clone());
        let collectors: Vec<Box<dyn Collector>> = vec![
            Box::new(ServiceHealthCollector::new(endpoints.status.clone())),
            Box::new(WorldStateCollector::new(endpoints.world_state.clone())),
            Box::new(LiveEventCollector::new(endpoints.live_event.clone())),
        ];

        Ok(Self {
            client,
            metrics,
            collectors,
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run every collector concurrently and wait for all of them.
    /// A failing collector never cancels its siblings.
    pub async fn collect(&self) -> RunReport {
        let runs = self.collectors.iter().map(|collector| async move {
            let result = collector.collect(&self.client, &self.metrics).await;
            log_outcome(&**collector, &result);
            CollectorOutcome {
                name: collector.name(),
                result,
            }
        });

        let report = RunReport {
            outcomes: join_all(runs).await,
        };
        info!(
            "Collection finished: {} succeeded, {} failed, {} samples, {} warnings",
            report.succeeded(),
            report.failed(),
            report.recorded(),
            report.warnings()
        );
        report
    }

    /// Collect, then push the registry once. Only the push decides the result.
    pub async fn run(self, gateway: &PushGateway) -> Result<RunReport, PushError> {
        let report = self.collect().await;

        let Self {
            client,
            metrics,
            collectors,
        } = self;
        drop(collectors);
        drop(client);

        gateway.push(metrics).await?;
        Ok(report)
    }
}

fn log_outcome(collector: &dyn Collector, result: &Result<CollectorReport, CollectorError>) {
    match result {
        Ok(report) => info!(
            "Collector {}: recorded {} samples ({} warnings)",
            collector.name(),
            report.recorded,
            report.warnings.len()
        ),
        Err(e) => error!(
            collector = collector.name(),
            endpoint = %collector.endpoint().url(),
            error = ?e,
            "Collector {} failed: {}",
            collector.name(),
            e
        ),
    }
}
