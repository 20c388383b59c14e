//! Prometheus metrics definitions for d4prom
//!
//! One [`Metrics`] value is built per run. Every instrument and its label
//! schema is registered up front so the pushed exposition is stable even when
//! some series receive no data.

use crate::domain::endpoint::RequestOutcome;
use crate::domain::observations::{LiveEventField, ServiceStatus, WorldStateValue};
use prometheus::{
    CounterVec, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Labels of `req_counter_total` and `req_latency`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLabels {
    pub status: String,
    pub method: String,
    pub scheme: String,
    pub host: String,
    pub port: String,
    pub path: String,
}

impl RequestLabels {
    pub const NAMES: [&'static str; 6] = ["status", "method", "scheme", "host", "port", "path"];

    pub fn values(&self) -> [&str; 6] {
        [
            self.status.as_str(),
            self.method.as_str(),
            self.scheme.as_str(),
            self.host.as_str(),
            self.port.as_str(),
            self.path.as_str(),
        ]
    }
}

impl From<&RequestOutcome> for RequestLabels {
    fn from(outcome: &RequestOutcome) -> Self {
        Self {
            status: outcome.status_label(),
            method: outcome.method.to_string(),
            scheme: outcome.target.scheme.clone(),
            host: outcome.target.host.clone(),
            port: outcome.target.port.clone(),
            path: outcome.target.path.clone(),
        }
    }
}

/// Labels of `d4armory_status`
#[derive(Debug, Clone, Copy)]
pub struct ServiceLabels<'a> {
    pub service: &'a str,
}

impl ServiceLabels<'_> {
    pub const NAMES: [&'static str; 1] = ["service"];

    pub fn values(&self) -> [&str; 1] {
        [self.service]
    }
}

/// Labels of `world_state`
#[derive(Debug, Clone, Copy)]
pub struct WorldStateLabels<'a> {
    pub world_state: &'a str,
}

impl WorldStateLabels<'_> {
    pub const NAMES: [&'static str; 1] = ["world_state"];

    pub fn values(&self) -> [&str; 1] {
        [self.world_state]
    }
}

/// Metric registry for one collection run
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// HTTP requests by outcome and target
    pub req_counter: CounterVec,
    /// HTTP request latency in seconds, retries included
    pub req_latency: HistogramVec,
    /// D4Armory API status by service (1=up)
    pub d4armory_status: GaugeVec,
    /// Current world state values
    pub world_state: GaugeVec,
    pub live_event_sno: Gauge,
    pub live_event_start_time: Gauge,
    pub live_event_end_time: Gauge,
}

impl Metrics {
    /// Create a new Metrics instance with every instrument registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let req_counter = CounterVec::new(
            Opts::new("req_counter_total", "HTTP request counter"),
            &RequestLabels::NAMES,
        )?;
        registry.register(Box::new(req_counter.clone()))?;

        let req_latency = HistogramVec::new(
            HistogramOpts::new("req_latency", "HTTP request latency"),
            &RequestLabels::NAMES,
        )?;
        registry.register(Box::new(req_latency.clone()))?;

        let d4armory_status = GaugeVec::new(
            Opts::new("d4armory_status", "D4Armory API status by service"),
            &ServiceLabels::NAMES,
        )?;
        registry.register(Box::new(d4armory_status.clone()))?;

        let world_state = GaugeVec::new(
            Opts::new("world_state", "Current Diablo 4 World States"),
            &WorldStateLabels::NAMES,
        )?;
        registry.register(Box::new(world_state.clone()))?;

        let live_event_sno = Gauge::with_opts(Opts::new(
            "live_event_sno",
            "Current Diablo 4 live event SNO",
        ))?;
        registry.register(Box::new(live_event_sno.clone()))?;

        let live_event_start_time = Gauge::with_opts(Opts::new(
            "live_event_start_time",
            "Current Diablo 4 live event start timestamp",
        ))?;
        registry.register(Box::new(live_event_start_time.clone()))?;

        let live_event_end_time = Gauge::with_opts(Opts::new(
            "live_event_end_time",
            "Current Diablo 4 live event end timestamp",
        ))?;
        registry.register(Box::new(live_event_end_time.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            req_counter,
            req_latency,
            d4armory_status,
            world_state,
            live_event_sno,
            live_event_start_time,
            live_event_end_time,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    /// Consume the registry into the text exposition pushed to the gateway
    pub fn encode(self) -> prometheus::Result<String> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }

    /// One counter increment and one latency observation
    pub fn record_request(&self, outcome: &RequestOutcome) {
        let labels = RequestLabels::from(outcome);
        let values = labels.values();
        self.req_counter.with_label_values(&values).inc();
        self.req_latency
            .with_label_values(&values)
            .observe(outcome.elapsed.as_secs_f64());
    }

    pub fn request_count(&self, labels: &RequestLabels) -> f64 {
        self.req_counter.with_label_values(&labels.values()).get()
    }

    pub fn set_service_status(&self, status: &ServiceStatus) {
        let labels = ServiceLabels {
            service: status.service,
        };
        self.d4armory_status
            .with_label_values(&labels.values())
            .set(status.value());
    }

    pub fn set_world_state(&self, value: &WorldStateValue) {
        let labels = WorldStateLabels {
            world_state: &value.world_state,
        };
        self.world_state
            .with_label_values(&labels.values())
            .set(value.value);
    }

    pub fn live_event_gauge(&self, field: LiveEventField) -> &Gauge {
        match field {
            LiveEventField::Sno => &self.live_event_sno,
            LiveEventField::StartTime => &self.live_event_start_time,
            LiveEventField::EndTime => &self.live_event_end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::{Endpoint, METHOD_GET};
    use std::time::Duration;

    fn outcome(status: Option<u16>) -> RequestOutcome {
        let endpoint = Endpoint::parse("status", "https://d4armory.io/status").unwrap();
        RequestOutcome {
            status,
            method: METHOD_GET,
            target: endpoint.target(),
            elapsed: Duration::from_millis(120),
        }
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        assert!(metrics.render().contains("live_event_sno 0"));
    }

    #[test]
    fn test_record_request_labels() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_request(&outcome(Some(200)));
        metrics.record_request(&outcome(None));

        let output = metrics.render();
        assert!(output.contains("req_counter_total{"));
        assert!(output.contains(r#"port="443""#));
        assert!(output.contains(r#"status="200""#));
        assert!(output.contains(r#"status="-1""#));

        let labels = RequestLabels::from(&outcome(None));
        assert_eq!(metrics.request_count(&labels), 1.0);
        let histogram = metrics.req_latency.with_label_values(&labels.values());
        assert_eq!(histogram.get_sample_count(), 1);
        assert!(histogram.get_sample_sum() >= 0.12);
    }

    #[test]
    fn test_world_state_overwrites() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let mut value = WorldStateValue {
            world_state: "A".to_string(),
            value: 1.0,
        };
        metrics.set_world_state(&value);
        value.value = 3.0;
        metrics.set_world_state(&value);

        assert_eq!(metrics.world_state.with_label_values(&["A"]).get(), 3.0);
    }

    #[test]
    fn test_service_status_gauge() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.set_service_status(&ServiceStatus {
            service: "event_service",
            up: true,
        });
        let output = metrics.render();
        assert!(output.contains(r#"d4armory_status{service="event_service"} 1"#));
    }

    #[test]
    fn test_encode_consumes_registry() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.live_event_end_time.set(1_700_000_000.0);
        let body = metrics.encode().expect("Failed to encode");
        assert!(body.contains("live_event_end_time 1700000000"));
    }
}
