//! Push-based observability for d4prom
//!
//! Metrics are collected into a run-scoped registry and leave the process
//! through a single push to a Prometheus Pushgateway. There is no HTTP server
//! and no incoming request.

pub mod instrumentation;
pub mod latency_tracker;
pub mod metrics;
pub mod push;

pub use instrumentation::{InstrumentedClient, instrument};
pub use latency_tracker::RequestTimer;
pub use metrics::{Metrics, RequestLabels};
pub use push::PushGateway;
