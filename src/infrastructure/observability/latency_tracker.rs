use crate::domain::endpoint::{Endpoint, RequestOutcome, RequestTarget};
use crate::infrastructure::observability::metrics::Metrics;
use std::time::Instant;

/// RAII guard for measuring and recording one upstream request.
///
/// Records exactly once, on drop, whatever path the caller leaves by. The
/// status stays at the `-1` sentinel unless a response was obtained.
pub struct RequestTimer {
    start: Instant,
    metrics: Metrics,
    method: &'static str,
    target: RequestTarget,
    status: Option<u16>,
}

impl RequestTimer {
    pub fn start(metrics: Metrics, endpoint: &Endpoint, method: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            method,
            target: endpoint.target(),
            status: None,
        }
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let outcome = RequestOutcome {
            status: self.status,
            method: self.method,
            target: self.target.clone(),
            elapsed: self.start.elapsed(),
        };
        self.metrics.record_request(&outcome);
    }
}
