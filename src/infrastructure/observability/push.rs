//! Prometheus Pushgateway client
//!
//! Pushes the run's registry as one batch. There is no retry: a failed push
//! fails the run.

use crate::config::PushEnvConfig;
use crate::domain::errors::PushError;
use crate::infrastructure::observability::metrics::Metrics;
use prometheus::{Encoder, TextEncoder};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub struct PushGateway {
    client: Client,
    url: Url,
}

impl PushGateway {
    pub fn new(config: &PushEnvConfig, timeout: Duration) -> Result<Self, PushError> {
        let url = job_url(&config.address, &config.job)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| PushError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Replace the job's metric group with the contents of `metrics`
    pub async fn push(&self, metrics: Metrics) -> Result<(), PushError> {
        let body = metrics.encode()?;
        debug!("Pushing {} bytes to {}:\n{}", body.len(), self.url, body);

        let response = self
            .client
            .put(self.url.clone())
            .header(CONTENT_TYPE, TextEncoder::new().format_type())
            .body(body)
            .send()
            .await
            .map_err(|source| PushError::Transport {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Pushed metrics to {}", self.url);
        Ok(())
    }
}

/// `<address>/metrics/job/<job>`, defaulting to `http` when the address has no scheme
fn job_url(address: &str, job: &str) -> Result<Url, PushError> {
    let invalid = |reason: String| PushError::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    let full = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    };
    let mut url = Url::parse(&full).map_err(|e| invalid(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["metrics", "job", job]);

    Ok(url)
}
