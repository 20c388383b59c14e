use crate::config::HttpEnvConfig;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{Jitter, RetryTransientMiddleware, policies::ExponentialBackoff};

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the shared upstream client with retry middleware
    pub fn create_client(config: &HttpEnvConfig) -> Result<ClientWithMiddleware, reqwest::Error> {
        // Retry policy:
        // - Connection errors, timeouts, 408/429 and 5xx are retried
        // - Exponential backoff from `backoff_base`, multiplied by `backoff_factor`
        // - No jitter: the n-th retry waits exactly base * factor^n, capped at `backoff_max`
        // - `max_attempts` counts the first try
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.backoff_base, config.backoff_max)
            .base(config.backoff_factor)
            .jitter(Jitter::None)
            .build_with_max_retries(config.max_retries());

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build())
    }
}
