//! HTTP client configuration parsing from environment variables.
//!
//! Retry and timeout settings for the shared upstream client.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// HTTP client environment configuration
#[derive(Debug, Clone)]
pub struct HttpEnvConfig {
    /// Attempts per request, first try included
    pub max_attempts: u32,
    /// Delay before the first retry
    pub backoff_base: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: u32,
    /// Upper bound on a single retry delay
    pub backoff_max: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
}

impl Default for HttpEnvConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_base: Duration::from_millis(1000),
            backoff_factor: 2,
            backoff_max: Duration::from_millis(30_000),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpEnvConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let max_attempts = parse_var("D4PROM_HTTP_MAX_ATTEMPTS", defaults.max_attempts);
        if max_attempts == 0 {
            anyhow::bail!("D4PROM_HTTP_MAX_ATTEMPTS must be at least 1");
        }

        let backoff_base = Duration::from_millis(parse_var(
            "D4PROM_HTTP_BACKOFF_BASE_MS",
            defaults.backoff_base.as_millis() as u64,
        ));
        let backoff_max = Duration::from_millis(parse_var(
            "D4PROM_HTTP_BACKOFF_MAX_MS",
            defaults.backoff_max.as_millis() as u64,
        ))
        .max(backoff_base);

        Ok(Self {
            max_attempts,
            backoff_base,
            backoff_factor: parse_var("D4PROM_HTTP_BACKOFF_FACTOR", defaults.backoff_factor).max(1),
            backoff_max,
            timeout: Duration::from_secs(
                parse_var("D4PROM_HTTP_TIMEOUT_SECS", defaults.timeout.as_secs()).max(1),
            ),
        })
    }

    /// Retries allowed after the first attempt
    pub fn max_retries(&self) -> u32 {
        self.max_attempts.saturating_sub(1)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpEnvConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.max_retries(), 4);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
        assert_eq!(config.backoff_factor, 2);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
