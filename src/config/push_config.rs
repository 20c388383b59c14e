//! Push gateway configuration parsing from environment variables.

use std::env;

/// Push gateway environment configuration
#[derive(Debug, Clone)]
pub struct PushEnvConfig {
    /// `host:port` or a full URL; `http` is assumed when no scheme is given
    pub address: String,
    pub job: String,
}

impl Default for PushEnvConfig {
    fn default() -> Self {
        Self {
            address: "localhost:9091".to_string(),
            job: "d4prom".to_string(),
        }
    }
}

impl PushEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            address: env::var("D4PROM_PUSHGATEWAY").unwrap_or(defaults.address),
            job: env::var("D4PROM_JOB")
                .ok()
                .filter(|job| !job.trim().is_empty())
                .unwrap_or(defaults.job),
        }
    }
}
