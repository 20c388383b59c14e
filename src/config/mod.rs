//! Configuration module for d4prom.
//!
//! Every setting has a built-in default, so no environment variable is
//! required. Overrides are organized by concern: Endpoints, HTTP, Push.

mod endpoint_config;
mod http_config;
mod push_config;

pub use endpoint_config::{
    DEFAULT_LIVE_EVENT_URL, DEFAULT_STATUS_URL, DEFAULT_WORLD_STATE_URL, EndpointEnvConfig,
};
pub use http_config::HttpEnvConfig;
pub use push_config::PushEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: EndpointEnvConfig,
    pub http: HttpEnvConfig,
    pub push: PushEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let endpoints = EndpointEnvConfig::from_env().context("Failed to load endpoint config")?;
        let http = HttpEnvConfig::from_env().context("Failed to load HTTP config")?;
        let push = PushEnvConfig::from_env();

        Ok(Self {
            endpoints,
            http,
            push,
        })
    }
}
