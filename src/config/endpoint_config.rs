//! Upstream endpoint configuration parsing from environment variables.
//!
//! This module handles loading the d4armory.io URLs polled on each run:
//! - Service status
//! - Live event
//! - World state

use crate::domain::endpoint::Endpoint;
use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_STATUS_URL: &str = "https://d4armory.io/status";
pub const DEFAULT_LIVE_EVENT_URL: &str = "https://d4armory.io/api/liveevent";
pub const DEFAULT_WORLD_STATE_URL: &str = "https://d4armory.io/api/worldstate";

/// Upstream endpoints environment configuration
#[derive(Debug, Clone)]
pub struct EndpointEnvConfig {
    pub status: Endpoint,
    pub live_event: Endpoint,
    pub world_state: Endpoint,
}

impl EndpointEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            status: endpoint_from_env("status", "D4PROM_STATUS_URL", DEFAULT_STATUS_URL)?,
            live_event: endpoint_from_env(
                "live_event",
                "D4PROM_LIVE_EVENT_URL",
                DEFAULT_LIVE_EVENT_URL,
            )?,
            world_state: endpoint_from_env(
                "world_state",
                "D4PROM_WORLD_STATE_URL",
                DEFAULT_WORLD_STATE_URL,
            )?,
        })
    }

    /// All three endpoints under one base URL, e.g. a local mirror
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            status: Endpoint::parse("status", &format!("{}/status", base))
                .with_context(|| format!("Invalid base URL: {}", base_url))?,
            live_event: Endpoint::parse("live_event", &format!("{}/api/liveevent", base))
                .with_context(|| format!("Invalid base URL: {}", base_url))?,
            world_state: Endpoint::parse("world_state", &format!("{}/api/worldstate", base))
                .with_context(|| format!("Invalid base URL: {}", base_url))?,
        })
    }
}

fn endpoint_from_env(name: &str, var: &str, default: &str) -> Result<Endpoint> {
    let url = env::var(var).unwrap_or_else(|_| default.to_string());
    Endpoint::parse(name, &url).with_context(|| format!("Invalid {}: {}", var, url))
}
