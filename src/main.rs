//! d4prom - one-shot Diablo 4 telemetry collector
//!
//! Polls the d4armory.io status, live-event and world-state endpoints, then
//! pushes the resulting metrics to a Prometheus Pushgateway and exits. Meant
//! to be run periodically by a scheduler (cron, systemd timer, k8s CronJob).
//!
//! # Usage
//! ```sh
//! D4PROM_PUSHGATEWAY=pushgateway:9091 cargo run --release
//! ```
//!
//! # Exit status
//! Zero when the push succeeded, even if some endpoints could not be
//! collected. Non-zero when the push failed.

use anyhow::{Context, Result};
use d4prom::application::CollectionRun;
use d4prom::config::Config;
use d4prom::infrastructure::observability::PushGateway;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("d4prom {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: gateway={}, job={}, attempts={}, timeout={:?}",
        config.push.address, config.push.job, config.http.max_attempts, config.http.timeout
    );

    let gateway = PushGateway::new(&config.push, config.http.timeout)?;
    let run = CollectionRun::build(&config)?;

    let report = run
        .run(&gateway)
        .await
        .with_context(|| format!("Failed to push metrics to {}", gateway.url()))?;

    info!(
        "Run complete: {}/{} collectors succeeded",
        report.succeeded(),
        report.outcomes.len()
    );
    Ok(())
}
