//! Avail DA adapter executable.

use std::sync::Arc;

use anyhow::{Context, Result};
use avail_da::AvailDaService;
use avail_da_runtime::{serve, AppState, RuntimeConfig};
use avail_da_telemetry::{init_telemetry, TelemetryConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let config = RuntimeConfig::load().context("failed to load configuration")?;
    info!(
        lc_url = %config.da.lc_url,
        app_id = config.da.app_id,
        "Avail DA adapter v{} starting",
        avail_da::VERSION
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let service = AvailDaService::connect(&config.da, shutdown_rx.clone())
        .context("failed to create light client transport")?;

    let listener = TcpListener::bind(&config.rpc_address)
        .await
        .with_context(|| format!("failed to bind {}", config.rpc_address))?;
    let server = tokio::spawn(serve(
        listener,
        AppState::new(Arc::new(service)),
        shutdown_rx,
    ));

    info!("Adapter is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Initiating graceful shutdown...");
    if let Err(e) = shutdown_tx.send(true) {
        error!("Failed to send shutdown signal: {}", e);
    }
    server
        .await
        .context("server task panicked")?
        .context("server stopped with error")?;

    info!("Shutdown complete");
    Ok(())
}
