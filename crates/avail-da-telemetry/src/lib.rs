//! # Avail DA Telemetry
//!
//! Logging and metrics for the Avail DA adapter process.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use avail_da_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AVAIL_DA_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `AVAIL_DA_JSON_LOGS` | `true` in containers | JSON log lines |
//! | `AVAIL_DA_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `AVAIL_DA_SERVICE_NAME` | `avail-da` | Service name in logs |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_rpc, register_metrics, time_rpc, BLOBS_RETRIEVED, BLOBS_SUBMITTED,
    RPC_DURATION, RPC_REQUESTS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Bad filter directive or similar.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global subscriber.
///
/// Returns a guard to be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active and logs shutdown on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
