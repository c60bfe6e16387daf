//! # Avail DA Runtime
//!
//! Process wrapper around the adapter.
//!
//! ## Startup Sequence
//!
//! 1. Telemetry (logging subscriber, Prometheus registry)
//! 2. `RuntimeConfig` from `config.json` plus `AVAIL_DA_*` overrides
//! 3. HTTP light-client transport and `AvailDaService`
//! 4. JSON-RPC listener on `rpc_address`
//!
//! Ctrl+C flips the shutdown channel: the server drains and any
//! `da_get` still waiting on a processing block returns a cancellation error.

pub mod config;
pub mod rpc;
pub mod server;

pub use config::{ConfigError, RuntimeConfig};
pub use rpc::{route_method, AppState};
pub use server::{build_router, serve};
