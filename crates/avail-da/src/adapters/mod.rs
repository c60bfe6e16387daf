//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits against the real light client and clock.

mod http_transport;
mod sleeper;

pub use http_transport::HttpLightClient;
pub use sleeper::TokioSleeper;
