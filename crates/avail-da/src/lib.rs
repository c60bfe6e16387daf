//! # Avail DA Adapter
//!
//! Blob storage backed by an Avail light client's `/v2` HTTP API.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Give rollup-style callers a uniform blob contract:
//! - `submit` a batch of opaque blobs, getting one identifier per blob
//! - `get` the blobs stored in the blocks the identifiers point at
//! - `get_ids` / `get_proofs` for height and inclusion lookups
//!
//! Identifiers are block numbers, so blobs landing in the same block share
//! one identifier and `get` returns every blob in that block.
//!
//! ## Light Client Behaviour
//!
//! | Response body | Meaning | Adapter reaction |
//! |---------------|---------|------------------|
//! | `Not found` | unknown block | no blobs, no error |
//! | `Processing block` | block not yet queryable | wait `retry.backoff_secs`, ask again |
//! | JSON | block data | decode every data transaction |
//!
//! ## Module Structure
//!
//! ```text
//! avail-da/
//! ├── domain/          # Identifier codec, wire entities, DaError
//! ├── algorithms/      # Request building and response classification
//! ├── ports/           # DataAvailabilityApi (inbound) + transport/sleeper (outbound)
//! ├── adapters/        # reqwest transport, tokio sleeper
//! ├── application/     # SubmissionCoordinator, RetrievalEngine, AvailDaService
//! └── config.rs        # AvailDaConfig, RetryPolicy
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{HttpLightClient, TokioSleeper};
pub use algorithms::{
    build_retrieval_url, build_submit_payload, build_submit_url, classify_retrieval_response,
    parse_submit_response, RetrievalResponse,
};
pub use application::{AvailDaService, RetrievalEngine, SubmissionCoordinator};
pub use config::{AvailDaConfig, RetryPolicy};
pub use domain::{
    decode_identifier, encode_identifier, encode_proof, Blob, Commitment, DaError, Identifier,
    Proof, RetrievalRecord, SubmissionRecord, DEFAULT_MAX_BLOB_SIZE, IDENTIFIER_LEN,
};
pub use ports::{
    DataAvailabilityApi, InstantSleeper, LightClientTransport, MockLightClient, Sleeper,
    SubmitResult,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
