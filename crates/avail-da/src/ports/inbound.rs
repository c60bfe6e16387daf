//! # Inbound Ports
//!
//! The blob-storage contract the adapter exposes to its callers.

use async_trait::async_trait;

use crate::domain::{Blob, Commitment, DaError, Identifier, Proof};

/// Identifiers and proofs produced by one submission batch.
///
/// The two vectors have equal length but no positional correspondence to
/// the submitted blobs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitResult {
    /// One identifier per submitted blob.
    pub identifiers: Vec<Identifier>,
    /// One proof per submitted blob.
    pub proofs: Vec<Proof>,
}

/// Data Availability API - inbound port.
#[async_trait]
pub trait DataAvailabilityApi: Send + Sync {
    /// Submit a batch of blobs. All-or-nothing from the caller's view.
    async fn submit(&self, blobs: Vec<Blob>) -> Result<SubmitResult, DaError>;

    /// Retrieve every blob stored in the blocks the identifiers point at.
    async fn get(&self, identifiers: &[Identifier]) -> Result<Vec<Blob>, DaError>;

    /// Identifiers for a logical height.
    async fn get_ids(&self, height: u64) -> Result<Vec<Identifier>, DaError>;

    /// Proofs for the data transactions behind the identifiers.
    async fn get_proofs(&self, identifiers: &[Identifier]) -> Result<Vec<Proof>, DaError>;

    /// Unsupported: always empty.
    async fn commit(&self, blobs: &[Blob]) -> Result<Vec<Commitment>, DaError>;

    /// Unsupported: always empty. Empty does not mean "valid".
    async fn validate(
        &self,
        identifiers: &[Identifier],
        proofs: &[Proof],
    ) -> Result<Vec<bool>, DaError>;

    /// Advertised maximum blob size.
    fn max_blob_size(&self) -> u64;
}
