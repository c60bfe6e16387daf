//! # Domain Entities
//!
//! Wire shapes of the light-client HTTP API. All of them are transient:
//! they live for the duration of one submit or get call.

use serde::{Deserialize, Serialize};

/// Body of `POST {base}/submit`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Base64 encoded blob.
    pub data: String,
}

/// Response of one successful submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Block the blob was included in.
    pub block_number: u32,
    /// Hash of that block.
    pub block_hash: String,
    /// Transaction reference.
    #[serde(rename = "hash")]
    pub tx_hash: String,
    /// Transaction index in the block.
    #[serde(rename = "index")]
    pub tx_index: u32,
}

/// One data transaction found in a queried block.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalRecord {
    /// Base64 encoded payload.
    pub data: String,
    /// Extrinsic reference.
    pub extrinsic: String,
}

/// Response of `GET {base}/blocks/{n}/data`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockDataResponse {
    /// Queried block.
    pub block_number: u32,
    /// Data transactions of the configured app.
    #[serde(default)]
    pub data_transactions: Vec<RetrievalRecord>,
}
