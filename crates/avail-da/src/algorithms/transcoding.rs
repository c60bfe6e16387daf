//! # HTTP Transcoding
//!
//! Pure request building and response classification for the light-client
//! API. No I/O happens here; the transport moves the bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use url::Url;

use crate::domain::{
    BlockDataResponse, DaError, RetrievalRecord, SubmissionRecord, SubmitRequest,
    BLOCK_DATA_FIELDS, NOT_FOUND_SENTINEL, PROCESSING_SENTINEL,
};

/// Classified body of a block data response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetrievalResponse {
    /// The light client does not know the block.
    NotFound,
    /// The block is known but not yet queryable.
    Processing,
    /// Data transactions of the block.
    Ready(Vec<RetrievalRecord>),
}

/// Build the submit body `{"data": base64(blob)}`.
pub fn build_submit_payload(blob: &[u8]) -> SubmitRequest {
    SubmitRequest {
        data: STANDARD.encode(blob),
    }
}

/// Parse the body returned by `POST /submit`.
pub fn parse_submit_response(body: &str) -> Result<SubmissionRecord, DaError> {
    serde_json::from_str(body)
        .map_err(|e| DaError::Decode(format!("submit response: {}", e)))
}

/// `{base}/submit`
pub fn build_submit_url(base_url: &str) -> Result<Url, DaError> {
    parse_endpoint(format!("{}/submit", base_url.trim_end_matches('/')))
}

/// `{base}/blocks/{n}/data?fields=data,extrinsic`
pub fn build_retrieval_url(base_url: &str, block_number: u32) -> Result<Url, DaError> {
    parse_endpoint(format!(
        "{}/blocks/{}/data?fields={}",
        base_url.trim_end_matches('/'),
        block_number,
        BLOCK_DATA_FIELDS
    ))
}

fn parse_endpoint(raw: String) -> Result<Url, DaError> {
    Url::parse(&raw).map_err(|e| DaError::InvalidEndpoint {
        url: raw,
        reason: e.to_string(),
    })
}

/// Classify a block data body.
///
/// Sentinels are matched exactly, either bare or as a JSON string literal.
/// Anything else must be the block data JSON.
pub fn classify_retrieval_response(body: &str) -> Result<RetrievalResponse, DaError> {
    match unquote(body) {
        NOT_FOUND_SENTINEL => return Ok(RetrievalResponse::NotFound),
        PROCESSING_SENTINEL => return Ok(RetrievalResponse::Processing),
        _ => {}
    }

    let response: BlockDataResponse = serde_json::from_str(body)
        .map_err(|e| DaError::Decode(format!("block data response: {}", e)))?;
    Ok(RetrievalResponse::Ready(response.data_transactions))
}

fn unquote(body: &str) -> &str {
    body.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(body)
}

/// Decode the payload of a data transaction.
///
/// Malformed base64 yields `None`; the caller decides how lenient to be.
pub fn decode_record_data(record: &RetrievalRecord) -> Option<Vec<u8>> {
    STANDARD.decode(record.data.as_bytes()).ok()
}
