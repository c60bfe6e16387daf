//! # Domain Invariants
//!
//! Constants of the light-client protocol and the identifier layout.

use std::time::Duration;

use super::errors::DaError;

/// Identifier buffer length.
pub const IDENTIFIER_LEN: usize = 8;

/// Bytes of the identifier holding the big-endian block number.
pub const BLOCK_NUMBER_LEN: usize = 4;

/// Body returned by the light client for an unknown block.
pub const NOT_FOUND_SENTINEL: &str = "Not found";

/// Body returned while the light client is still processing a block.
pub const PROCESSING_SENTINEL: &str = "Processing block";

/// Fields requested from the block data endpoint.
pub const BLOCK_DATA_FIELDS: &str = "data,extrinsic";

/// Default wait between "Processing block" retries.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(10);

/// Default retry ceiling (one hour at the default backoff).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 360;

/// Advertised maximum blob size. Not enforced by the adapter.
pub const DEFAULT_MAX_BLOB_SIZE: u64 = 512 * 1024;

/// Invariant: an identifier must hold a full block number.
pub fn invariant_identifier_length(id: &[u8]) -> Result<(), DaError> {
    if id.len() < BLOCK_NUMBER_LEN {
        return Err(DaError::MalformedIdentifier {
            got: id.len(),
            required: BLOCK_NUMBER_LEN,
        });
    }
    Ok(())
}
