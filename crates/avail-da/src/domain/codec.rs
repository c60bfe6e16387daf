//! # Identifier Codec
//!
//! Maps light-client block numbers to opaque identifiers and transaction
//! references to opaque proofs.
//!
//! Identifiers are NOT unique: every blob included in the same block maps
//! to the same identifier.

use super::errors::DaError;
use super::invariants::{invariant_identifier_length, BLOCK_NUMBER_LEN, IDENTIFIER_LEN};

/// Opaque caller payload.
pub type Blob = Vec<u8>;

/// Adapter-issued handle encoding a block number.
pub type Identifier = Vec<u8>;

/// Raw bytes of a light-client transaction reference.
pub type Proof = Vec<u8>;

/// Blob commitment (never computed by this backend).
pub type Commitment = Vec<u8>;

/// Encode a block number as an 8-byte identifier.
///
/// The number is written big-endian into the first four bytes; the rest
/// of the buffer stays zero.
pub fn encode_identifier(block_number: u32) -> [u8; IDENTIFIER_LEN] {
    let mut id = [0u8; IDENTIFIER_LEN];
    id[..BLOCK_NUMBER_LEN].copy_from_slice(&block_number.to_be_bytes());
    id
}

/// Decode the block number held in the first four bytes of an identifier.
pub fn decode_identifier(id: &[u8]) -> Result<u32, DaError> {
    invariant_identifier_length(id)?;
    let mut bytes = [0u8; BLOCK_NUMBER_LEN];
    bytes.copy_from_slice(&id[..BLOCK_NUMBER_LEN]);
    Ok(u32::from_be_bytes(bytes))
}

/// Convert a transaction reference into proof bytes.
pub fn encode_proof(transaction_reference: &str) -> Proof {
    transaction_reference.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_identifier_layout() {
        assert_eq!(encode_identifier(42), [0, 0, 0, 42, 0, 0, 0, 0]);
        assert_eq!(encode_identifier(0x0102_0304), [1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_reads_first_four_bytes() {
        assert_eq!(decode_identifier(&[0, 0, 0, 43, 9, 9, 9, 9]).unwrap(), 43);
        assert_eq!(decode_identifier(&[0, 0, 1, 0]).unwrap(), 256);
    }

    #[test]
    fn test_decode_short_identifier_fails() {
        let result = decode_identifier(&[0, 42]);
        assert!(matches!(
            result,
            Err(DaError::MalformedIdentifier { got: 2, .. })
        ));
    }

    #[test]
    fn test_encode_proof_is_raw_bytes() {
        assert_eq!(
            encode_proof("mocked_transaction_hash"),
            b"mocked_transaction_hash".to_vec()
        );
        assert!(encode_proof("").is_empty());
    }

    #[test]
    fn test_same_block_same_identifier() {
        assert_eq!(encode_identifier(7), encode_identifier(7));
    }

    proptest! {
        #[test]
        fn prop_identifier_roundtrip(n in any::<u32>()) {
            prop_assert_eq!(decode_identifier(&encode_identifier(n)).unwrap(), n);
        }
    }
}
