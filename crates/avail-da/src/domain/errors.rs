//! # Domain Errors
//!
//! Error types for the Avail DA adapter.

use thiserror::Error;

/// Avail DA adapter error types.
#[derive(Debug, Error)]
pub enum DaError {
    /// Network or connection failure talking to the light client.
    /// Surfaced immediately, never retried by the adapter.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-sentinel response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Identifier too short to hold a block number.
    #[error("Malformed identifier: expected at least {required} bytes, got {got}")]
    MalformedIdentifier {
        /// Identifier length received
        got: usize,
        /// Minimum length required
        required: usize,
    },

    /// At least one blob of a submission batch failed.
    #[error("Submission failed for {failed} of {total} blobs: {cause}")]
    SubmissionFailed {
        /// Number of failed units
        failed: usize,
        /// Batch size
        total: usize,
        /// First failure observed by the collector
        #[source]
        cause: Box<DaError>,
    },

    /// Light client base URL does not produce a valid endpoint.
    #[error("Invalid endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// A configuration value the adapter cannot run with.
    #[error("Invalid configuration {field}: {reason}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Block stayed in "Processing block" past the retry ceiling.
    #[error("Block {block_number} still processing after {attempts} attempts")]
    RetriesExhausted {
        /// Block being retrieved
        block_number: u32,
        /// Attempts made
        attempts: u32,
    },

    /// Shutdown was signalled while waiting on the light client.
    #[error("Retrieval of block {block_number} cancelled")]
    Cancelled {
        /// Block being retrieved
        block_number: u32,
    },
}

impl DaError {
    /// Whether this error came from a submission batch.
    pub fn is_submission_failure(&self) -> bool {
        matches!(self, DaError::SubmissionFailed { .. })
    }
}

impl From<reqwest::Error> for DaError {
    fn from(err: reqwest::Error) -> Self {
        DaError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_identifier_error() {
        let err = DaError::MalformedIdentifier { got: 2, required: 4 };
        assert!(err.to_string().contains("at least 4 bytes, got 2"));
    }

    #[test]
    fn test_submission_failed_carries_cause() {
        let err = DaError::SubmissionFailed {
            failed: 1,
            total: 3,
            cause: Box::new(DaError::Transport("connection refused".to_string())),
        };
        let msg = err.to_string();
        assert!(msg.contains("1 of 3"));
        assert!(msg.contains("connection refused"));
        assert!(err.is_submission_failure());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_config_names_field() {
        let err = DaError::InvalidConfig {
            field: "retry.max_attempts",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration retry.max_attempts: must be at least 1"
        );
    }

    #[test]
    fn test_retries_exhausted_error() {
        let err = DaError::RetriesExhausted {
            block_number: 42,
            attempts: 3,
        };
        assert!(err.to_string().contains("42"));
        assert!(!err.is_submission_failure());
    }
}
