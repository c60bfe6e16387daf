//! # Submission Coordinator
//!
//! Fans a batch of blobs out to the light client, one task per blob, and
//! gathers the outcomes in a single collector.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use url::Url;

use crate::algorithms::{build_submit_payload, build_submit_url, parse_submit_response};
use crate::domain::{encode_identifier, encode_proof, Blob, DaError, Identifier, Proof};
use crate::ports::{LightClientTransport, SubmitResult};

type UnitOutcome = Result<(Identifier, Proof), DaError>;

/// All-or-nothing batch submitter.
pub struct SubmissionCoordinator {
    transport: Arc<dyn LightClientTransport>,
    base_url: String,
}

impl SubmissionCoordinator {
    /// Create a coordinator posting to `{base_url}/submit`.
    pub fn new(transport: Arc<dyn LightClientTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Submit every blob concurrently.
    ///
    /// Identifiers and proofs come back in completion order. If any unit
    /// fails, or a unit ends without reporting, the whole batch fails and
    /// no identifiers are returned. Blobs already accepted by the light
    /// client stay accepted.
    pub async fn submit(&self, blobs: Vec<Blob>) -> Result<SubmitResult, DaError> {
        let total = blobs.len();
        if total == 0 {
            return Ok(SubmitResult::default());
        }

        let url = build_submit_url(&self.base_url)?;
        let (tx, mut rx) = mpsc::channel::<UnitOutcome>(total);

        for (index, blob) in blobs.into_iter().enumerate() {
            let tx = tx.clone();
            let transport = Arc::clone(&self.transport);
            let url = url.clone();
            tokio::spawn(async move {
                let outcome = submit_one(transport.as_ref(), url, &blob).await;
                if let Err(e) = &outcome {
                    warn!("[avail-da] Blob {} of {} failed: {}", index + 1, total, e);
                }
                // Receiver only goes away if the caller was dropped.
                let _ = tx.send(outcome).await;
            });
        }
        // The channel closes once every unit has reported or died.
        drop(tx);

        let mut result = SubmitResult::default();
        let mut received = 0usize;
        let mut failed = 0usize;
        let mut first_error: Option<DaError> = None;

        while let Some(outcome) = rx.recv().await {
            received += 1;
            match outcome {
                Ok((identifier, proof)) => {
                    result.identifiers.push(identifier);
                    result.proofs.push(proof);
                }
                Err(e) => {
                    failed += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        let missing = total - received;
        if failed + missing > 0 {
            let cause = first_error.unwrap_or_else(|| {
                DaError::Transport(format!(
                    "{} submission task(s) exited without a result",
                    missing
                ))
            });
            error!(
                failed = failed + missing,
                total, "[avail-da] Submission batch failed: {}", cause
            );
            return Err(DaError::SubmissionFailed {
                failed: failed + missing,
                total,
                cause: Box::new(cause),
            });
        }

        debug!("[avail-da] Submitted {} blob(s)", total);
        Ok(result)
    }
}

async fn submit_one(
    transport: &dyn LightClientTransport,
    url: Url,
    blob: &[u8],
) -> UnitOutcome {
    let payload = serde_json::to_value(build_submit_payload(blob))
        .map_err(|e| DaError::Decode(e.to_string()))?;
    let body = transport.post_json(url, payload).await?;
    let record = parse_submit_response(&body)?;

    debug!(
        block_number = record.block_number,
        tx_index = record.tx_index,
        "[avail-da] Blob included in block {}",
        record.block_number
    );
    Ok((
        encode_identifier(record.block_number).to_vec(),
        encode_proof(&record.tx_hash),
    ))
}
