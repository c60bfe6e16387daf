//! # Retrieval Engine
//!
//! Resolves identifiers to blobs one at a time. A block that is still
//! being processed by the light client is retried after a fixed backoff
//! until it resolves, the attempt ceiling is hit or shutdown is signalled.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::algorithms::{
    build_retrieval_url, classify_retrieval_response, decode_record_data, RetrievalResponse,
};
use crate::config::RetryPolicy;
use crate::domain::{
    decode_identifier, encode_proof, Blob, DaError, Identifier, Proof, RetrievalRecord,
};
use crate::ports::{LightClientTransport, Sleeper};

/// Sequential, cancellable block data reader.
pub struct RetrievalEngine {
    transport: Arc<dyn LightClientTransport>,
    sleeper: Arc<dyn Sleeper>,
    base_url: String,
    retry: RetryPolicy,
    shutdown: watch::Receiver<bool>,
}

impl RetrievalEngine {
    /// Create an engine. `shutdown` flipping to `true` aborts pending retries.
    pub fn new(
        transport: Arc<dyn LightClientTransport>,
        sleeper: Arc<dyn Sleeper>,
        base_url: impl Into<String>,
        retry: RetryPolicy,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            transport,
            sleeper,
            base_url: base_url.into(),
            retry,
            shutdown,
        }
    }

    /// Every blob of every block the identifiers point at, in identifier order.
    ///
    /// A data transaction whose payload is not valid base64 comes back as an
    /// empty blob and is logged; it does not fail the call.
    pub async fn retrieve_blobs(&self, identifiers: &[Identifier]) -> Result<Vec<Blob>, DaError> {
        let mut blobs = Vec::new();
        for (block_number, records) in self.resolve_all(identifiers).await? {
            for record in records {
                match decode_record_data(&record) {
                    Some(blob) => blobs.push(blob),
                    None => {
                        warn!(
                            block_number,
                            extrinsic = %record.extrinsic,
                            "[avail-da] Malformed base64 payload in block {}, returning empty blob",
                            block_number
                        );
                        blobs.push(Vec::new());
                    }
                }
            }
        }
        Ok(blobs)
    }

    /// Proofs of every data transaction, in the order `retrieve_blobs` yields blobs.
    pub async fn retrieve_proofs(
        &self,
        identifiers: &[Identifier],
    ) -> Result<Vec<Proof>, DaError> {
        Ok(self
            .resolve_all(identifiers)
            .await?
            .into_iter()
            .flat_map(|(_, records)| records)
            .map(|record| encode_proof(&record.extrinsic))
            .collect())
    }

    async fn resolve_all(
        &self,
        identifiers: &[Identifier],
    ) -> Result<Vec<(u32, Vec<RetrievalRecord>)>, DaError> {
        let mut shutdown = self.shutdown.clone();
        let mut resolved = Vec::with_capacity(identifiers.len());
        for id in identifiers {
            let block_number = decode_identifier(id)?;
            let records = self.fetch_block(block_number, &mut shutdown).await?;
            resolved.push((block_number, records));
        }
        Ok(resolved)
    }

    async fn fetch_block(
        &self,
        block_number: u32,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<Vec<RetrievalRecord>, DaError> {
        let url = build_retrieval_url(&self.base_url, block_number)?;
        let mut attempts: u32 = 0;

        loop {
            if *shutdown.borrow_and_update() {
                return Err(DaError::Cancelled { block_number });
            }

            attempts += 1;
            let body = self.transport.get(url.clone()).await?;

            match classify_retrieval_response(&body)? {
                RetrievalResponse::Ready(records) => {
                    debug!(
                        block_number,
                        attempts,
                        "[avail-da] Block {} returned {} data transaction(s)",
                        block_number,
                        records.len()
                    );
                    return Ok(records);
                }
                RetrievalResponse::NotFound => {
                    debug!("[avail-da] Block {} not found", block_number);
                    return Ok(Vec::new());
                }
                RetrievalResponse::Processing => {
                    if attempts >= self.retry.max_attempts {
                        return Err(DaError::RetriesExhausted {
                            block_number,
                            attempts,
                        });
                    }
                    debug!(
                        block_number,
                        attempts,
                        "[avail-da] Block {} still processing, retrying in {:?}",
                        block_number,
                        self.retry.backoff()
                    );
                    tokio::select! {
                        _ = self.sleeper.sleep(self.retry.backoff()) => {}
                        _ = shutdown_requested(shutdown) => {
                            return Err(DaError::Cancelled { block_number });
                        }
                    }
                }
            }
        }
    }
}

/// Resolves once shutdown is signalled. Never resolves if the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
