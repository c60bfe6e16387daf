//! # Avail DA Service
//!
//! Application service implementing `DataAvailabilityApi` on top of the
//! submission coordinator and the retrieval engine.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;

use super::retrieval::RetrievalEngine;
use super::submission::SubmissionCoordinator;
use crate::adapters::{HttpLightClient, TokioSleeper};
use crate::config::AvailDaConfig;
use crate::domain::{encode_identifier, Blob, Commitment, DaError, Identifier, Proof};
use crate::ports::{DataAvailabilityApi, LightClientTransport, Sleeper, SubmitResult};

/// Avail DA service.
///
/// Stateless between calls; share it behind an `Arc`.
pub struct AvailDaService {
    submission: SubmissionCoordinator,
    retrieval: RetrievalEngine,
    max_blob_size: u64,
}

impl AvailDaService {
    /// Wire the service from explicit collaborators.
    pub fn new(
        config: &AvailDaConfig,
        transport: Arc<dyn LightClientTransport>,
        sleeper: Arc<dyn Sleeper>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            submission: SubmissionCoordinator::new(Arc::clone(&transport), config.lc_url.clone()),
            retrieval: RetrievalEngine::new(
                transport,
                sleeper,
                config.lc_url.clone(),
                config.retry.clone(),
                shutdown,
            ),
            max_blob_size: config.max_blob_size,
        }
    }

    /// Validate the config and connect to the light client over HTTP.
    pub fn connect(
        config: &AvailDaConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self, DaError> {
        config.validate()?;
        let transport = HttpLightClient::new(config.request_timeout())?;
        info!(
            app_id = config.app_id,
            "[avail-da] Using light client at {}", config.lc_url
        );
        Ok(Self::new(
            config,
            Arc::new(transport),
            Arc::new(TokioSleeper),
            shutdown,
        ))
    }
}

#[async_trait]
impl DataAvailabilityApi for AvailDaService {
    async fn submit(&self, blobs: Vec<Blob>) -> Result<SubmitResult, DaError> {
        self.submission.submit(blobs).await
    }

    async fn get(&self, identifiers: &[Identifier]) -> Result<Vec<Blob>, DaError> {
        self.retrieval.retrieve_blobs(identifiers).await
    }

    async fn get_ids(&self, height: u64) -> Result<Vec<Identifier>, DaError> {
        // Heights above u32::MAX wrap; the mapping is a placeholder until
        // heights are tracked per block.
        Ok(vec![encode_identifier(height as u32).to_vec()])
    }

    async fn get_proofs(&self, identifiers: &[Identifier]) -> Result<Vec<Proof>, DaError> {
        self.retrieval.retrieve_proofs(identifiers).await
    }

    async fn commit(&self, _blobs: &[Blob]) -> Result<Vec<Commitment>, DaError> {
        Ok(Vec::new())
    }

    async fn validate(
        &self,
        _identifiers: &[Identifier],
        _proofs: &[Proof],
    ) -> Result<Vec<bool>, DaError> {
        Ok(Vec::new())
    }

    fn max_blob_size(&self) -> u64 {
        self.max_blob_size
    }
}
