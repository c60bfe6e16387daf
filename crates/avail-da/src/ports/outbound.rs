//! # Outbound Ports
//!
//! Traits for external dependencies (light-client transport, clock).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use url::Url;

use crate::domain::{
    BlockDataResponse, DaError, RetrievalRecord, SubmissionRecord, SubmitRequest,
    NOT_FOUND_SENTINEL, PROCESSING_SENTINEL,
};

/// Light-client transport - outbound port.
///
/// Implementations return the raw response body whatever the HTTP status;
/// only connection level failures are errors.
#[async_trait]
pub trait LightClientTransport: Send + Sync {
    /// POST a JSON body.
    async fn post_json(&self, url: Url, body: serde_json::Value) -> Result<String, DaError>;

    /// GET a URL.
    async fn get(&self, url: Url) -> Result<String, DaError>;
}

/// Clock abstraction for retry backoff - outbound port.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the calling task.
    async fn sleep(&self, duration: Duration);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Sleeper that returns immediately and records what it was asked to wait.
#[derive(Debug, Default)]
pub struct InstantSleeper {
    requested: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    /// Number of sleeps requested so far.
    pub fn sleeps(&self) -> usize {
        self.requested.lock().len()
    }

    /// Durations requested so far, in call order.
    pub fn durations(&self) -> Vec<Duration> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().push(duration);
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
struct MockChain {
    next_block: u32,
    submitted: usize,
    assignments: HashMap<String, (u32, String)>,
    failing: HashSet<String>,
    blocks: BTreeMap<u32, Vec<RetrievalRecord>>,
    raw_blocks: HashMap<u32, String>,
    processing: HashMap<u32, u32>,
}

/// In-memory light client.
///
/// Speaks the same body formats as the real `/v2` API: unknown blocks
/// answer `Not found`, blocks marked as processing answer
/// `Processing block` a configured number of times.
pub struct MockLightClient {
    chain: Mutex<MockChain>,
    submit_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl Default for MockLightClient {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MockLightClient {
    /// Create a mock whose unassigned submissions land from `first_block` on.
    pub fn new(first_block: u32) -> Self {
        Self {
            chain: Mutex::new(MockChain {
                next_block: first_block,
                ..Default::default()
            }),
            submit_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
        }
    }

    /// Pin a blob to a block number and transaction reference.
    pub fn assign(&self, blob: &[u8], block_number: u32, tx_hash: &str) {
        self.chain
            .lock()
            .assignments
            .insert(STANDARD.encode(blob), (block_number, tx_hash.to_string()));
    }

    /// Fail every submission of this blob with a transport error.
    pub fn fail_on(&self, blob: &[u8]) {
        self.chain.lock().failing.insert(STANDARD.encode(blob));
    }

    /// Answer `Processing block` for the next `times` queries of a block.
    pub fn set_processing(&self, block_number: u32, times: u32) {
        self.chain.lock().processing.insert(block_number, times);
    }

    /// Serve a fixed body for a block.
    pub fn set_raw_block(&self, block_number: u32, body: &str) {
        self.chain
            .lock()
            .raw_blocks
            .insert(block_number, body.to_string());
    }

    /// Store a data transaction directly, bypassing submission.
    pub fn insert_record(&self, block_number: u32, record: RetrievalRecord) {
        self.chain
            .lock()
            .blocks
            .entry(block_number)
            .or_default()
            .push(record);
    }

    /// Submit requests received.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Block data requests received.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn handle_submit(&self, body: serde_json::Value) -> Result<String, DaError> {
        let request: SubmitRequest =
            serde_json::from_value(body).map_err(|e| DaError::Decode(e.to_string()))?;

        let mut guard = self.chain.lock();
        let chain = &mut *guard;
        if chain.failing.contains(&request.data) {
            return Err(DaError::Transport("mock light client refused".to_string()));
        }

        chain.submitted += 1;
        let (block_number, tx_hash) = match chain.assignments.get(&request.data).cloned() {
            Some(assigned) => assigned,
            None => {
                let block = chain.next_block;
                chain.next_block = chain.next_block.wrapping_add(1);
                (block, format!("mock_tx_{}", chain.submitted))
            }
        };

        let records = chain.blocks.entry(block_number).or_default();
        let tx_index = records.len() as u32;
        records.push(RetrievalRecord {
            data: request.data,
            extrinsic: tx_hash.clone(),
        });

        let record = SubmissionRecord {
            block_number,
            block_hash: format!("mock_block_hash_{}", block_number),
            tx_hash,
            tx_index,
        };
        serde_json::to_string(&record).map_err(|e| DaError::Decode(e.to_string()))
    }

    fn handle_block_data(&self, block_number: u32) -> Result<String, DaError> {
        let mut guard = self.chain.lock();
        let chain = &mut *guard;

        if let Some(remaining) = chain.processing.get_mut(&block_number) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(PROCESSING_SENTINEL.to_string());
            }
        }

        if let Some(raw) = chain.raw_blocks.get(&block_number) {
            return Ok(raw.clone());
        }

        match chain.blocks.get(&block_number) {
            Some(records) => serde_json::to_string(&BlockDataResponse {
                block_number,
                data_transactions: records.clone(),
            })
            .map_err(|e| DaError::Decode(e.to_string())),
            None => Ok(NOT_FOUND_SENTINEL.to_string()),
        }
    }
}

#[async_trait]
impl LightClientTransport for MockLightClient {
    async fn post_json(&self, url: Url, body: serde_json::Value) -> Result<String, DaError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if !url.path().ends_with("/submit") {
            return Ok(NOT_FOUND_SENTINEL.to_string());
        }
        tokio::task::yield_now().await;
        self.handle_submit(body)
    }

    async fn get(&self, url: Url) -> Result<String, DaError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
        let block_number = segments
            .iter()
            .position(|s| *s == "blocks")
            .and_then(|i| segments.get(i + 1))
            .and_then(|n| n.parse::<u32>().ok());

        match block_number {
            Some(n) => self.handle_block_data(n),
            None => Ok(NOT_FOUND_SENTINEL.to_string()),
        }
    }
}
