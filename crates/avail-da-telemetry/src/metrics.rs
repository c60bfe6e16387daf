//! Prometheus metrics for the Avail DA adapter.
//!
//! All metrics follow the naming convention: `avail_da_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// JSON-RPC requests by method and outcome (ok/error)
    pub static ref RPC_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("avail_da_rpc_requests_total", "JSON-RPC requests by method and outcome"),
        &["method", "outcome"]
    ).expect("metric creation failed");

    /// JSON-RPC handling time by method
    pub static ref RPC_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "avail_da_rpc_duration_seconds",
            "Time spent handling JSON-RPC requests"
        ).buckets(exponential_buckets(0.001, 2.0, 16).expect("valid buckets")),
        &["method"]
    ).expect("metric creation failed");

    /// Blobs accepted by the light client
    pub static ref BLOBS_SUBMITTED: Counter = Counter::new(
        "avail_da_blobs_submitted_total",
        "Total blobs accepted by the light client"
    ).expect("metric creation failed");

    /// Blobs returned to callers
    pub static ref BLOBS_RETRIEVED: Counter = Counter::new(
        "avail_da_blobs_retrieved_total",
        "Total blobs returned by get"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(RPC_REQUESTS.clone()),
        Box::new(RPC_DURATION.clone()),
        Box::new(BLOBS_SUBMITTED.clone()),
        Box::new(BLOBS_RETRIEVED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Record one JSON-RPC request outcome.
pub fn record_rpc(method: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    RPC_REQUESTS.with_label_values(&[method, outcome]).inc();
}

/// Start timing a JSON-RPC method. Observation happens on drop.
pub fn time_rpc(method: &str) -> HistogramTimer {
    HistogramTimer::new(&RPC_DURATION.with_label_values(&[method]))
}
