//! JSON-RPC method dispatch.

use std::sync::Arc;

use avail_da::DataAvailabilityApi;
use avail_da_telemetry::{record_rpc, time_rpc, BLOBS_RETRIEVED, BLOBS_SUBMITTED};
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;
use super::types::{from_hex_list, to_hex_list, HexBytes, SubmitResponse};

/// Methods served; anything else is reported under `unknown` in metrics.
pub const METHODS: &[&str] = &[
    "da_submit",
    "da_get",
    "da_getIds",
    "da_getProofs",
    "da_commit",
    "da_validate",
    "da_maxBlobSize",
];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Blob API the methods are served from.
    pub service: Arc<dyn DataAvailabilityApi>,
}

impl AppState {
    /// Wrap a service.
    pub fn new(service: Arc<dyn DataAvailabilityApi>) -> Self {
        Self { service }
    }
}

/// Route JSON-RPC method to the blob API.
///
/// | Method | Params | Result |
/// |--------|--------|--------|
/// | `da_submit` | `[blobs]` | `{ids, proofs}` |
/// | `da_get` | `[ids]` | `blobs` |
/// | `da_getIds` | `[height]` | `ids` |
/// | `da_getProofs` | `[ids]` | `proofs` |
/// | `da_commit` | `[blobs]` | `[]` |
/// | `da_validate` | `[ids, proofs]` | `[]` |
/// | `da_maxBlobSize` | none | number |
pub async fn route_method(
    state: &AppState,
    method: &str,
    params: Option<&Value>,
) -> Result<Value, ApiError> {
    match method {
        "da_submit" => {
            let blobs: Vec<HexBytes> = parse_param(params, 0)?;
            let result = state.service.submit(from_hex_list(blobs)).await?;
            BLOBS_SUBMITTED.inc_by(result.identifiers.len() as f64);
            to_value(SubmitResponse {
                ids: to_hex_list(result.identifiers),
                proofs: to_hex_list(result.proofs),
            })
        }

        "da_get" => {
            let ids: Vec<HexBytes> = parse_param(params, 0)?;
            let blobs = state.service.get(&from_hex_list(ids)).await?;
            BLOBS_RETRIEVED.inc_by(blobs.len() as f64);
            to_value(to_hex_list(blobs))
        }

        "da_getIds" => {
            let height: u64 = parse_param(params, 0)?;
            to_value(to_hex_list(state.service.get_ids(height).await?))
        }

        "da_getProofs" => {
            let ids: Vec<HexBytes> = parse_param(params, 0)?;
            to_value(to_hex_list(
                state.service.get_proofs(&from_hex_list(ids)).await?,
            ))
        }

        "da_commit" => {
            let blobs: Vec<HexBytes> = parse_param(params, 0)?;
            to_value(to_hex_list(
                state.service.commit(&from_hex_list(blobs)).await?,
            ))
        }

        "da_validate" => {
            let ids: Vec<HexBytes> = parse_param(params, 0)?;
            let proofs: Vec<HexBytes> = parse_param(params, 1)?;
            to_value(
                state
                    .service
                    .validate(&from_hex_list(ids), &from_hex_list(proofs))
                    .await?,
            )
        }

        "da_maxBlobSize" => to_value(state.service.max_blob_size()),

        _ => Err(ApiError::method_not_found(method)),
    }
}

/// Process a single JSON-RPC request object.
pub async fn process_single_request(state: &AppState, request: &Value) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);

    let Some(method) = request.get("method").and_then(|m| m.as_str()) else {
        return error_response(id, &ApiError::invalid_request("missing method"));
    };
    let params = request.get("params");

    let label = METHODS
        .iter()
        .copied()
        .find(|m| *m == method)
        .unwrap_or("unknown");
    let _timer = time_rpc(label);
    let result = route_method(state, method, params).await;
    record_rpc(label, result.is_ok());

    match result {
        Ok(value) => serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": value
        }),
        Err(e) => {
            debug!("{} failed: {}", method, e);
            error_response(id, &e)
        }
    }
}

/// Handle a raw request body, single or batch.
pub async fn handle_body(state: &AppState, body: &str) -> Value {
    let request: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return error_response(Value::Null, &ApiError::parse_error(e.to_string())),
    };

    match request {
        Value::Array(requests) => {
            if requests.is_empty() {
                return error_response(Value::Null, &ApiError::invalid_request("empty batch"));
            }
            let mut responses = Vec::with_capacity(requests.len());
            for req in &requests {
                responses.push(process_single_request(state, req).await);
            }
            Value::Array(responses)
        }
        single => process_single_request(state, &single).await,
    }
}

fn error_response(id: Value, error: &ApiError) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error.to_json()
    })
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

fn param_at(params: Option<&Value>, index: usize) -> Option<&Value> {
    params.and_then(|p| {
        if p.is_array() {
            p.get(index)
        } else if index == 0 {
            Some(p)
        } else {
            None
        }
    })
}

/// Parse a required parameter from JSON-RPC params array.
fn parse_param<T: serde::de::DeserializeOwned>(
    params: Option<&Value>,
    index: usize,
) -> Result<T, ApiError> {
    let param = param_at(params, index)
        .ok_or_else(|| ApiError::invalid_params(format!("missing parameter at index {}", index)))?;

    serde_json::from_value(param.clone()).map_err(|e| {
        ApiError::invalid_params(format!("invalid parameter at index {}: {}", index, e))
    })
}
