//! JSON-RPC 2.0 errors.

use avail_da::DaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard JSON-RPC 2.0 error codes
pub mod codes {
    // JSON-RPC 2.0 standard errors (-32700 to -32600)
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Server errors (-32000 to -32099)
    pub const SERVER_ERROR: i32 = -32000;
    pub const RESOURCE_UNAVAILABLE: i32 = -32002;
    pub const TIMEOUT: i32 = -32006;
}

/// RPC error with JSON-RPC code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// JSON-RPC error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional additional data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Parse error - invalid JSON
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    /// Invalid request - not a valid JSON-RPC request
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_REQUEST,
            format!("Invalid request: {}", details.into()),
        )
    }

    /// Method not found
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    /// Invalid parameters
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid params: {}", details.into()),
        )
    }

    /// Internal error
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            codes::INTERNAL_ERROR,
            format!("Internal error: {}", details.into()),
        )
    }

    /// JSON body of the `error` member.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "code": self.code, "message": self.message })
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<DaError> for ApiError {
    fn from(err: DaError) -> Self {
        let message = err.to_string();
        match err {
            DaError::MalformedIdentifier { .. } => Self::invalid_params(message),
            DaError::SubmissionFailed { failed, total, .. } => Self {
                code: codes::SERVER_ERROR,
                message,
                data: Some(serde_json::json!({ "failed": failed, "total": total })),
            },
            DaError::Transport(_) | DaError::Cancelled { .. } => {
                Self::new(codes::RESOURCE_UNAVAILABLE, message)
            }
            DaError::RetriesExhausted { .. } => Self::new(codes::TIMEOUT, message),
            DaError::Decode(_)
            | DaError::InvalidEndpoint { .. }
            | DaError::InvalidConfig { .. } => Self::new(codes::SERVER_ERROR, message),
        }
    }
}
