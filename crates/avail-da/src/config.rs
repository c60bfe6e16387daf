//! # Avail DA Configuration
//!
//! Configuration for the adapter: light-client endpoint, app scoping and
//! the retrieval retry policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{
    DaError, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BLOB_SIZE, DEFAULT_RETRY_BACKOFF,
};

/// Retry policy applied while a block answers "Processing block".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Fixed wait between attempts, in seconds.
    pub backoff_secs: u64,
    /// Maximum requests for one identifier, first attempt included.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff_secs: DEFAULT_RETRY_BACKOFF.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Backoff as a `Duration`.
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

/// Adapter configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailDaConfig {
    /// Light client API base, e.g. `http://localhost:8000/v2`.
    pub lc_url: String,

    /// Application id the light client submits under.
    #[serde(rename = "app_ID", alias = "app_id")]
    pub app_id: u32,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Advertised maximum blob size in bytes.
    pub max_blob_size: u64,

    /// Retrieval retry policy.
    pub retry: RetryPolicy,
}

impl Default for AvailDaConfig {
    fn default() -> Self {
        Self {
            lc_url: "http://localhost:8000/v2".to_string(),
            app_id: 0,
            request_timeout_secs: 30,
            max_blob_size: DEFAULT_MAX_BLOB_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

impl AvailDaConfig {
    /// Create a config for testing (no real waiting, few retries).
    pub fn for_testing() -> Self {
        Self {
            lc_url: "http://localhost:9000/v2".to_string(),
            app_id: 1,
            request_timeout_secs: 5,
            max_blob_size: DEFAULT_MAX_BLOB_SIZE,
            retry: RetryPolicy {
                backoff_secs: 0,
                max_attempts: 5,
            },
        }
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check the endpoint parses, requests can complete and the retry
    /// ceiling is usable.
    pub fn validate(&self) -> Result<(), DaError> {
        Url::parse(&self.lc_url).map_err(|e| DaError::InvalidEndpoint {
            url: self.lc_url.clone(),
            reason: e.to_string(),
        })?;

        if self.request_timeout_secs == 0 {
            return Err(DaError::InvalidConfig {
                field: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(DaError::InvalidConfig {
                field: "retry.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AvailDaConfig::default();
        assert_eq!(config.retry.backoff(), Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 360);
        assert_eq!(config.max_blob_size, 512 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = AvailDaConfig::for_testing();
        assert_eq!(config.retry.backoff_secs, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_app_id_key() {
        let json = r#"{"app_ID": 1, "lc_url": "http://localhost:8000/v2"}"#;
        let config: AvailDaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.app_id, 1);
        assert_eq!(config.lc_url, "http://localhost:8000/v2");
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_invalid_lc_url() {
        let config = AvailDaConfig {
            lc_url: "localhost without scheme".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DaError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = AvailDaConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(DaError::InvalidConfig {
                field: "retry.max_attempts",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let config = AvailDaConfig {
            request_timeout_secs: 0,
            ..AvailDaConfig::for_testing()
        };
        assert!(matches!(
            config.validate(),
            Err(DaError::InvalidConfig {
                field: "request_timeout_secs",
                ..
            })
        ));
    }
}
