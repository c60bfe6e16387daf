//! Runtime configuration: `config.json` plus environment overrides.

use std::path::{Path, PathBuf};

use avail_da::{AvailDaConfig, DaError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "AVAIL_DA_CONFIG";

/// Config file read when `AVAIL_DA_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Io {
        /// Path tried
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for `RuntimeConfig`.
    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        /// Path tried
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// An override variable holds an unusable value.
    #[error("Invalid value {value:?} for {var}")]
    Env {
        /// Variable name
        var: String,
        /// Raw value
        value: String,
    },

    /// The adapter rejected the resulting configuration.
    #[error(transparent)]
    Invalid(#[from] DaError),
}

/// Process configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Adapter settings (`lc_url`, `app_ID`, retry policy...).
    #[serde(flatten)]
    pub da: AvailDaConfig,

    /// Listen address of the JSON-RPC server.
    #[serde(alias = "grpc_server_address", alias = "GRPCServerAddress")]
    pub rpc_address: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            da: AvailDaConfig::default(),
            rpc_address: "127.0.0.1:3000".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the file named by `AVAIL_DA_CONFIG` (or `config.json`),
    /// apply environment overrides and validate.
    ///
    /// A missing default `config.json` falls back to built-in defaults; a
    /// missing file named explicitly is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

        let mut config = if explicit.is_none() && !path.exists() {
            warn!("{} not found, using defaults", path.display());
            Self::default()
        } else {
            let config = Self::from_file(&path)?;
            info!("Loaded configuration from {}", path.display());
            config
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.da.validate()?;
        Ok(config)
    }

    /// Override fields from `AVAIL_DA_LC_URL`, `AVAIL_DA_APP_ID` and
    /// `AVAIL_DA_RPC_ADDRESS` as returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AVAIL_DA_LC_URL") {
            self.da.lc_url = url;
        }
        if let Some(raw) = lookup("AVAIL_DA_APP_ID") {
            self.da.app_id = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: "AVAIL_DA_APP_ID".to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(addr) = lookup("AVAIL_DA_RPC_ADDRESS") {
            self.rpc_address = addr;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_grpc_server_address_key() {
        let json = r#"{
            "app_ID": 7,
            "lc_url": "http://127.0.0.1:8000/v2",
            "GRPCServerAddress": "0.0.0.0:26650"
        }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.da.app_id, 7);
        assert_eq!(config.da.lc_url, "http://127.0.0.1:8000/v2");
        assert_eq!(config.rpc_address, "0.0.0.0:26650");
        assert_eq!(config.da.retry.max_attempts, 360);
    }

    #[test]
    fn test_parse_retry_section() {
        let json = r#"{"rpc_address": "127.0.0.1:4000", "retry": {"backoff_secs": 2}}"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rpc_address, "127.0.0.1:4000");
        assert_eq!(config.da.retry.backoff_secs, 2);
        assert_eq!(config.da.retry.max_attempts, 360);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("AVAIL_DA_LC_URL", "http://lc:8000/v2"),
            ("AVAIL_DA_APP_ID", "12"),
            ("AVAIL_DA_RPC_ADDRESS", "0.0.0.0:9999"),
        ]
        .into_iter()
        .collect();

        let mut config = RuntimeConfig::default();
        config
            .apply_overrides(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.da.lc_url, "http://lc:8000/v2");
        assert_eq!(config.da.app_id, 12);
        assert_eq!(config.rpc_address, "0.0.0.0:9999");
    }

    #[test]
    fn test_bad_app_id_override() {
        let mut config = RuntimeConfig::default();
        let err = config
            .apply_overrides(|var| (var == "AVAIL_DA_APP_ID").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = RuntimeConfig::from_file(Path::new("/nonexistent/avail-da.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
