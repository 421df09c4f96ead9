//! Server configuration.
//!
//! Every field has a default, so the config file is optional and may set
//! any subset of keys:
//!
//! ```toml
//! bind = "0.0.0.0:8080"
//! artifacts_dir = "/srv/blood-report/model"
//! prediction_threshold = 0.9
//! log_filter = "info,server=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/demo";
pub const DEFAULT_LOG_FILTER: &str = "info,server=debug";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind: SocketAddr,
    /// Directory holding the model artifact files
    pub artifacts_dir: PathBuf,
    /// Positive-class probability a condition must exceed to be reported
    pub prediction_threshold: f64,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 5000))),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            prediction_threshold: ml_model::DEFAULT_THRESHOLD,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.prediction_threshold) {
            return Err(ConfigError::Invalid {
                field: "prediction_threshold".to_string(),
                message: format!("{} is outside [0, 1)", self.prediction_threshold),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_filter".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
