//! Error types for the panel-data crate.

use thiserror::Error;

/// Errors raised while reading a submitted blood panel.
///
/// Every variant maps to a client error: the request is rejected before any
/// analysis runs.
#[derive(Error, Debug)]
pub enum PanelError {
    /// Body was not valid JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// One of `gender`, `age` or `testResults` is absent
    #[error("Missing required fields")]
    MissingFields,

    /// A field was present but had the wrong shape
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl PanelError {
    pub(crate) fn invalid(field: impl Into<String>, value: &serde_json::Value) -> Self {
        PanelError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PanelError>;
