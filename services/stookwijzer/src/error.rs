//! Error types for the advisory client.

use thiserror::Error;
use wms_common::time::TimeParseError;

/// Why a forecast could not be produced. No partial forecast accompanies any
/// of these.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] NetworkError),

    #[error("No model run available")]
    MissingModelRun,

    #[error("Unparseable model run timestamp: {0}")]
    TimestampParseFailure(#[from] TimeParseError),
}

impl AdvisoryError {
    /// True when the request was cut off by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AdvisoryError::NetworkFailure(e) if e.is_timeout())
    }
}

/// Failures talking to the feature-info endpoint.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Response is not feature-info JSON: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Response contains no features")]
    NoFeatures,
}

impl NetworkError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetworkError::Request(e) if e.is_timeout())
    }
}
