/// Unified error types for Vidrelay.
use thiserror::Error;

use crate::models::AvailableStreams;

/// Top-level error type for resolver and relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Metadata fetch answered with a non-success status.
    #[error("Failed to fetch video info ({0})")]
    UpstreamStatus(u16),

    /// Media fetch answered with a non-success status.
    #[error("Failed to fetch video stream")]
    StreamUnavailable(u16),

    /// Metadata parsed fine but no candidate passed the selection policy.
    #[error("MP4 stream not found")]
    NoMatchingStream(Box<AvailableStreams>),

    #[error("Missing {0} param")]
    MissingParameter(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// HTTP status the caller should see for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::NoMatchingStream(_) => 404,
            RelayError::MissingParameter(_) => 400,
            RelayError::UpstreamStatus(_)
            | RelayError::StreamUnavailable(_)
            | RelayError::Http(_)
            | RelayError::Json(_) => 500,
        }
    }

    /// Whether this is an unexpected failure (network, decoding) rather than
    /// one of the expected outcomes of a request.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, RelayError::Http(_) | RelayError::Json(_))
    }
}

/// Result type alias for Vidrelay operations.
pub type RelayResult<T> = Result<T, RelayError>;
