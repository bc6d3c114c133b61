//! Source error types

use thiserror::Error;

/// Errors that can occur while fetching the asset history
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("History endpoint unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not JSON of the expected payload shape
    #[error("Invalid payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Classify a transport error the way the dashboard reports it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Unavailable
        } else {
            FetchError::Request(err)
        }
    }
}
