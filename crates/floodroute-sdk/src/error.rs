//! Errors returned by backend calls.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API base URL: {0}")]
    Url(String),
}
