//! Internal error types for sharing operations.
//!
//! These errors are internal to `shareprobe-client` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

/// Result type alias for sharing operations.
pub type SharingResult<T> = Result<T, SharingError>;

/// Errors related to Delta Sharing API operations.
#[derive(Debug, Error)]
pub enum SharingError {
    /// API request failed with an HTTP error status.
    #[error("Sharing API request failed with status {status}: {url}{}", detail_suffix(.message.as_deref()))]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Server-provided error message, if any
        message: Option<String>,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from sharing API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The endpoint URL cannot have path segments appended.
    #[error("Endpoint '{url}' cannot be used as a base URL")]
    CannotBeABase {
        /// The offending URL
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A header value (usually the bearer token) is not valid.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn detail_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(" ({m})")).unwrap_or_default()
}
