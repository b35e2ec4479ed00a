//! Error types for sharing port operations.

use thiserror::Error;

/// Errors from sharing port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SharingPortError {
    /// The share, schema or table does not exist (or is not visible).
    #[error("Not found: {resource}")]
    NotFound {
        /// What was requested
        resource: String,
    },

    /// The bearer token was rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server or client detail
        message: String,
    },

    /// API rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Network, timeout or unexpected HTTP status.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The server answered with something that does not match the protocol.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The client could not be configured.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for sharing port operations.
pub type SharingPortResult<T> = Result<T, SharingPortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SharingPortError::NotFound {
            resource: "share 'sales'".to_string(),
        };
        assert!(err.to_string().contains("sales"));

        let err = SharingPortError::InvalidResponse {
            message: "missing field `name`".to_string(),
        };
        assert!(err.to_string().contains("missing field"));
    }
}
