//! Public configuration for the sharing client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal endpoint representation is derived from this.

use std::fmt;
use std::time::Duration;

use shareprobe_core::Credentials;

/// Configuration for the Delta Sharing client.
///
/// # Example
///
/// ```
/// use shareprobe_client::SharingClientConfig;
/// use std::time::Duration;
///
/// let config = SharingClientConfig::new("https://sharing.example.com/delta-sharing", "token")
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Clone)]
pub struct SharingClientConfig {
    /// Sharing endpoint (trailing slash optional)
    pub(crate) endpoint: String,
    /// Bearer token sent with every request
    pub(crate) bearer_token: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl SharingClientConfig {
    /// Create a configuration for the given endpoint and token.
    pub fn new(endpoint: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: bearer_token.into(),
            user_agent: concat!("shareprobe/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a configuration from a loaded sharing profile.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(credentials.endpoint(), credentials.bearer_token())
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl fmt::Debug for SharingClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharingClientConfig")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}
