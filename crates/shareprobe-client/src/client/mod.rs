//! Delta Sharing client for listing the share hierarchy and querying tables.

mod listing;
mod query;

use shareprobe_core::{Credentials, SharingPortError, SharingPortResult};
use url::Url;

use crate::config::SharingClientConfig;
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default sharing client using the reqwest HTTP backend.
pub type DefaultSharingClient = SharingClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for one Delta Sharing endpoint.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultSharingClient` for production code.
pub struct SharingClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) endpoint: Url,
    pub(crate) endpoint_display: String,
}

impl DefaultSharingClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &SharingClientConfig) -> SharingPortResult<Self> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let backend = ReqwestBackend::new(config).map_err(|e| SharingPortError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self {
            backend,
            endpoint_display: config.endpoint.trim_end_matches('/').to_string(),
            endpoint,
        })
    }

    /// Create a client straight from a loaded sharing profile.
    pub fn from_credentials(credentials: &Credentials) -> SharingPortResult<Self> {
        Self::new(&SharingClientConfig::from_credentials(credentials))
    }
}

impl<B: HttpBackend> SharingClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(endpoint: &str, backend: B) -> Self {
        Self {
            backend,
            endpoint: Url::parse(endpoint).unwrap(),
            endpoint_display: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> SharingPortResult<Url> {
    let url = Url::parse(endpoint.trim()).map_err(|e| SharingPortError::Configuration {
        message: format!("invalid endpoint '{endpoint}': {e}"),
    })?;
    if url.cannot_be_a_base() {
        return Err(SharingPortError::Configuration {
            message: format!("endpoint '{endpoint}' cannot be used as a base URL"),
        });
    }
    Ok(url)
}
