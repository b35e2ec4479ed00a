//! Delta Sharing profile loading.
//!
//! A profile is a small JSON document:
//!
//! ```json
//! {
//!   "shareCredentialsVersion": 1,
//!   "endpoint": "https://sharing.example.com/delta-sharing/",
//!   "bearerToken": "<token>",
//!   "expirationTime": "2026-12-31T00:00:00.0Z"
//! }
//! ```
//!
//! `endpoint` and `bearerToken` are mandatory. Loading happens before any
//! network call, so every failure here is a configuration error.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default profile location, relative to the working directory.
pub const DEFAULT_PROFILE_PATH: &str = "credentials/config.share";

/// Errors raised while loading a sharing profile.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The profile file could not be read.
    #[error("Failed to read credentials file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile is not valid JSON.
    #[error("Failed to parse credentials file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory field is absent or empty.
    #[error("Credentials file {} is missing required field '{field}'", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    /// The endpoint is not an absolute http(s) URL.
    #[error("Credentials file {} has an invalid endpoint '{endpoint}': {reason}", path.display())]
    InvalidEndpoint {
        path: PathBuf,
        endpoint: String,
        reason: String,
    },
}

/// Raw profile as stored on disk. Every field is optional here so that
/// missing fields produce a named error instead of a serde message.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFile {
    share_credentials_version: Option<u32>,
    endpoint: Option<String>,
    bearer_token: Option<String>,
    expiration_time: Option<DateTime<Utc>>,
}

/// Validated sharing credentials. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    endpoint: String,
    bearer_token: String,
    expiration_time: Option<DateTime<Utc>>,
    share_credentials_version: Option<u32>,
}

impl Credentials {
    /// Build credentials directly, validating the endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let endpoint = endpoint.into();
        let bearer_token = bearer_token.into();
        Self::validate(Path::new("<inline>"), Some(endpoint), Some(bearer_token), None, None)
    }

    /// Parse a profile document. `origin` is only used in error messages.
    pub fn from_json_str(origin: &Path, json: &str) -> Result<Self, CredentialsError> {
        let raw: ProfileFile =
            serde_json::from_str(json).map_err(|source| CredentialsError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        Self::validate(
            origin,
            raw.endpoint,
            raw.bearer_token,
            raw.expiration_time,
            raw.share_credentials_version,
        )
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(path, &contents)
    }

    fn validate(
        path: &Path,
        endpoint: Option<String>,
        bearer_token: Option<String>,
        expiration_time: Option<DateTime<Utc>>,
        share_credentials_version: Option<u32>,
    ) -> Result<Self, CredentialsError> {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| CredentialsError::MissingField {
                path: path.to_path_buf(),
                field: "endpoint",
            })?;

        let bearer_token = bearer_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CredentialsError::MissingField {
                path: path.to_path_buf(),
                field: "bearerToken",
            })?;

        let parsed = Url::parse(&endpoint).map_err(|e| CredentialsError::InvalidEndpoint {
            path: path.to_path_buf(),
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CredentialsError::InvalidEndpoint {
                path: path.to_path_buf(),
                endpoint,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bearer_token,
            expiration_time,
            share_credentials_version,
        })
    }

    /// Sharing endpoint without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub const fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.expiration_time
    }

    pub const fn share_credentials_version(&self) -> Option<u32> {
        self.share_credentials_version
    }

    /// Whether the profile declares an expiry that has already passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|exp| exp <= now)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("bearer_token", &"<redacted>")
            .field("expiration_time", &self.expiration_time)
            .field("share_credentials_version", &self.share_credentials_version)
            .finish()
    }
}

/// Port for anything that can supply credentials.
pub trait CredentialSource: Send + Sync {
    /// Load credentials from the given location.
    fn load(&self, path: &Path) -> Result<Credentials, CredentialsError>;
}

/// Reads profiles from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileFileSource;

impl CredentialSource for ProfileFileSource {
    fn load(&self, path: &Path) -> Result<Credentials, CredentialsError> {
        let credentials = Credentials::load(path)?;
        if credentials.is_expired_at(Utc::now()) {
            tracing::warn!(
                path = %path.display(),
                expiration = ?credentials.expiration_time(),
                "Sharing profile has expired; the server will likely reject the token"
            );
        }
        Ok(credentials)
    }
}
