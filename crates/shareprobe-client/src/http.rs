//! HTTP backend abstraction for the Delta Sharing API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with the sharing headers installed as client defaults.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::SharingClientConfig;
use crate::error::{SharingError, SharingResult};
use crate::models::ErrorBody;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can talk JSON to the sharing server.
///
/// This is an implementation detail - external code should use the
/// `SharingClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> SharingResult<T>;

    /// POST a JSON body and return the raw response text.
    ///
    /// The query endpoint may answer with newline-delimited JSON, so decoding
    /// is left to the caller.
    async fn post_json<B: Serialize + Send + Sync>(
        &self,
        url: &Url,
        body: &B,
    ) -> SharingResult<String>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// No retries: a failed request is reported once and the caller decides.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &SharingClientConfig) -> SharingResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Turn a non-success response into `ApiRequestFailed`.
    async fn check_status(
        response: reqwest::Response,
        url: &Url,
    ) -> SharingResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.describe());

        Err(SharingError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> SharingResult<T> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.as_str()).send().await?;
        let response = Self::check_status(response, url).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + Send + Sync>(
        &self,
        url: &Url,
        body: &B,
    ) -> SharingResult<String> {
        tracing::debug!(url = %url, "POST");
        let payload = serde_json::to_vec(body)?;
        let response = self.client.post(url.as_str()).body(payload).send().await?;
        let response = Self::check_status(response, url).await?;
        Ok(response.text().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = SharingClientConfig::new("https://sharing.example.com", "token");
        assert!(ReqwestBackend::new(&config).is_ok());
    }

    #[test]
    fn test_reqwest_backend_rejects_bad_token() {
        let config = SharingClientConfig::new("https://sharing.example.com", "bad\ntoken");
        assert!(matches!(
            ReqwestBackend::new(&config),
            Err(SharingError::InvalidHeader(_))
        ));
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_fake_backend_returns_canned_response() {
            let backend = FakeBackend::new().with_json("/shares", json!({"items": []}));

            let url = Url::parse("https://example.com/api/shares").unwrap();
            let result: serde_json::Value = backend.get_json(&url).await.unwrap();

            assert_eq!(result, json!({"items": []}));
        }

        #[tokio::test]
        async fn test_fake_backend_prefers_longest_suffix() {
            let backend = FakeBackend::new()
                .with_json("/schemas", json!({"which": "short"}))
                .with_json("/shares/a/schemas", json!({"which": "long"}));

            let url = Url::parse("https://example.com/shares/a/schemas").unwrap();
            let result: serde_json::Value = backend.get_json(&url).await.unwrap();
            assert_eq!(result["which"], "long");
        }

        #[tokio::test]
        async fn test_fake_backend_returns_404_for_unknown_url() {
            let backend = FakeBackend::new();
            let url = Url::parse("https://example.com/unknown").unwrap();

            let result: SharingResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(
                result,
                Err(SharingError::ApiRequestFailed { status: 404, .. })
            ));
        }

        #[tokio::test]
        async fn test_fake_backend_records_post_body() {
            let backend = FakeBackend::new()
                .with_response("/query", CannedResponse::Text("{\"addFiles\": []}".into()));
            let requests = backend.requests();

            let url = Url::parse("https://example.com/t/query").unwrap();
            backend
                .post_json(&url, &json!({"predicateHints": []}))
                .await
                .unwrap();

            let recorded = requests.lock().unwrap();
            assert_eq!(recorded.len(), 1);
            assert_eq!(recorded[0].method, "POST");
            assert_eq!(recorded[0].body, Some(json!({"predicateHints": []})));
        }
    }
}
