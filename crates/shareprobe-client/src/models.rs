//! Internal wire types for the Delta Sharing REST API.
//!
//! These types are internal to `shareprobe-client` and are not exposed to
//! consumers. External consumers should use the domain types defined in
//! `shareprobe-core`.

use serde::{Deserialize, Serialize};
use shareprobe_core::FileEntry;

// ============================================================================
// Listing
// ============================================================================

/// One page of a list endpoint (`/shares`, `/schemas`, `/tables`).
///
/// Servers omit `items` entirely for empty lists.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl<T> ListPage<T> {
    /// Take the items, logging when the server signalled more pages.
    pub fn into_items(self, url: &url::Url) -> Vec<T> {
        if let Some(token) = self.next_page_token.as_deref().filter(|t| !t.is_empty()) {
            tracing::warn!(
                url = %url,
                next_page_token = token,
                returned = self.items.len(),
                "Listing is paginated; only the first page is used"
            );
        }
        self.items
    }
}

/// Entry of `GET /shares`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareItem {
    pub name: String,
}

/// Entry of `GET /shares/{share}/schemas`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaItem {
    pub name: String,
}

/// Entry of `GET /shares/{share}/schemas/{schema}/tables`.
#[derive(Debug, Clone, Deserialize)]
pub struct TableItem {
    pub name: String,
}

// ============================================================================
// Query
// ============================================================================

/// Body of `POST .../query`.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub predicate_hints: Vec<String>,
}

/// Object-form query response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFilesResponse {
    #[serde(default)]
    pub add_files: Vec<WireFile>,
}

/// A data file as described by the server. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WireFile {
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl From<WireFile> for FileEntry {
    fn from(file: WireFile) -> Self {
        Self {
            url: file.url,
            id: file.id,
            size: file.size,
        }
    }
}

/// Server-side error body (`{"errorCode": ..., "message": ...}`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Render the error body as one line, if it carries anything.
    pub fn describe(&self) -> Option<String> {
        match (&self.error_code, &self.message) {
            (Some(code), Some(msg)) => Some(format!("{code}: {msg}")),
            (Some(code), None) => Some(code.clone()),
            (None, Some(msg)) => Some(msg.clone()),
            (None, None) => None,
        }
    }
}
