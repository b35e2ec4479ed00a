//! Decoding of table query responses.
//!
//! Two shapes are accepted:
//!
//! - an object `{"addFiles": [{"url": ...}, ...]}`
//! - the newline-delimited protocol form, one JSON object per line:
//!   `{"protocol": ...}`, `{"metaData": ...}`, then one `{"file": ...}` per file
//!
//! File order is preserved in both cases.

use serde_json::Value;
use shareprobe_core::FileEntry;

use crate::error::{SharingError, SharingResult};
use crate::models::{AddFilesResponse, WireFile};

/// Parse a query response body into file entries.
pub fn parse_query_response(body: &str) -> SharingResult<Vec<FileEntry>> {
    let body = body.trim();
    if body.is_empty() {
        return Err(SharingError::InvalidResponse {
            message: "empty query response".to_string(),
        });
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if value.get("addFiles").is_some() {
            let response: AddFilesResponse = serde_json::from_value(value)?;
            return Ok(response.add_files.into_iter().map(FileEntry::from).collect());
        }
    }

    parse_delimited(body)
}

/// Parse the newline-delimited form.
fn parse_delimited(body: &str) -> SharingResult<Vec<FileEntry>> {
    let mut files = Vec::new();
    let mut saw_protocol_line = false;

    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line).map_err(|e| SharingError::InvalidResponse {
            message: format!("line {} of query response is not JSON: {e}", index + 1),
        })?;

        let Some(object) = value.as_object() else {
            return Err(SharingError::InvalidResponse {
                message: format!("line {} of query response is not an object", index + 1),
            });
        };

        if let Some(file) = object.get("file") {
            let file: WireFile = serde_json::from_value(file.clone())?;
            files.push(file.into());
        } else if object.contains_key("protocol") || object.contains_key("metaData") {
            saw_protocol_line = true;
        } else {
            tracing::debug!(line = index + 1, "Ignoring unrecognised query response line");
        }
    }

    if files.is_empty() && !saw_protocol_line {
        return Err(SharingError::InvalidResponse {
            message: "query response has neither addFiles nor protocol lines".to_string(),
        });
    }

    Ok(files)
}
