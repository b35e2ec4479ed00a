//! URL construction helpers for the Delta Sharing API.
//!
//! Path segments are percent-encoded by `url`, so share, schema and table
//! names are safe to pass through verbatim.

use shareprobe_core::TableDescriptor;
use url::Url;

use crate::error::{SharingError, SharingResult};

/// Append path segments to the endpoint, tolerating a trailing slash.
fn endpoint_url(base: &Url, segments: &[&str]) -> SharingResult<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| SharingError::CannotBeABase {
                url: base.to_string(),
            })?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// `{base}/shares`
pub fn build_shares_url(base: &Url) -> SharingResult<Url> {
    endpoint_url(base, &["shares"])
}

/// `{base}/shares/{share}/schemas`
pub fn build_schemas_url(base: &Url, share: &str) -> SharingResult<Url> {
    endpoint_url(base, &["shares", share, "schemas"])
}

/// `{base}/shares/{share}/schemas/{schema}/tables`
pub fn build_tables_url(base: &Url, share: &str, schema: &str) -> SharingResult<Url> {
    endpoint_url(base, &["shares", share, "schemas", schema, "tables"])
}

/// `{base}/shares/{share}/schemas/{schema}/tables/{table}/query`
pub fn build_query_url(base: &Url, table: &TableDescriptor) -> SharingResult<Url> {
    endpoint_url(
        base,
        &[
            "shares",
            &table.share,
            "schemas",
            &table.schema,
            "tables",
            &table.name,
            "query",
        ],
    )
}
