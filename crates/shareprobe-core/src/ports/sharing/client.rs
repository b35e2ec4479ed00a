//! Delta Sharing client port trait.

use super::error::SharingPortResult;
use crate::domain::{FileEntry, SchemaDescriptor, ShareDescriptor, TableDescriptor};
use async_trait::async_trait;

/// Port trait for Delta Sharing server operations.
///
/// # Design
///
/// - One method per REST call; walking the hierarchy is the caller's job
/// - Results preserve server order
/// - Returns `SharingPortError` for all failures
#[async_trait]
pub trait SharingClientPort: Send + Sync {
    /// Base URL of the sharing endpoint, for reporting.
    fn base_url(&self) -> &str;

    /// `GET {base}/shares`
    async fn list_shares(&self) -> SharingPortResult<Vec<ShareDescriptor>>;

    /// `GET {base}/shares/{share}/schemas`
    async fn list_schemas(&self, share: &str) -> SharingPortResult<Vec<SchemaDescriptor>>;

    /// `GET {base}/shares/{share}/schemas/{schema}/tables`
    async fn list_tables(
        &self,
        share: &str,
        schema: &str,
    ) -> SharingPortResult<Vec<TableDescriptor>>;

    /// `POST {base}/shares/{share}/schemas/{schema}/tables/{table}/query`
    ///
    /// Returns the signed file list verbatim, in server order.
    async fn query_table_files(
        &self,
        table: &TableDescriptor,
    ) -> SharingPortResult<Vec<FileEntry>>;
}
