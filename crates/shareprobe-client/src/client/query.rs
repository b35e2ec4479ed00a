//! Table file queries.

use shareprobe_core::{FileEntry, TableDescriptor};

use crate::error::SharingResult;
use crate::http::HttpBackend;
use crate::models::QueryRequest;
use crate::parsing::parse_query_response;
use crate::url::build_query_url;

use super::SharingClient;

impl<B: HttpBackend> SharingClient<B> {
    /// Query the signed file list of a table with no predicate hints.
    pub(crate) async fn fetch_table_files(
        &self,
        table: &TableDescriptor,
    ) -> SharingResult<Vec<FileEntry>> {
        let url = build_query_url(&self.endpoint, table)?;
        let body = self
            .backend
            .post_json(&url, &QueryRequest::default())
            .await?;
        let files = parse_query_response(&body)?;
        tracing::debug!(table = %table, files = files.len(), "Table query answered");
        Ok(files)
    }
}
