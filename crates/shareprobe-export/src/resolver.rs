//! Signed file resolution for one table.

use std::sync::Arc;

use shareprobe_core::{FileEntry, SharingClientPort, SharingPortResult, TableDescriptor};

/// Resolves the signed file list of a table.
///
/// The list is returned verbatim. URL expiry and signatures are the
/// server's concern, so nothing is validated here.
pub struct FileResolver {
    client: Arc<dyn SharingClientPort>,
}

impl FileResolver {
    pub fn new(client: Arc<dyn SharingClientPort>) -> Self {
        Self { client }
    }

    /// Query the table's files, preserving server order.
    pub async fn resolve(&self, table: &TableDescriptor) -> SharingPortResult<Vec<FileEntry>> {
        let files = self.client.query_table_files(table).await?;
        tracing::debug!(table = %table, files = files.len(), "Resolved table files");
        Ok(files)
    }
}
