//! Single-table signed URL lookup.

use std::sync::Arc;

use shareprobe_core::{FileEntry, SharingClientPort, TableDescriptor};
use tokio_util::sync::CancellationToken;

use crate::discovery::TableDiscovery;
use crate::error::ExportError;
use crate::resolver::FileResolver;

/// Resolve the first signed file of one table.
///
/// The table must be visible through discovery; a table the endpoint does
/// not list is reported as not found instead of being queried blindly.
pub async fn lookup_first_file(
    client: Arc<dyn SharingClientPort>,
    table: &TableDescriptor,
    cancel: &CancellationToken,
) -> Result<FileEntry, ExportError> {
    let discovery = TableDiscovery::new(Arc::clone(&client));
    let resolver = FileResolver::new(client);

    let lookup = async {
        let tables = discovery.discover().await?;
        if !tables.contains(table) {
            return Err(ExportError::TableNotFound {
                table: table.clone(),
            });
        }

        let files = resolver
            .resolve(table)
            .await
            .map_err(|source| ExportError::Query {
                table: table.clone(),
                source,
            })?;

        files.into_iter().next().ok_or_else(|| ExportError::NoFiles {
            table: table.clone(),
        })
    };

    tokio::select! {
        biased;

        () = cancel.cancelled() => Err(ExportError::Cancelled),
        result = lookup => result,
    }
}
