//! Share → schema → table enumeration.

use std::sync::Arc;

use shareprobe_core::{SharingClientPort, TableDescriptor};

use crate::error::ExportError;

/// Walks the share hierarchy of one endpoint.
///
/// Enumeration is sequential: each level needs the names of its parent.
/// Any listing failure aborts discovery, since a partial table list would
/// silently drop tables from the run.
pub struct TableDiscovery {
    client: Arc<dyn SharingClientPort>,
}

impl TableDiscovery {
    pub fn new(client: Arc<dyn SharingClientPort>) -> Self {
        Self { client }
    }

    /// Flatten every `(share, schema, table)` triple in server order.
    pub async fn discover(&self) -> Result<Vec<TableDescriptor>, ExportError> {
        let base_url = self.client.base_url();
        let shares = self
            .client
            .list_shares()
            .await
            .map_err(|e| ExportError::discovery("shares", e))?;
        tracing::info!(endpoint = base_url, shares = shares.len(), "Listed shares");

        let mut tables = Vec::new();
        for share in &shares {
            let schemas = self
                .client
                .list_schemas(&share.name)
                .await
                .map_err(|e| ExportError::discovery(format!("schemas of share '{}'", share.name), e))?;
            tracing::debug!(share = %share.name, schemas = schemas.len(), "Listed schemas");

            for schema in &schemas {
                let found = self
                    .client
                    .list_tables(&share.name, &schema.name)
                    .await
                    .map_err(|e| {
                        ExportError::discovery(
                            format!("tables of schema '{}.{}'", share.name, schema.name),
                            e,
                        )
                    })?;
                tracing::debug!(
                    share = %share.name,
                    schema = %schema.name,
                    tables = found.len(),
                    "Listed tables"
                );
                tables.extend(found);
            }
        }

        tracing::info!(endpoint = base_url, tables = tables.len(), "Discovery complete");
        Ok(tables)
    }
}
