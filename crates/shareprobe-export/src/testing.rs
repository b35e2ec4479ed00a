//! In-memory sharing server for unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shareprobe_core::{
    FileEntry, SchemaDescriptor, ShareDescriptor, SharingClientPort, SharingPortError,
    SharingPortResult, TableDescriptor,
};

/// Serves a fixed share tree, preserving insertion order.
#[derive(Default)]
pub struct InMemorySharing {
    tree: Vec<(String, Vec<(String, Vec<String>)>)>,
    files: HashMap<TableDescriptor, SharingPortResult<Vec<FileEntry>>>,
    schema_failures: HashMap<String, SharingPortError>,
    calls: Arc<AtomicUsize>,
}

fn table_ref(reference: &str) -> TableDescriptor {
    reference.parse().unwrap()
}

impl InMemorySharing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, share: &str, schema: &str, table: &str) -> Self {
        let share_pos = match self.tree.iter().position(|(s, _)| s == share) {
            Some(pos) => pos,
            None => {
                self.tree.push((share.to_string(), Vec::new()));
                self.tree.len() - 1
            }
        };
        let schemas = &mut self.tree[share_pos].1;
        let schema_pos = match schemas.iter().position(|(s, _)| s == schema) {
            Some(pos) => pos,
            None => {
                schemas.push((schema.to_string(), Vec::new()));
                schemas.len() - 1
            }
        };
        schemas[schema_pos].1.push(table.to_string());
        self
    }

    pub fn with_files(mut self, reference: &str, files: Vec<FileEntry>) -> Self {
        self.files.insert(table_ref(reference), Ok(files));
        self
    }

    pub fn with_file(self, reference: &str, url: &str) -> Self {
        self.with_files(reference, vec![FileEntry::new(url)])
    }

    pub fn fail_query(mut self, reference: &str, error: SharingPortError) -> Self {
        self.files.insert(table_ref(reference), Err(error));
        self
    }

    pub fn fail_schemas(mut self, share: &str, error: SharingPortError) -> Self {
        self.schema_failures.insert(share.to_string(), error);
        self
    }

    /// Number of port calls served so far.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SharingClientPort for InMemorySharing {
    fn base_url(&self) -> &str {
        "https://sharing.test/delta-sharing"
    }

    async fn list_shares(&self) -> SharingPortResult<Vec<ShareDescriptor>> {
        self.hit();
        Ok(self
            .tree
            .iter()
            .map(|(name, _)| ShareDescriptor::new(name.as_str()))
            .collect())
    }

    async fn list_schemas(&self, share: &str) -> SharingPortResult<Vec<SchemaDescriptor>> {
        self.hit();
        if let Some(err) = self.schema_failures.get(share) {
            return Err(err.clone());
        }
        Ok(self
            .tree
            .iter()
            .find(|(name, _)| name == share)
            .map(|(_, schemas)| {
                schemas
                    .iter()
                    .map(|(name, _)| SchemaDescriptor::new(name.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_tables(
        &self,
        share: &str,
        schema: &str,
    ) -> SharingPortResult<Vec<TableDescriptor>> {
        self.hit();
        Ok(self
            .tree
            .iter()
            .find(|(name, _)| name == share)
            .and_then(|(_, schemas)| schemas.iter().find(|(name, _)| name == schema))
            .map(|(_, tables)| {
                tables
                    .iter()
                    .map(|t| TableDescriptor::new(share, schema, t.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_table_files(
        &self,
        table: &TableDescriptor,
    ) -> SharingPortResult<Vec<FileEntry>> {
        self.hit();
        self.files.get(table).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}
