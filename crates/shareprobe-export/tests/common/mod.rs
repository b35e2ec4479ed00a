//! Shared fixtures for the export integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use shareprobe_core::{
    FileEntry, SchemaDescriptor, ShareDescriptor, SharingClientPort, SharingPortError,
    SharingPortResult, TableDescriptor,
};
use shareprobe_export::{FileTransfer, TransferError};

pub const BASE_URL: &str = "https://sharing.example.com/delta-sharing";

// ── Fake sharing server ────────────────────────────────────────────

/// In-memory sharing endpoint that logs every call as `METHOD path`.
#[derive(Default)]
pub struct FakeServer {
    tables: Vec<TableDescriptor>,
    files: Vec<(TableDescriptor, SharingPortResult<Vec<FileEntry>>)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with a single signed file.
    pub fn table(self, reference: &str) -> Self {
        let url = format!(
            "https://storage.example.com/{}/part-0000.snappy.parquet?sig=abc",
            reference.replace('.', "/")
        );
        self.table_with_files(reference, Ok(vec![FileEntry::new(url).with_size(1024)]))
    }

    pub fn table_with_files(
        mut self,
        reference: &str,
        files: SharingPortResult<Vec<FileEntry>>,
    ) -> Self {
        let table: TableDescriptor = reference.parse().expect("valid table reference");
        self.tables.push(table.clone());
        self.files.push((table, files));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[async_trait]
impl SharingClientPort for FakeServer {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn list_shares(&self) -> SharingPortResult<Vec<ShareDescriptor>> {
        self.log("GET /shares".to_string());
        Ok(distinct(self.tables.iter().map(|t| t.share.as_str()))
            .into_iter()
            .map(ShareDescriptor::new)
            .collect())
    }

    async fn list_schemas(&self, share: &str) -> SharingPortResult<Vec<SchemaDescriptor>> {
        self.log(format!("GET /shares/{share}/schemas"));
        Ok(distinct(
            self.tables
                .iter()
                .filter(|t| t.share == share)
                .map(|t| t.schema.as_str()),
        )
        .into_iter()
        .map(SchemaDescriptor::new)
        .collect())
    }

    async fn list_tables(
        &self,
        share: &str,
        schema: &str,
    ) -> SharingPortResult<Vec<TableDescriptor>> {
        self.log(format!("GET /shares/{share}/schemas/{schema}/tables"));
        Ok(self
            .tables
            .iter()
            .filter(|t| t.share == share && t.schema == schema)
            .cloned()
            .collect())
    }

    async fn query_table_files(
        &self,
        table: &TableDescriptor,
    ) -> SharingPortResult<Vec<FileEntry>> {
        self.log(format!(
            "POST /shares/{}/schemas/{}/tables/{}/query",
            table.share, table.schema, table.name
        ));
        self.files
            .iter()
            .find(|(t, _)| t == table)
            .map(|(_, files)| files.clone())
            .unwrap_or_else(|| {
                Err(SharingPortError::NotFound {
                    resource: table.to_string(),
                })
            })
    }
}

// ── Mock transfer ──────────────────────────────────────────────────

mock! {
    pub Transfer {}

    #[async_trait]
    impl FileTransfer for Transfer {
        async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, TransferError>;
    }
}

/// A transfer mock that writes a small payload for every call.
pub fn writing_transfer(expected_calls: usize) -> MockTransfer {
    let mut transfer = MockTransfer::new();
    transfer
        .expect_fetch()
        .times(expected_calls)
        .returning(|_, destination| {
            std::fs::write(destination, b"PAR1").expect("write payload");
            Ok(4)
        });
    transfer
}

/// A transfer mock that must never be called.
pub fn forbidden_transfer() -> MockTransfer {
    let mut transfer = MockTransfer::new();
    transfer.expect_fetch().times(0);
    transfer
}

/// Count regular files below `dir`.
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() { count_files(&path) } else { 1 }
        })
        .sum()
}
