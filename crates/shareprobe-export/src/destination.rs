//! Destination path planning for table downloads.
//!
//! Files land at `{output_dir}/{share}/{schema}/{table}_{stamp}.{ext}` where
//! `stamp` is fixed once per run. Repeated runs against the same table
//! therefore never overwrite each other. Within a run, every planned path is
//! reserved, so two tables whose names sanitize to the same file never share
//! a destination. A path that is taken on disk or already reserved gets a
//! numeric suffix.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use shareprobe_core::TableDescriptor;

/// Extension used when the signed URL does not carry one.
const DEFAULT_EXTENSION: &str = "parquet";

/// Per-run timestamp component of destination filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    /// Stamp for the given instant, e.g. `20260131_142501_042`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y%m%d_%H%M%S_%3f").to_string())
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plans where each table's file is written.
///
/// Clones share the same reservations.
#[derive(Debug, Clone)]
pub struct DestinationPlanner {
    output_dir: PathBuf,
    stamp: RunStamp,
    reserved: Arc<Mutex<HashSet<PathBuf>>>,
}

impl DestinationPlanner {
    pub fn new(output_dir: impl Into<PathBuf>, stamp: RunStamp) -> Self {
        Self {
            output_dir: output_dir.into(),
            stamp,
            reserved: Arc::default(),
        }
    }

    /// Plan and reserve the destination for a table's file.
    ///
    /// Checks the filesystem for existing paths but creates nothing. A
    /// returned path is never handed out again by this planner.
    pub fn plan(&self, table: &TableDescriptor, file_url: &str) -> PathBuf {
        let dir = self
            .output_dir
            .join(sanitize_component(&table.share))
            .join(sanitize_component(&table.schema));
        let stem = format!("{}_{}", sanitize_component(&table.name), self.stamp.as_str());
        let ext = extension_from_url(file_url);

        let mut reserved = self
            .reserved
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut candidate = dir.join(format!("{stem}.{ext}"));
        let mut attempt = 1;
        while reserved.contains(&candidate) || candidate.exists() {
            candidate = dir.join(format!("{stem}_{attempt}.{ext}"));
            attempt += 1;
        }
        reserved.insert(candidate.clone());
        candidate
    }
}

/// Create the parent directory of `path` if needed. Idempotent.
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Make a server-provided name safe as a single path component.
fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Extension of the last path segment of a URL, ignoring the query string.
fn extension_from_url(file_url: &str) -> String {
    let last_segment = url::Url::parse(file_url).ok().and_then(|u| {
        u.path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
    });

    last_segment
        .as_deref()
        .and_then(|segment| Path::new(segment).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 16 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase)
}
