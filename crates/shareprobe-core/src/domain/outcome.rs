//! Per-table outcomes and the run summary they roll up into.
//!
//! Every discovered table ends a run with exactly one [`Outcome`]. The
//! [`RunSummary`] is the machine-inspectable result printed at process end.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::table::TableDescriptor;

/// Terminal state of one table's processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Dry-run: the file was resolved but not transferred.
    Listed,
    /// The file was transferred to its destination.
    Saved,
    /// The file query for this table failed.
    QueryFailed,
    /// The table query returned no files.
    NoFiles,
    /// The transfer was approved but failed.
    DownloadFailed,
    /// The approval policy declined the transfer.
    SkippedByDeclinedConfirmation,
}

impl OutcomeStatus {
    /// Stable snake_case name, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listed => "listed",
            Self::Saved => "saved",
            Self::QueryFailed => "query_failed",
            Self::NoFiles => "no_files",
            Self::DownloadFailed => "download_failed",
            Self::SkippedByDeclinedConfirmation => "skipped_by_declined_confirmation",
        }
    }

    /// Whether this status represents a per-table failure.
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::QueryFailed | Self::DownloadFailed)
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Recorded result for one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// The table this outcome belongs to
    pub table: TableDescriptor,
    /// Terminal status
    pub status: OutcomeStatus,
    /// Signed URL of the chosen file, when one was resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Intended (or actual) local destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<PathBuf>,
    /// Size of the chosen file in bytes, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Number of files the server returned for this table
    #[serde(default)]
    pub file_count: usize,
    /// Human-readable failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// Create a bare outcome with the given status.
    pub const fn new(table: TableDescriptor, status: OutcomeStatus) -> Self {
        Self {
            table,
            status,
            url: None,
            destination_path: None,
            size: None,
            file_count: 0,
            error: None,
        }
    }

    /// The table's file query failed.
    pub fn query_failed(table: TableDescriptor, error: impl Into<String>) -> Self {
        Self::new(table, OutcomeStatus::QueryFailed).with_error(error)
    }

    /// The table's file query returned nothing.
    pub const fn no_files(table: TableDescriptor) -> Self {
        Self::new(table, OutcomeStatus::NoFiles)
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn with_file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Final result of one export run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Sharing endpoint the run talked to
    pub base_url: String,
    /// Number of tables discovery produced
    pub total_tables: usize,
    /// Number of outcomes with status `saved`
    pub successful_saves: usize,
    /// Whether save mode was enabled
    pub save_requested: bool,
    /// Destination root for downloads
    pub output_dir: String,
    /// Whether the run was cancelled before every table was processed
    #[serde(default)]
    pub cancelled: bool,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// One outcome per processed table, in discovery order
    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    /// Number of outcomes with the given status.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Number of per-table failures.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failure()).count()
    }

    /// Sum of the known sizes of every resolved file.
    pub fn total_resolved_bytes(&self) -> u64 {
        self.outcomes.iter().filter_map(|o| o.size).sum()
    }

    /// Whether every discovered table has an outcome.
    pub const fn is_complete(&self) -> bool {
        !self.cancelled && self.outcomes.len() == self.total_tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> TableDescriptor {
        TableDescriptor::new("share", "schema", name)
    }

    fn summary(outcomes: Vec<Outcome>) -> RunSummary {
        let now = Utc::now();
        RunSummary {
            base_url: "https://sharing.example.com/delta-sharing".to_string(),
            total_tables: outcomes.len(),
            successful_saves: 0,
            save_requested: true,
            output_dir: "data/raw".to_string(),
            cancelled: false,
            started_at: now,
            finished_at: now,
            outcomes,
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OutcomeStatus::SkippedByDeclinedConfirmation).unwrap();
        assert_eq!(json, "\"skipped_by_declined_confirmation\"");
        assert_eq!(OutcomeStatus::QueryFailed.to_string(), "query_failed");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = Outcome::new(table("t"), OutcomeStatus::Saved)
            .with_url("https://signed")
            .with_destination("/tmp/out/t.parquet")
            .with_file_count(1);

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "saved");
        assert_eq!(value["destinationPath"], "/tmp/out/t.parquet");
        assert_eq!(value["fileCount"], 1);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_summary_counts() {
        let s = summary(vec![
            Outcome::new(table("a"), OutcomeStatus::Saved).with_size(Some(100)),
            Outcome::query_failed(table("b"), "boom"),
            Outcome::no_files(table("c")),
            Outcome::new(table("d"), OutcomeStatus::DownloadFailed).with_size(Some(50)),
        ]);

        assert_eq!(s.count(OutcomeStatus::Saved), 1);
        assert_eq!(s.failures(), 2);
        assert_eq!(s.total_resolved_bytes(), 150);
        assert!(s.is_complete());
    }

    #[test]
    fn test_cancelled_summary_is_not_complete() {
        let mut s = summary(vec![Outcome::no_files(table("a"))]);
        s.total_tables = 3;
        assert!(!s.is_complete());
    }
}
