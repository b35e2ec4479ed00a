//! The export run loop.
//!
//! # Design
//!
//! - Discovery runs first and is all-or-nothing
//! - Each table then goes through resolve → gate and yields one `Outcome`
//! - Up to `concurrency` tables are in flight; outcomes are still recorded
//!   in discovery order
//! - Cancellation drops in-flight work (aborting its HTTP calls) and returns
//!   the outcomes collected so far

use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;

use chrono::Utc;
use futures_util::StreamExt;
use futures_util::stream;
use shareprobe_core::{
    CredentialSource, Credentials, Outcome, RunSummary, SharingClientPort, SharingPortResult,
    TableDescriptor,
};
use tokio_util::sync::CancellationToken;

use crate::aggregator::ResultAggregator;
use crate::destination::{DestinationPlanner, RunStamp};
use crate::discovery::TableDiscovery;
use crate::error::ExportError;
use crate::gate::{ApprovalPolicy, DownloadGate, ExportMode};
use crate::resolver::FileResolver;
use crate::transfer::FileTransfer;

/// Default destination root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data/raw";

/// Execution policy for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Dry-run or save
    pub mode: ExportMode,
    /// Destination root for downloads
    pub output_dir: PathBuf,
    /// Maximum number of tables processed at once (at least 1)
    pub concurrency: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mode: ExportMode::DryRun,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrency: 1,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub const fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Collaborators injected into the gate.
#[derive(Clone)]
pub struct ExportDeps {
    /// Consulted before every download in save mode
    pub approval: Arc<dyn ApprovalPolicy>,
    /// Performs approved downloads
    pub transfer: Arc<dyn FileTransfer>,
}

/// Runs discovery, resolution and the download gate against one endpoint.
pub struct Exporter {
    client: Arc<dyn SharingClientPort>,
    discovery: TableDiscovery,
    resolver: FileResolver,
    gate: DownloadGate,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(
        client: Arc<dyn SharingClientPort>,
        options: ExportOptions,
        deps: ExportDeps,
    ) -> Self {
        let planner = DestinationPlanner::new(options.output_dir.clone(), RunStamp::now());
        Self {
            discovery: TableDiscovery::new(Arc::clone(&client)),
            resolver: FileResolver::new(Arc::clone(&client)),
            gate: DownloadGate::new(options.mode, planner, deps.approval, deps.transfer),
            client,
            options,
        }
    }

    /// Discover every table, honouring cancellation.
    pub async fn discover(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<TableDescriptor>, ExportError> {
        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(ExportError::Cancelled),
            result = self.discovery.discover() => result,
        }
    }

    /// Run the full pipeline.
    ///
    /// Only discovery failures (and cancellation during discovery) are
    /// errors. Per-table failures end up in the summary.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunSummary, ExportError> {
        let started_at = Utc::now();
        let tables = self.discover(cancel).await?;

        let mut aggregator = ResultAggregator::new(
            self.client.base_url(),
            self.options.output_dir.display().to_string(),
            self.options.mode.is_save(),
            tables.len(),
        )
        .started_at(started_at);

        let mut outcomes = pin!(
            stream::iter(tables)
                .map(|table| self.process_table(table))
                .buffered(self.options.concurrency.max(1))
        );

        let mut cancelled = false;
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }

                next = outcomes.next() => match next {
                    Some(outcome) => aggregator.record(outcome),
                    None => break,
                },
            }
        }

        if cancelled {
            tracing::warn!(
                processed = aggregator.len(),
                "Export cancelled; returning partial results"
            );
        }

        let summary = aggregator.finish(cancelled);
        tracing::info!(
            tables = summary.total_tables,
            saved = summary.successful_saves,
            failures = summary.failures(),
            "Export finished"
        );
        Ok(summary)
    }

    /// Resolve one table and pass its first file through the gate.
    async fn process_table(&self, table: TableDescriptor) -> Outcome {
        let files = match self.resolver.resolve(&table).await {
            Ok(files) => files,
            Err(e) => return Outcome::query_failed(table, e.to_string()),
        };

        let Some(first) = files.first() else {
            tracing::info!(table = %table, "Table has no files");
            return Outcome::no_files(table);
        };

        if files.len() > 1 {
            tracing::debug!(
                table = %table,
                files = files.len(),
                "Table has several files; only the first is used"
            );
        }

        self.gate.decide_and_act(table, first, files.len()).await
    }
}

/// Load credentials, connect, and run.
///
/// The profile is loaded before `connect` is called, so a bad profile never
/// reaches the network.
pub async fn run_with_profile<C>(
    source: &dyn CredentialSource,
    profile_path: &Path,
    connect: C,
    options: ExportOptions,
    deps: ExportDeps,
    cancel: &CancellationToken,
) -> Result<RunSummary, ExportError>
where
    C: FnOnce(&Credentials) -> SharingPortResult<Arc<dyn SharingClientPort>>,
{
    let credentials = source.load(profile_path)?;
    let client = connect(&credentials).map_err(ExportError::Connect)?;
    Exporter::new(client, options, deps).run(cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::AlwaysApprove;
    use crate::testing::InMemorySharing;
    use crate::transfer::TransferError;
    use async_trait::async_trait;
    use shareprobe_core::{OutcomeStatus, SharingPortError};
    use std::time::Duration;

    struct NoTransfer;

    #[async_trait]
    impl FileTransfer for NoTransfer {
        async fn fetch(&self, _url: &str, _destination: &Path) -> Result<u64, TransferError> {
            panic!("no transfer expected");
        }
    }

    /// Never finishes, so cancellation can be observed mid-transfer.
    struct StalledTransfer;

    #[async_trait]
    impl FileTransfer for StalledTransfer {
        async fn fetch(&self, _url: &str, _destination: &Path) -> Result<u64, TransferError> {
            std::future::pending().await
        }
    }

    fn deps(transfer: Arc<dyn FileTransfer>) -> ExportDeps {
        ExportDeps {
            approval: Arc::new(AlwaysApprove),
            transfer,
        }
    }

    #[test]
    fn options_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.mode, ExportMode::DryRun);
        assert_eq!(options.output_dir, PathBuf::from("data/raw"));
        assert_eq!(options.concurrency, 1);
        assert_eq!(options.with_concurrency(0).concurrency, 1);
    }

    #[tokio::test]
    async fn run_records_every_stage() {
        let sharing = InMemorySharing::new()
            .with_table("s", "sc", "ok")
            .with_table("s", "sc", "broken")
            .with_table("s", "sc", "empty")
            .with_file("s.sc.ok", "https://blob/ok.parquet")
            .fail_query("s.sc.broken", SharingPortError::RateLimited);

        let exporter = Exporter::new(
            Arc::new(sharing),
            ExportOptions::default(),
            deps(Arc::new(NoTransfer)),
        );
        let summary = exporter
            .run(&CancellationToken::new())
            .await
            .unwrap();

        let statuses: Vec<OutcomeStatus> = summary.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                OutcomeStatus::Listed,
                OutcomeStatus::QueryFailed,
                OutcomeStatus::NoFiles
            ]
        );
        let error = summary.outcomes[1].error.as_deref().unwrap();
        assert!(error.contains("Rate limit"));
        assert_eq!(summary.base_url, "https://sharing.test/delta-sharing");
        assert!(!summary.save_requested);
    }

    #[tokio::test]
    async fn discovery_failure_aborts_without_outcomes() {
        let sharing = InMemorySharing::new()
            .with_table("s", "sc", "t")
            .fail_schemas("s", SharingPortError::Unauthorized {
                message: "token expired".to_string(),
            });

        let exporter = Exporter::new(
            Arc::new(sharing),
            ExportOptions::default(),
            deps(Arc::new(NoTransfer)),
        );
        let result = exporter.run(&CancellationToken::new()).await;

        assert!(matches!(result, Err(ExportError::Discovery { .. })));
    }

    #[tokio::test]
    async fn concurrency_keeps_discovery_order() {
        let mut sharing = InMemorySharing::new();
        for i in 0..8 {
            let name = format!("t{i}");
            sharing = sharing
                .with_table("s", "sc", &name)
                .with_file(&format!("s.sc.{name}"), "https://blob/f.parquet");
        }

        let options = ExportOptions::default().with_concurrency(4);
        let summary = Exporter::new(Arc::new(sharing), options, deps(Arc::new(NoTransfer)))
            .run(&CancellationToken::new())
            .await
            .unwrap();

        let names: Vec<&str> = summary
            .outcomes
            .iter()
            .map(|o| o.table.name.as_str())
            .collect();
        assert_eq!(names, vec!["t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7"]);
    }

    #[tokio::test]
    async fn cancel_before_run_is_fatal_during_discovery() {
        let sharing = InMemorySharing::new().with_table("s", "sc", "t");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let exporter = Exporter::new(
            Arc::new(sharing),
            ExportOptions::default(),
            deps(Arc::new(NoTransfer)),
        );
        let result = exporter.run(&cancel).await;

        assert!(matches!(result, Err(ExportError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_mid_transfer_returns_partial_summary() {
        let dir = tempfile::tempdir().unwrap();
        let sharing = InMemorySharing::new()
            .with_table("s", "sc", "empty")
            .with_table("s", "sc", "stalls")
            .with_file("s.sc.stalls", "https://blob/f.parquet");
        let options = ExportOptions::default()
            .with_mode(ExportMode::Save)
            .with_output_dir(dir.path());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let summary = Exporter::new(Arc::new(sharing), options, deps(Arc::new(StalledTransfer)))
            .run(&cancel)
            .await
            .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.total_tables, 2);
        assert_eq!(summary.outcomes.len(), 1);
        assert_eq!(summary.outcomes[0].status, OutcomeStatus::NoFiles);
    }
}
