//! Per-table download decision and transfer.
//!
//! ```text
//! dry-run ──────────────────────────────► listed
//! save ──► approve? ──no──────────────► skipped_by_declined_confirmation
//!                  └─yes─► mkdir ─► fetch ─ok──► saved
//!                                     └───err──► download_failed
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shareprobe_core::{FileEntry, Outcome, OutcomeStatus, TableDescriptor};

use crate::destination::{DestinationPlanner, ensure_parent_dir};
use crate::transfer::{FileTransfer, unsigned};

/// Whether a run transfers files or only lists them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportMode {
    /// Resolve URLs only; nothing touches the filesystem.
    #[default]
    DryRun,
    /// Download the first file of each table, subject to approval.
    Save,
}

impl ExportMode {
    pub const fn from_save_flag(save: bool) -> Self {
        if save { Self::Save } else { Self::DryRun }
    }

    pub const fn is_save(self) -> bool {
        matches!(self, Self::Save)
    }
}

/// What the approval policy is asked about.
#[derive(Debug, Clone, Copy)]
pub struct ApprovalRequest<'a> {
    pub table: &'a TableDescriptor,
    pub destination: &'a Path,
    pub size: Option<u64>,
}

/// Decides whether a planned download may proceed.
#[async_trait]
pub trait ApprovalPolicy: Send + Sync {
    async fn approve(&self, request: &ApprovalRequest<'_>) -> bool;
}

/// Approves everything. Used for `--yes` and non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

#[async_trait]
impl ApprovalPolicy for AlwaysApprove {
    async fn approve(&self, _request: &ApprovalRequest<'_>) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverApprove;

#[async_trait]
impl ApprovalPolicy for NeverApprove {
    async fn approve(&self, _request: &ApprovalRequest<'_>) -> bool {
        false
    }
}

/// Adapts a plain predicate into an approval policy.
pub struct ApproveWith<F>(pub F);

#[async_trait]
impl<F> ApprovalPolicy for ApproveWith<F>
where
    F: Fn(&ApprovalRequest<'_>) -> bool + Send + Sync,
{
    async fn approve(&self, request: &ApprovalRequest<'_>) -> bool {
        (self.0)(request)
    }
}

impl<F> fmt::Debug for ApproveWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApproveWith(..)")
    }
}

/// The safety gate in front of every transfer.
pub struct DownloadGate {
    mode: ExportMode,
    planner: DestinationPlanner,
    approval: Arc<dyn ApprovalPolicy>,
    transfer: Arc<dyn FileTransfer>,
}

impl DownloadGate {
    pub fn new(
        mode: ExportMode,
        planner: DestinationPlanner,
        approval: Arc<dyn ApprovalPolicy>,
        transfer: Arc<dyn FileTransfer>,
    ) -> Self {
        Self {
            mode,
            planner,
            approval,
            transfer,
        }
    }

    /// Decide what happens to a table's chosen file and act on it.
    ///
    /// Always yields an outcome; failures are recorded, never returned.
    pub async fn decide_and_act(
        &self,
        table: TableDescriptor,
        file: &FileEntry,
        file_count: usize,
    ) -> Outcome {
        let outcome = Outcome::new(table, OutcomeStatus::Listed)
            .with_url(file.url.as_str())
            .with_size(file.size)
            .with_file_count(file_count);

        if !self.mode.is_save() {
            return outcome;
        }

        let destination = self.planner.plan(&outcome.table, &file.url);
        let mut outcome = outcome.with_destination(destination.as_path());

        let request = ApprovalRequest {
            table: &outcome.table,
            destination: &destination,
            size: file.size,
        };
        if !self.approval.approve(&request).await {
            tracing::info!(table = %outcome.table, "Download declined");
            outcome.status = OutcomeStatus::SkippedByDeclinedConfirmation;
            return outcome;
        }

        if let Err(e) = ensure_parent_dir(&destination).await {
            return Self::failed(
                outcome,
                &file.url,
                format!("Failed to create {}: {e}", destination.display()),
            );
        }

        match self.transfer.fetch(&file.url, &destination).await {
            Ok(bytes) => {
                tracing::info!(
                    table = %outcome.table,
                    path = %destination.display(),
                    bytes,
                    "Saved table file"
                );
                outcome.status = OutcomeStatus::Saved;
                if outcome.size.is_none() {
                    outcome.size = Some(bytes);
                }
                outcome
            }
            Err(e) => Self::failed(outcome, &file.url, e.to_string()),
        }
    }

    fn failed(outcome: Outcome, url: &str, error: String) -> Outcome {
        tracing::warn!(
            table = %outcome.table,
            url = %unsigned(url),
            error = %error,
            "Download failed"
        );
        let mut outcome = outcome.with_error(error);
        outcome.status = OutcomeStatus::DownloadFailed;
        outcome
    }
}
