//! Outcome ledger for one run.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use shareprobe_core::{Outcome, OutcomeStatus, RunSummary, TableDescriptor};

/// Collects exactly one outcome per table and rolls them into a summary.
///
/// Owned by the run loop; nothing else writes to it.
#[derive(Debug)]
pub struct ResultAggregator {
    base_url: String,
    output_dir: String,
    save_requested: bool,
    total_tables: usize,
    started_at: DateTime<Utc>,
    seen: HashSet<TableDescriptor>,
    outcomes: Vec<Outcome>,
}

impl ResultAggregator {
    pub fn new(
        base_url: impl Into<String>,
        output_dir: impl Into<String>,
        save_requested: bool,
        total_tables: usize,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            output_dir: output_dir.into(),
            save_requested,
            total_tables,
            started_at: Utc::now(),
            seen: HashSet::with_capacity(total_tables),
            outcomes: Vec::with_capacity(total_tables),
        }
    }

    /// Backdate the run start, e.g. to include discovery time.
    #[must_use]
    pub const fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Record a table's outcome.
    ///
    /// A second outcome for the same table is ignored, keeping the first.
    pub fn record(&mut self, outcome: Outcome) {
        if !self.seen.insert(outcome.table.clone()) {
            tracing::warn!(table = %outcome.table, "Ignoring duplicate outcome");
            return;
        }

        match outcome.status {
            OutcomeStatus::QueryFailed | OutcomeStatus::DownloadFailed => {
                tracing::warn!(
                    table = %outcome.table,
                    status = %outcome.status,
                    error = outcome.error.as_deref().unwrap_or(""),
                    "Table failed"
                );
            }
            status => tracing::debug!(table = %outcome.table, %status, "Table processed"),
        }

        self.outcomes.push(outcome);
    }

    pub(crate) fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Close the ledger.
    pub fn finish(self, cancelled: bool) -> RunSummary {
        let successful_saves = self
            .outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Saved)
            .count();

        RunSummary {
            base_url: self.base_url,
            total_tables: self.total_tables,
            successful_saves,
            save_requested: self.save_requested,
            output_dir: self.output_dir,
            cancelled,
            started_at: self.started_at,
            finished_at: Utc::now(),
            outcomes: self.outcomes,
        }
    }
}
