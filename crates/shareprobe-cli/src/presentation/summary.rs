//! Run summary rendering.

use std::fmt::Write;

use shareprobe_core::{OutcomeStatus, RunSummary};

use super::tables::{format_size, truncate_string};

const TABLE_WIDTH: usize = 48;
const STATUS_WIDTH: usize = 33;
const SIZE_WIDTH: usize = 10;

/// Render the summary as a human-readable report.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let mode = if summary.save_requested { "save" } else { "dry run" };

    let _ = writeln!(out, "Endpoint:   {}", summary.base_url);
    let _ = writeln!(out, "Mode:       {mode}");
    if summary.save_requested {
        let _ = writeln!(out, "Output dir: {}", summary.output_dir);
    }
    let _ = writeln!(out);

    if summary.outcomes.is_empty() {
        let _ = writeln!(out, "No tables found.");
    } else {
        let _ = writeln!(
            out,
            "{:<TABLE_WIDTH$} {:<STATUS_WIDTH$} {:>SIZE_WIDTH$}  Detail",
            "Table", "Status", "Size"
        );
        let width = TABLE_WIDTH + STATUS_WIDTH + SIZE_WIDTH + 10;
        let _ = writeln!(out, "{}", "-".repeat(width));
        for outcome in &summary.outcomes {
            let detail = match outcome.status {
                OutcomeStatus::Saved | OutcomeStatus::SkippedByDeclinedConfirmation => outcome
                    .destination_path
                    .as_ref()
                    .map(|p| p.display().to_string()),
                OutcomeStatus::Listed => outcome.url.clone(),
                OutcomeStatus::QueryFailed | OutcomeStatus::DownloadFailed => {
                    outcome.error.clone()
                }
                OutcomeStatus::NoFiles => None,
            };
            let _ = writeln!(
                out,
                "{:<TABLE_WIDTH$} {:<STATUS_WIDTH$} {:>SIZE_WIDTH$}  {}",
                truncate_string(&outcome.table.qualified_name(), TABLE_WIDTH),
                outcome.status,
                format_size(outcome.size),
                detail.unwrap_or_default()
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Tables: {}  Saved: {}  Failed: {}  No files: {}  Declined: {}",
        summary.total_tables,
        summary.successful_saves,
        summary.failures(),
        summary.count(OutcomeStatus::NoFiles),
        summary.count(OutcomeStatus::SkippedByDeclinedConfirmation),
    );
    let _ = writeln!(
        out,
        "Resolved size: {}  Elapsed: {:.1}s",
        format_size(Some(summary.total_resolved_bytes())),
        elapsed_secs(summary)
    );
    let multi_file = summary.outcomes.iter().filter(|o| o.file_count > 1).count();
    if multi_file > 0 {
        let _ = writeln!(
            out,
            "{multi_file} table(s) have more than one file; only the first was used."
        );
    }
    if summary.cancelled {
        let _ = writeln!(
            out,
            "Interrupted after {} of {} tables.",
            summary.outcomes.len(),
            summary.total_tables
        );
    }

    out
}

#[allow(clippy::cast_precision_loss)] // display only
fn elapsed_secs(summary: &RunSummary) -> f64 {
    let elapsed: chrono::Duration = summary.finished_at - summary.started_at;
    elapsed.num_milliseconds().max(0) as f64 / 1000.0
}

/// Print the summary, as JSON when requested.
pub fn print_summary(summary: &RunSummary, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", render_summary(summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shareprobe_core::{Outcome, TableDescriptor};

    fn summary(outcomes: Vec<Outcome>, save_requested: bool) -> RunSummary {
        let now = Utc::now();
        RunSummary {
            base_url: "https://sharing.example.com/delta-sharing".to_string(),
            total_tables: outcomes.len(),
            successful_saves: outcomes
                .iter()
                .filter(|o| o.status == OutcomeStatus::Saved)
                .count(),
            save_requested,
            output_dir: "data/raw".to_string(),
            cancelled: false,
            started_at: now,
            finished_at: now,
            outcomes,
        }
    }

    fn table(name: &str) -> TableDescriptor {
        TableDescriptor::new("sales", "tables", name)
    }

    #[test]
    fn renders_every_outcome() {
        let report = render_summary(&summary(
            vec![
                Outcome::new(table("orders"), OutcomeStatus::Saved)
                    .with_destination("data/raw/sales/tables/orders_1.parquet")
                    .with_size(Some(1536)),
                Outcome::query_failed(table("refunds"), "Rate limit exceeded"),
                Outcome::no_files(table("empty")),
            ],
            true,
        ));

        assert!(report.contains("sales.tables.orders"));
        assert!(report.contains("orders_1.parquet"));
        assert!(report.contains("1.50 KB"));
        assert!(report.contains("query_failed"));
        assert!(report.contains("Rate limit exceeded"));
        assert!(report.contains("no_files"));
        assert!(report.contains("Saved: 1  Failed: 1  No files: 1"));
        assert!(report.contains("Output dir: data/raw"));
    }

    #[test]
    fn notes_multi_file_tables_and_interruptions() {
        let mut s = summary(
            vec![
                Outcome::new(table("a"), OutcomeStatus::Listed)
                    .with_url("https://blob/a")
                    .with_file_count(3),
            ],
            false,
        );
        s.total_tables = 2;
        s.cancelled = true;

        let report = render_summary(&s);
        assert!(report.contains("Mode:       dry run"));
        assert!(!report.contains("Output dir"));
        assert!(report.contains("1 table(s) have more than one file"));
        assert!(report.contains("Interrupted after 1 of 2 tables."));
    }

    #[test]
    fn empty_run() {
        let report = render_summary(&summary(Vec::new(), false));
        assert!(report.contains("No tables found."));
    }
}
