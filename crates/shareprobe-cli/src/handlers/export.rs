//! Default command: discover, resolve and (optionally) download.

use std::path::PathBuf;
use std::sync::Arc;

use shareprobe_core::ProfileFileSource;
use shareprobe_export::{
    AlwaysApprove, ApprovalPolicy, ExportDeps, ExportMode, ExportOptions, HttpFileTransfer,
    run_with_profile,
};
use tokio_util::sync::CancellationToken;

use crate::approval::InteractiveApproval;
use crate::bootstrap::{CliConfig, connect};
use crate::error::CliError;
use crate::presentation::print_summary;

/// Export-specific arguments.
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub output_dir: PathBuf,
    pub save: bool,
    pub yes: bool,
    pub concurrency: usize,
    pub json: bool,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_mode(ExportMode::from_save_flag(self.save))
            .with_output_dir(self.output_dir.clone())
            .with_concurrency(self.concurrency)
    }

    fn approval(&self, cancel: &CancellationToken) -> Arc<dyn ApprovalPolicy> {
        if self.yes {
            Arc::new(AlwaysApprove)
        } else {
            Arc::new(InteractiveApproval::new(cancel.clone()))
        }
    }
}

/// Execute the export.
///
/// The summary is printed even when the run was interrupted; the exit code
/// then reports the interruption.
pub async fn execute(
    config: &CliConfig,
    args: ExportArgs,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let transfer = HttpFileTransfer::new().map_err(|e| CliError::Core(e.to_string()))?;
    let deps = ExportDeps {
        approval: args.approval(cancel),
        transfer: Arc::new(transfer),
    };

    let summary = run_with_profile(
        &ProfileFileSource,
        &config.profile_path,
        |credentials| connect(credentials, config),
        args.options(),
        deps,
        cancel,
    )
    .await?;

    print_summary(&summary, args.json)?;

    if summary.cancelled {
        return Err(CliError::Cancelled);
    }
    Ok(())
}
