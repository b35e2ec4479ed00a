#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod aggregator;
mod destination;
mod discovery;
mod error;
mod gate;
mod lookup;
mod resolver;
mod runner;
mod transfer;

#[cfg(test)]
mod testing;

// Dev-only crates used by the integration suite
#[cfg(test)]
use mockall as _;

// ============================================================================
// Public API
// ============================================================================

pub use aggregator::ResultAggregator;
pub use destination::{DestinationPlanner, RunStamp, ensure_parent_dir};
pub use discovery::TableDiscovery;
pub use error::ExportError;
pub use gate::{
    AlwaysApprove, ApprovalPolicy, ApprovalRequest, ApproveWith, DownloadGate, ExportMode,
    NeverApprove,
};
pub use lookup::lookup_first_file;
pub use resolver::FileResolver;
pub use runner::{DEFAULT_OUTPUT_DIR, ExportDeps, ExportOptions, Exporter, run_with_profile};
pub use transfer::{FileTransfer, HttpFileTransfer, TransferError};
