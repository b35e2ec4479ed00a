//! Domain types shared by every shareprobe crate.

mod outcome;
mod table;

pub use outcome::{Outcome, OutcomeStatus, RunSummary};
pub use table::{FileEntry, SchemaDescriptor, ShareDescriptor, TableDescriptor, TableParseError};
