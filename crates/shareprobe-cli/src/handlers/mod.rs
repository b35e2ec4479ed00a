//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(config: &CliConfig, ..., cancel) -> Result<(), CliError>`
//! - Build collaborators, delegate to the export crate, print the result
//!
//! Handlers should NOT contain pipeline logic.

pub mod export;
pub mod tables;
pub mod url;
