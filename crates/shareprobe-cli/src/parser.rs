//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shareprobe_core::{DEFAULT_PROFILE_PATH, TableDescriptor};
use shareprobe_export::DEFAULT_OUTPUT_DIR;

/// Export tables from a Delta Sharing endpoint.
///
/// Without a subcommand, runs the export: discover every table, resolve one
/// signed file per table and, with `--save`, download it.
#[derive(Debug, Parser)]
#[command(name = "shareprobe")]
#[command(version)]
pub struct Cli {
    /// Path to the sharing profile (JSON with `endpoint` and `bearerToken`)
    #[arg(
        long,
        global = true,
        env = "SHAREPROBE_CONFIG",
        default_value = DEFAULT_PROFILE_PATH
    )]
    pub config: PathBuf,

    /// Destination root for downloaded files
    #[arg(
        long = "output-dir",
        env = "SHAREPROBE_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Download the first file of each table (default is a dry run)
    #[arg(long)]
    pub save: bool,

    /// Approve every download without prompting
    #[arg(short = 'y', long, requires = "save")]
    pub yes: bool,

    /// Number of tables processed at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub concurrency: u16,

    /// Request timeout for sharing API calls, in seconds
    #[arg(long = "timeout", global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Commands other than the default export.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every table the endpoint exposes
    Tables,

    /// Print the first signed file URL of one table
    Url {
        /// Table reference as <share>.<schema>.<table>
        table: TableDescriptor,
    },
}
