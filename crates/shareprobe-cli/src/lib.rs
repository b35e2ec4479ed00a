#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings outside the tests that use them
#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;

pub mod approval;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use error::CliError;
pub use parser::{Cli, Commands};

/// Install the stderr tracing subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, cancel: &CancellationToken) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli);

    match cli.command {
        None => {
            let args = handlers::export::ExportArgs {
                output_dir: cli.output_dir,
                save: cli.save,
                yes: cli.yes,
                concurrency: usize::from(cli.concurrency),
                json: cli.json,
            };
            handlers::export::execute(&config, args, cancel).await
        }
        Some(Commands::Tables) => handlers::tables::execute(&config, cli.json, cancel).await,
        Some(Commands::Url { table }) => {
            handlers::url::execute(&config, &table, cli.json, cancel).await
        }
    }
}
