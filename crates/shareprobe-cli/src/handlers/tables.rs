//! `tables` command: discovery only.

use shareprobe_export::{ExportError, TableDiscovery};
use tokio_util::sync::CancellationToken;

use crate::bootstrap::{CliConfig, bootstrap};
use crate::error::CliError;
use crate::presentation::print_separator;

/// List every table the endpoint exposes, in server order.
pub async fn execute(
    config: &CliConfig,
    json: bool,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let ctx = bootstrap(config)?;
    let discovery = TableDiscovery::new(ctx.client.clone());

    let discovered = tokio::select! {
        biased;

        () = cancel.cancelled() => Err(ExportError::Cancelled),
        result = discovery.discover() => result,
    };
    let tables = discovered?;

    if json {
        let names: Vec<String> = tables.iter().map(ToString::to_string).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if tables.is_empty() {
        println!("No tables found at {}.", ctx.client.base_url());
        return Ok(());
    }

    println!("Found {} table(s) at {}:\n", tables.len(), ctx.client.base_url());
    println!("{:<24} {:<24} Table", "Share", "Schema");
    print_separator(72);
    for table in &tables {
        println!("{:<24} {:<24} {}", table.share, table.schema, table.name);
    }
    Ok(())
}
