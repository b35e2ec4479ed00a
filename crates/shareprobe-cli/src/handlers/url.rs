//! `url` command: first signed URL of one table.

use serde_json::json;
use shareprobe_core::TableDescriptor;
use shareprobe_export::lookup_first_file;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::{CliConfig, bootstrap};
use crate::error::CliError;

/// Print the first signed file URL of `table`.
pub async fn execute(
    config: &CliConfig,
    table: &TableDescriptor,
    json: bool,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let ctx = bootstrap(config)?;
    let file = lookup_first_file(ctx.client, table, cancel).await?;

    if json {
        let value = json!({
            "table": table.qualified_name(),
            "url": file.url,
            "size": file.size,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", file.url);
    }
    Ok(())
}
