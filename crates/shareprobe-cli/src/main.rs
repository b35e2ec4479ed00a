//! CLI entry point.
//!
//! Loads `.env`, parses arguments, installs logging and the Ctrl-C handler,
//! then hands off to the command dispatcher.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use shareprobe_cli::{Cli, CliError, init_logging, run};

/// How long shutdown waits for blocking work, such as a prompt nobody answered.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report(&CliError::from(e)),
    };

    let cancel = CancellationToken::new();
    let result = runtime.block_on(async {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, stopping after in-flight work is dropped");
                on_interrupt.cancel();
            }
        });

        run(cli, &cancel).await
    });

    // A stdin read abandoned on cancel would otherwise keep the process alive
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &CliError) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}
