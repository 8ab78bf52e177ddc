//! Entry point: parse flags, wire up logging and the database connection,
//! run the restore, and exit non-zero if anything failed (spec §7).

mod cli;
mod connect;
mod logging;
mod orchestrator;
mod redact;
mod runtime_config;
mod worker;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use myloader_db::MysqlConnection;
use tracing::{error, info};

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // No cooperative cancellation (spec §5): the first Ctrl+C is logged and
    // otherwise ignored, the run continues to completion. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        error!("interrupt received, run will continue to completion; press again to force exit");
    });

    let redacted_argv = redact::redact_for_display(&std::env::args().collect::<Vec<_>>());

    let cli = cli::Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.logfile.as_deref()) {
        eprintln!("failed to initialize logging: {e:#}");
        std::process::exit(1);
    }

    info!(argv = ?redacted_argv, "starting restore");

    match run(&cli) {
        Ok(0) => {}
        Ok(errors) => {
            error!(errors, "restore completed with errors");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &cli::Cli) -> anyhow::Result<u64> {
    let config = runtime_config::build(cli)?;
    let params = connect::resolve(&cli.connection)?;
    orchestrator::run(config, move || MysqlConnection::connect(&params))
}
