//! Routes `tracing` output to stderr or `--logfile`, gated on `--verbose`
//! (spec §6).

use std::path::Path;

/// Initializes the global `tracing` subscriber. `info` level by default,
/// `debug` with `--verbose`; `--logfile` redirects from stderr to that
/// file, appending across runs.
pub fn init(verbose: bool, logfile: Option<&Path>) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    match logfile {
        Some(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt().with_env_filter(level).with_writer(file).with_ansi(false).init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(level).with_writer(std::io::stderr).init();
        }
    }
    Ok(())
}
