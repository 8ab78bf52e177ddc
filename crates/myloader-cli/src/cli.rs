//! Command-line surface (spec §6). A single flat flag set -- this tool has
//! no subcommands, unlike a multi-command CLI: it does one thing, restore
//! a dump directory, start to finish.

use std::path::PathBuf;

use clap::{Args, Parser};

/// Restores a mydumper-style logical dump directory into a running
/// MySQL-family server, in parallel.
#[derive(Parser, Debug, Clone)]
#[command(name = "myloader-rs", about = "Parallel logical-dump restore engine", version)]
pub struct Cli {
    /// Directory containing the dump to restore. Must contain a `metadata`
    /// sentinel file.
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// Statements per transaction for data jobs; `<= 1` disables batching.
    #[arg(short = 'q', long = "queries-per-transaction", default_value_t = 1000)]
    pub queries_per_transaction: u32,

    /// Purge pre-existing tables before recreating them (default purge
    /// mode becomes DROP unless `--purge-mode` overrides it).
    #[arg(short = 'o', long)]
    pub overwrite_tables: bool,

    /// Rewrite target database, overriding the name embedded in each dump
    /// filename.
    #[arg(short = 'B', long)]
    pub database: Option<String>,

    /// Restrict the dump walk to files prefixed `<source_db>.`.
    #[arg(short = 's', long = "source-db")]
    pub source_db: Option<String>,

    /// Keep binary logging enabled during restore (off by default).
    #[arg(short = 'e', long)]
    pub enable_binlog: bool,

    /// Enable the fast index-creation rewrite: load unindexed, add
    /// indexes and constraints afterwards (spec §4.3).
    #[arg(long)]
    pub innodb_optimize_keys: bool,

    /// `SET NAMES` charset, wrapped in a version-gated comment.
    #[arg(long, default_value = "binary")]
    pub set_names: String,

    /// Route log output to this file instead of stderr.
    #[arg(short = 'L', long)]
    pub logfile: Option<PathBuf>,

    /// Explicit purge policy; wins over the `--overwrite-tables` default.
    #[arg(long = "purge-mode")]
    pub purge_mode: Option<String>,

    /// Barrier all data loading before running any `ADD INDEX` job.
    #[arg(long)]
    pub sync_before_add_index: bool,

    /// Toggle `ALTER INSTANCE ... INNODB REDO_LOG` around the run.
    #[arg(long)]
    pub disable_redo_log: bool,

    /// Row-tuple threshold for splitting large `INSERT`s; `0` disables it.
    #[arg(short = 'r', long, default_value_t = 0)]
    pub rows: u64,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Worker connection count; defaults to the number of logical CPUs.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Enable debug-level logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Connection flags shared with this tool's companion dumper.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Server host.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port.
    #[arg(short = 'P', long, default_value_t = 3306)]
    pub port: u16,

    /// Username to connect as.
    #[arg(short = 'u', long, default_value = "root")]
    pub user: String,

    /// Password; prefer `--ask-password` over passing this on the command
    /// line where the process list can see it.
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Unix socket path, used instead of host/port when set.
    #[arg(short = 'S', long)]
    pub socket: Option<String>,

    /// Prompt for a password interactively instead of reading `--password`.
    #[arg(long)]
    pub ask_password: bool,
}
