//! Immutable run-wide configuration.
//!
//! Everything here is resolved once from CLI flags before any worker
//! starts and never changes for the lifetime of the process (spec §9).

use std::path::PathBuf;

use crate::purge::PurgeMode;

/// Configuration shared by reference across the orchestrator and every
/// worker thread.
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    /// Dump directory to restore from.
    pub directory: PathBuf,
    /// Number of worker connections.
    pub num_threads: usize,
    /// Statements per transaction for data jobs; `<= 1` disables batching.
    pub commit_count: u32,
    /// Drop/purge existing tables before recreating them.
    pub overwrite_tables: bool,
    /// Target database to rewrite every statement into, overriding the
    /// database name embedded in each dump filename.
    pub database: Option<String>,
    /// Restrict the walker to files prefixed `<source_db>.`.
    pub source_db: Option<String>,
    /// Keep binary logging enabled during restore (off by default).
    pub enable_binlog: bool,
    /// Enable the fast index-creation rewrite (spec §4.3).
    pub innodb_optimize_keys: bool,
    /// `SET NAMES` charset, wrapped in a version-gated comment.
    pub set_names: String,
    /// Explicit or derived purge policy.
    pub purge_mode: PurgeMode,
    /// Barrier all data loading before starting `ADD INDEX` jobs.
    pub sync_before_add_index: bool,
    /// Toggle `ALTER INSTANCE {DISABLE|ENABLE} INNODB REDO_LOG` around the run.
    pub disable_redo_log: bool,
    /// Row-tuple threshold for splitting large `INSERT`s; `0` disables it.
    pub rows: u64,
}

impl RestoreConfig {
    /// Resolves the effective database name for a file whose name embeds
    /// `dump_db` -- the `--database` remap target if set, else `dump_db`
    /// itself. Mirrors the C code's ubiquitous `db ? db : database`.
    pub fn target_database<'a>(&'a self, dump_db: &'a str) -> &'a str {
        self.database.as_deref().unwrap_or(dump_db)
    }

    /// Whether the walker should consider a dump filename, given
    /// `--source-db` filtering.
    pub fn accepts_source(&self, filename: &str) -> bool {
        match &self.source_db {
            Some(source) => filename.starts_with(&format!("{source}.")),
            None => true,
        }
    }

    /// The `/*!40101 SET NAMES ...*/` statement for this run's charset.
    pub fn set_names_statement(&self) -> String {
        format!("/*!40101 SET NAMES {}*/", self.set_names)
    }
}
