//! Work items processed by the worker pool.

use crossbeam_channel::Receiver;

/// A single unit of restore work: either "replay this file" or "execute
/// this already-in-memory statement text".
///
/// Consumed exactly once by one worker; the owning worker drops whatever
/// buffers are attached once it finishes.
#[derive(Debug, Clone)]
pub struct RestoreJob {
    /// Dump-relative filename to replay, if this job reads from disk.
    pub filename: Option<String>,
    /// Target database (after any `--database` remap has been applied).
    pub database: String,
    /// Target table, if this job is table-scoped.
    pub table: Option<String>,
    /// In-memory SQL text to execute, if this job does not read from disk.
    /// May contain more than one `;\n`-terminated statement.
    pub statement: Option<String>,
    /// Data-file chunk index (0 for schema/string jobs).
    pub part: u64,
}

impl RestoreJob {
    /// Builds a job that replays `filename` from disk.
    pub fn from_file(filename: impl Into<String>, database: impl Into<String>, table: impl Into<String>, part: u64) -> Self {
        Self {
            filename: Some(filename.into()),
            database: database.into(),
            table: Some(table.into()),
            statement: None,
            part,
        }
    }

    /// Builds a job that executes in-memory `statement` text directly.
    pub fn from_statement(database: impl Into<String>, table: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            filename: None,
            database: database.into(),
            table: Some(table.into()),
            statement: Some(statement.into()),
            part: 0,
        }
    }
}

/// Tagged union of everything a worker can be asked to do.
#[derive(Debug, Clone)]
pub enum Job {
    /// Read `job.filename` from disk and replay its statements.
    RestoreFilename(RestoreJob),
    /// Execute `job.statement` directly, without touching disk.
    RestoreString(RestoreJob),
    /// Report readiness on `ready`, then block until released on this
    /// one-shot channel. See [`crate::queues::RestoreQueues::sync_threads`].
    Wait(Receiver<()>),
    /// Close the connection and exit the dispatch loop.
    Shutdown,
}
