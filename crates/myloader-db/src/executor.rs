//! Statement execution with per-file commit batching (spec §4.2).

use myloader_core::ErrorCounter;
use tracing::error;

use crate::connection::SqlConnection;

/// Executes statements against one connection, tracking the per-file
/// statement count needed to batch commits for data jobs.
///
/// Schema statements never participate in batching; construct a fresh
/// `StatementExecutor` per data file so the counter starts at zero for
/// each one.
pub struct StatementExecutor {
    commit_count: u32,
    since_commit: u32,
}

impl StatementExecutor {
    /// `commit_count <= 1` disables batching: every data statement
    /// auto-commits on its own.
    pub fn new(commit_count: u32) -> Self {
        Self { commit_count, since_commit: 0 }
    }

    /// Splits `text` on `;\n` and executes each resulting statement,
    /// applying commit batching only when `is_schema` is false.
    pub fn execute_many<C: SqlConnection>(&mut self, conn: &mut C, errors: &ErrorCounter, text: &str, is_schema: bool) {
        for statement in split_statements(text) {
            if is_schema {
                self.execute_schema_statement(conn, errors, statement);
            } else {
                self.execute_data_statement(conn, errors, statement);
            }
        }
    }

    /// Executes one schema statement. Never batches a commit.
    pub fn execute_schema_statement<C: SqlConnection>(&self, conn: &mut C, errors: &ErrorCounter, statement: &str) {
        run(conn, errors, statement);
    }

    /// Executes one data statement, issuing `COMMIT; START TRANSACTION`
    /// once `commit_count` statements have been executed since the last one.
    pub fn execute_data_statement<C: SqlConnection>(&mut self, conn: &mut C, errors: &ErrorCounter, statement: &str) {
        run(conn, errors, statement);
        if self.commit_count <= 1 {
            return;
        }
        self.since_commit += 1;
        if self.since_commit >= self.commit_count {
            run(conn, errors, "COMMIT");
            run(conn, errors, "START TRANSACTION");
            self.since_commit = 0;
        }
    }
}

fn run<C: SqlConnection>(conn: &mut C, errors: &ErrorCounter, statement: &str) {
    if let Err(e) = conn.execute(statement) {
        error!(statement, error = %e, "statement failed");
        errors.increment();
    }
}

/// Splits `text` into non-empty, trimmed `;\n`-delimited statements. A
/// [`crate::testing::RecordingConnection`]-friendly single statement with no
/// terminator at all passes through unchanged.
fn split_statements(text: &str) -> Vec<&str> {
    text.split(";\n").map(str::trim).filter(|s| !s.is_empty()).collect()
}
