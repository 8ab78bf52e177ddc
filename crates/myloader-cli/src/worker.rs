//! Worker dispatch loop (spec §4.6): each worker owns one connection and
//! loops over `main` until it receives `Shutdown`.

use std::sync::Arc;

use myloader_core::{Job, RestoreJob, RestoreState};
use myloader_db::{ConnectLock, DbError, SqlConnection, StatementExecutor};
use myloader_io::ScriptReader;
use myloader_rewrite::split_insert;
use tracing::error;

/// Spawns `state.config.num_threads` workers, each opening its own
/// connection via `connect` (serialized through `connect_lock`, spec
/// §4.6/§5) and looping over `main`. Returns the join handles so the
/// orchestrator can wait for them once `Shutdown` has been pushed.
pub fn spawn<C, F>(state: Arc<RestoreState>, connect_lock: Arc<ConnectLock>, connect: Arc<F>) -> Vec<std::thread::JoinHandle<()>>
where
    C: SqlConnection + Send + 'static,
    F: Fn() -> Result<C, DbError> + Send + Sync + 'static,
{
    (0..state.config.num_threads)
        .map(|id| {
            let state = Arc::clone(&state);
            let connect_lock = Arc::clone(&connect_lock);
            let connect = Arc::clone(&connect);
            std::thread::spawn(move || run_worker(id, state, connect_lock, connect))
        })
        .collect()
}

fn run_worker<C, F>(id: usize, state: Arc<RestoreState>, connect_lock: Arc<ConnectLock>, connect: Arc<F>)
where
    C: SqlConnection,
    F: Fn() -> Result<C, DbError>,
{
    let mut conn = match connect_lock.guarded(|| connect()) {
        Ok(conn) => conn,
        Err(e) => {
            error!(worker = id, error = %e, "worker failed to connect");
            std::process::exit(1);
        }
    };

    for statement in myloader_db::session_statements(&state.config) {
        if let Err(e) = conn.execute(&statement) {
            error!(worker = id, error = %e, "session setup statement failed");
            state.errors.increment();
        }
    }

    // Report readiness (spec §4.6 "pushes one token to ready").
    let _ = state.queues.ready_sender().send(());

    let main_rx = state.queues.main_receiver();
    let mut executor = StatementExecutor::new(state.config.commit_count);
    while let Ok(job) = main_rx.recv() {
        match job {
            Job::RestoreFilename(job) => {
                restore_filename(&mut conn, &state, &mut executor, &job);
                state.progress.increment();
            }
            Job::RestoreString(job) => {
                if let Some(statement) = &job.statement {
                    executor.execute_many(&mut conn, &state.errors, statement, true);
                }
            }
            Job::Wait(barrier) => {
                let _ = state.queues.ready_sender().send(());
                let _ = barrier.recv();
            }
            Job::Shutdown => break,
        }
    }
}

/// Replays one data file: a fresh [`StatementExecutor`] so commit batching
/// starts at zero for this file (spec §4.2), row-split on `INSERT`
/// statements when `--rows` is set.
fn restore_filename<C: SqlConnection>(conn: &mut C, state: &RestoreState, executor: &mut StatementExecutor, job: &RestoreJob) {
    let Some(filename) = &job.filename else { return };
    let path = state.config.directory.join(filename);

    if let Err(e) = conn.execute(&format!("USE `{}`", job.database)) {
        error!(database = %job.database, error = %e, "USE failed before data file");
        state.errors.increment();
    }

    let mut reader = match ScriptReader::open(&path) {
        Ok(reader) => reader,
        Err(e) => {
            error!(file = %filename, error = %e, "failed to open data file");
            state.errors.increment();
            return;
        }
    };

    *executor = StatementExecutor::new(state.config.commit_count);
    loop {
        match reader.next_statement() {
            Ok(Some(statement)) => {
                for chunk in split_if_insert(&statement, state.config.rows) {
                    executor.execute_data_statement(conn, &state.errors, chunk.trim());
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!(file = %filename, error = %e, "read error, abandoning file");
                state.errors.increment();
                break;
            }
        }
    }
}

fn split_if_insert(statement: &str, rows: u64) -> Vec<String> {
    if rows > 0 && statement.trim_start().starts_with("INSERT") {
        split_insert(statement, rows)
    } else {
        vec![statement.to_string()]
    }
}
