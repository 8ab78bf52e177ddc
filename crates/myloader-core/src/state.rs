//! Grouped run-wide state: the four queues, the table map, and the two
//! shared counters, owned by the orchestrator and shared with every worker
//! thread via `Arc` (spec §9's "group these into an immutable
//! configuration value passed by reference plus two atomic counters").

use std::sync::Arc;

use crate::config::RestoreConfig;
use crate::counters::{ErrorCounter, ProgressCounter};
use crate::queues::RestoreQueues;
use crate::table_info::TableMap;

/// Everything established once before workers start and shared for the
/// rest of the run. `config` and `tables` never change after
/// construction; `errors` and `progress` are the only mutable state.
pub struct RestoreState {
    /// Immutable run configuration resolved from CLI flags.
    pub config: RestoreConfig,
    /// The four FIFO queues workers and the orchestrator share.
    pub queues: RestoreQueues,
    /// Per-table row counts read from `.metadata` files.
    pub tables: TableMap,
    /// Monotonically non-decreasing failure count.
    pub errors: ErrorCounter,
    /// Data files restored so far, out of `total_data_sql_files`.
    pub progress: ProgressCounter,
    /// Total number of data files the walker found, for progress reporting.
    pub total_data_sql_files: u64,
}

impl RestoreState {
    /// Builds a fresh, `Arc`-wrapped restore state. Queues, counters start
    /// empty; `config` and `tables` are already fully resolved by the time
    /// this is called (after the directory walk).
    pub fn new(config: RestoreConfig, tables: TableMap, total_data_sql_files: u64) -> Arc<Self> {
        Arc::new(Self {
            config,
            queues: RestoreQueues::new(),
            tables,
            errors: ErrorCounter::new(),
            progress: ProgressCounter::new(),
            total_data_sql_files,
        })
    }
}
