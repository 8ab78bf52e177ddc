//! Data model and scheduling primitives for the myloader restore engine.
//!
//! This crate has no I/O and no SQL knowledge: it defines the job
//! envelope, the four queues workers and the orchestrator share, the
//! run-wide immutable configuration, and the two shared counters. The
//! walker (`myloader-io`), the rewriter (`myloader-rewrite`), and the
//! connection layer (`myloader-db`) all depend on it; it depends on none
//! of them.

pub mod config;
pub mod counters;
pub mod error;
pub mod job;
pub mod purge;
pub mod queues;
pub mod state;
pub mod table_info;

pub use config::RestoreConfig;
pub use counters::{ErrorCounter, ProgressCounter};
pub use error::{CoreError, Result};
pub use job::{Job, RestoreJob};
pub use purge::PurgeMode;
pub use queues::RestoreQueues;
pub use state::RestoreState;
pub use table_info::{TableInfo, TableMap};
