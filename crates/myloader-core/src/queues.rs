//! The four FIFO queues the orchestrator and worker pool share, plus the
//! one-shot barrier primitive built on top of them.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use tracing::debug;

use crate::job::Job;

/// Owns the four MPMC queues described in spec §3: `main`, `ready`,
/// `fast_index`, and `constraints`.
///
/// `crossbeam-channel` gives every queue blocking, FIFO, multi-producer
/// multi-consumer semantics for free -- a `Receiver` clone handed to each
/// worker thread behaves like the C implementation's `GAsyncQueue`.
pub struct RestoreQueues {
    main_tx: Sender<Job>,
    main_rx: Receiver<Job>,
    ready_tx: Sender<()>,
    ready_rx: Receiver<()>,
    fast_index_tx: Sender<Job>,
    fast_index_rx: Receiver<Job>,
    constraints_tx: Sender<Job>,
    constraints_rx: Receiver<Job>,
}

impl RestoreQueues {
    /// Creates the four queues, all unbounded (the scheduler never wants a
    /// producer to block on queue depth -- only on worker availability).
    pub fn new() -> Self {
        let (main_tx, main_rx) = unbounded();
        let (ready_tx, ready_rx) = unbounded();
        let (fast_index_tx, fast_index_rx) = unbounded();
        let (constraints_tx, constraints_rx) = unbounded();
        Self {
            main_tx,
            main_rx,
            ready_tx,
            ready_rx,
            fast_index_tx,
            fast_index_rx,
            constraints_tx,
            constraints_rx,
        }
    }

    /// A sender clone onto `main`, for the orchestrator or a worker to push
    /// further work.
    pub fn main_sender(&self) -> Sender<Job> {
        self.main_tx.clone()
    }

    /// A receiver clone onto `main`, for a worker's dispatch loop.
    pub fn main_receiver(&self) -> Receiver<Job> {
        self.main_rx.clone()
    }

    /// A sender clone onto `ready`, for a worker to report readiness.
    pub fn ready_sender(&self) -> Sender<()> {
        self.ready_tx.clone()
    }

    /// Pushes a fast-index `ALTER TABLE ... ADD INDEX ...` job for later
    /// draining into `main`.
    pub fn push_fast_index(&self, job: Job) {
        let _ = self.fast_index_tx.send(job);
    }

    /// Pushes a constraint `ALTER TABLE ... ADD CONSTRAINT ...` job for
    /// later draining into `main`.
    pub fn push_constraint(&self, job: Job) {
        let _ = self.constraints_tx.send(job);
    }

    /// Drains every job currently staged in `fast_index` into `main`,
    /// without blocking for jobs that might arrive afterwards.
    pub fn drain_fast_index_into_main(&self) {
        let mut n = 0;
        while let Ok(job) = self.fast_index_rx.try_recv() {
            let _ = self.main_tx.send(job);
            n += 1;
        }
        debug!(count = n, "drained fast_index into main");
    }

    /// Drains every job currently staged in `constraints` into `main`.
    pub fn drain_constraints_into_main(&self) {
        let mut n = 0;
        while let Ok(job) = self.constraints_rx.try_recv() {
            let _ = self.main_tx.send(job);
            n += 1;
        }
        debug!(count = n, "drained constraints into main");
    }

    /// Pushes one [`Job::Shutdown`] per worker onto `main`.
    pub fn push_shutdown(&self, num_threads: usize) {
        for _ in 0..num_threads {
            let _ = self.main_tx.send(Job::Shutdown);
        }
    }

    /// Pushes `job` onto `main` directly.
    pub fn push_main(&self, job: Job) {
        let _ = self.main_tx.send(job);
    }

    /// Blocks until `num_threads` tokens have arrived on `ready`, without
    /// releasing anything afterwards. Used at worker-pool startup, where
    /// each worker posts one token before entering its dispatch loop and
    /// nothing needs to be unblocked in response (contrast
    /// [`Self::sync_threads`], which pairs this wait with a release).
    pub fn await_ready(&self, num_threads: usize) {
        for _ in 0..num_threads {
            let _ = self.ready_rx.recv();
        }
    }

    /// The reusable one-shot barrier described in spec §5: push one
    /// `Wait(barrier)` per worker, wait for all of them to park and report
    /// readiness, then release them all together.
    ///
    /// A fresh barrier channel is created on every call, matching the C
    /// implementation's "fresh queue per invocation."
    pub fn sync_threads(&self, num_threads: usize) {
        let (release_tx, release_rx) = bounded::<()>(num_threads);
        for _ in 0..num_threads {
            let _ = self.main_tx.send(Job::Wait(release_rx.clone()));
        }
        for _ in 0..num_threads {
            let _ = self.ready_rx.recv();
        }
        for _ in 0..num_threads {
            let _ = release_tx.send(());
        }
    }
}

impl Default for RestoreQueues {
    fn default() -> Self {
        Self::new()
    }
}
