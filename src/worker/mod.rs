//! Worker threads
//!
//! Each worker owns an [`Executor`] and loops: check termination, draw an
//! operation, execute it. Workers share only the registry and the global
//! operation counter; everything else is thread-local.

pub mod executor;

pub use executor::{Executor, OperationType};

use crate::config::Config;
use crate::registry::FileRegistry;
use crate::stats::WorkerStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::time::{Duration, Instant};

/// One benchmark worker
pub struct Worker {
    id: usize,
    executor: Executor,
    config: Arc<Config>,
}

impl Worker {
    /// Worker `id` draws from generator seed `base_seed + id`, giving each
    /// worker a distinct but reproducible operation stream.
    pub fn new(id: usize, config: Arc<Config>, registry: Arc<FileRegistry>) -> Self {
        let seed = config.workers.seed.wrapping_add(id as u32);
        Self {
            id,
            executor: Executor::new(Arc::clone(&config), registry, seed),
            config,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Run operations until a termination condition fires, then return the
    /// accumulated counters.
    ///
    /// Blocks on `barrier` first so every worker starts at the same instant.
    /// Termination is cooperative: the time limit is checked against this
    /// worker's own clock, and the operation budget is claimed from the
    /// shared counter one slot at a time. With the counter checked before
    /// each operation, the run-wide total can overshoot `max_operations` by
    /// at most one operation per extra worker.
    pub fn run(mut self, barrier: &Barrier, op_counter: &AtomicU64) -> WorkerStats {
        let max_operations = self.config.workload.max_operations;
        let time_limit = match self.config.workload.time_limit {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        barrier.wait();
        let start = Instant::now();

        loop {
            if let Some(limit) = time_limit {
                if start.elapsed() >= limit {
                    break;
                }
            }
            if max_operations > 0 && op_counter.fetch_add(1, Ordering::SeqCst) >= max_operations
            {
                break;
            }

            let op = self.executor.next_operation();
            self.executor.execute(op);
        }

        let mut stats = self.executor.into_stats();
        stats.elapsed = start.elapsed();
        stats
    }
}
