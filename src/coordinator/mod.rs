//! Benchmark orchestration
//!
//! Seeds the working directory with the initial file population, then
//! spawns the workers, releases them through a barrier so they start
//! together, and joins them to collect per-worker results.

use crate::config::Config;
use crate::registry::FileRegistry;
use crate::stats::WorkerStats;
use crate::worker::{Executor, Worker};
use anyhow::{anyhow, Context, Result};
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Barrier};
use std::thread;

/// Create the initial file population.
///
/// Runs single-threaded on the caller's thread with its own generator seed
/// (base seed - 1), so the population is identical for any worker count and
/// the worker streams stay untouched.
pub fn seed_files(config: &Arc<Config>, registry: &Arc<FileRegistry>) -> Result<()> {
    let seed = config.workers.seed.wrapping_sub(1);
    let mut executor = Executor::new(Arc::clone(config), Arc::clone(registry), seed);

    for _ in 0..config.workload.initial_files {
        executor
            .create_file()
            .context("Failed to create initial file")?;
    }

    Ok(())
}

/// Run the full benchmark: seed the directory, run the workers, and return
/// one result record per worker, indexed by worker id.
pub fn run(config: Arc<Config>) -> Result<Vec<WorkerStats>> {
    let registry = Arc::new(FileRegistry::new());
    seed_files(&config, &registry)?;
    run_workers(config, registry)
}

fn run_workers(config: Arc<Config>, registry: Arc<FileRegistry>) -> Result<Vec<WorkerStats>> {
    let threads = config.workers.threads;
    let barrier = Arc::new(Barrier::new(threads));
    let op_counter = Arc::new(AtomicU64::new(0));

    let handles = (0..threads)
        .map(|id| {
            let worker = Worker::new(id, Arc::clone(&config), Arc::clone(&registry));
            let barrier = Arc::clone(&barrier);
            let op_counter = Arc::clone(&op_counter);
            thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || worker.run(&barrier, &op_counter))
                .context("Failed to spawn worker thread")
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let stats = handle
            .join()
            .map_err(|_| anyhow!("Worker thread panicked"))?;
        results.push(stats);
    }

    Ok(results)
}
