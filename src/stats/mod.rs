//! Statistics collection
//!
//! Per-worker operation counters and byte volumes. A `WorkerStats` record
//! is mutated only by its owning worker and merged by the orchestrator
//! after the worker has been joined, so plain fields suffice; no atomics or
//! locking are involved.

use std::time::Duration;

/// Counters accumulated by one worker over a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkerStats {
    pub read_ops: u64,
    pub write_ops: u64,
    pub create_ops: u64,
    pub delete_ops: u64,

    pub bytes_read: u64,
    pub bytes_written: u64,

    /// Wall-clock time from the barrier release to the worker's own
    /// termination check firing
    pub elapsed: Duration,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read + write operations
    pub fn io_ops(&self) -> u64 {
        self.read_ops + self.write_ops
    }

    /// Create + delete operations
    pub fn dir_ops(&self) -> u64 {
        self.create_ops + self.delete_ops
    }

    pub fn total_ops(&self) -> u64 {
        self.io_ops() + self.dir_ops()
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes_read + self.bytes_written
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Fold another worker's counters into this record. Elapsed times are
    /// summed; the reporter divides by the worker count for averages.
    pub fn merge(&mut self, other: &WorkerStats) {
        self.read_ops += other.read_ops;
        self.write_ops += other.write_ops;
        self.create_ops += other.create_ops;
        self.delete_ops += other.delete_ops;
        self.bytes_read += other.bytes_read;
        self.bytes_written += other.bytes_written;
        self.elapsed += other.elapsed;
    }
}

/// Merge all per-worker records into a single aggregate view
pub fn aggregate(workers: &[WorkerStats]) -> WorkerStats {
    let mut total = WorkerStats::new();
    for stats in workers {
        total.merge(stats);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let stats = WorkerStats {
            read_ops: 3,
            write_ops: 2,
            create_ops: 4,
            delete_ops: 1,
            bytes_read: 100,
            bytes_written: 50,
            elapsed: Duration::from_secs(2),
        };

        assert_eq!(stats.io_ops(), 5);
        assert_eq!(stats.dir_ops(), 5);
        assert_eq!(stats.total_ops(), 10);
        assert_eq!(stats.total_bytes(), 150);
    }

    #[test]
    fn test_merge() {
        let mut a = WorkerStats {
            read_ops: 1,
            bytes_read: 10,
            elapsed: Duration::from_millis(500),
            ..Default::default()
        };
        let b = WorkerStats {
            write_ops: 2,
            bytes_written: 20,
            elapsed: Duration::from_millis(700),
            ..Default::default()
        };

        a.merge(&b);
        assert_eq!(a.read_ops, 1);
        assert_eq!(a.write_ops, 2);
        assert_eq!(a.bytes_read, 10);
        assert_eq!(a.bytes_written, 20);
        assert_eq!(a.elapsed, Duration::from_millis(1200));
    }

    #[test]
    fn test_aggregate_empty() {
        let total = aggregate(&[]);
        assert_eq!(total.total_ops(), 0);
        assert_eq!(total.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_aggregate_multiple() {
        let workers = vec![
            WorkerStats {
                read_ops: 5,
                ..Default::default()
            },
            WorkerStats {
                read_ops: 7,
                create_ops: 2,
                ..Default::default()
            },
        ];
        let total = aggregate(&workers);
        assert_eq!(total.read_ops, 12);
        assert_eq!(total.create_ops, 2);
        assert_eq!(total.total_ops(), 14);
    }
}
