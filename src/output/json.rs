//! JSON output formatting
//!
//! Serializes the effective configuration, per-worker counters, and run
//! totals into a single report file for downstream tooling.

use crate::config::Config;
use crate::stats::{aggregate, WorkerStats};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Complete machine-readable report
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub config: Config,
    pub workers: Vec<JsonWorkerStats>,
    pub totals: JsonTotals,
}

/// One worker's counters
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonWorkerStats {
    pub id: usize,
    pub read_ops: u64,
    pub write_ops: u64,
    pub create_ops: u64,
    pub delete_ops: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub elapsed_secs: f64,
}

impl JsonWorkerStats {
    fn new(id: usize, stats: &WorkerStats) -> Self {
        Self {
            id,
            read_ops: stats.read_ops,
            write_ops: stats.write_ops,
            create_ops: stats.create_ops,
            delete_ops: stats.delete_ops,
            bytes_read: stats.bytes_read,
            bytes_written: stats.bytes_written,
            elapsed_secs: stats.elapsed_secs(),
        }
    }
}

/// Summed counters across all workers, with derived rates
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonTotals {
    pub total_ops: u64,
    pub total_bytes: u64,
    pub read_ops: u64,
    pub write_ops: u64,
    pub create_ops: u64,
    pub delete_ops: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Average per-worker wall-clock time
    pub elapsed_secs: f64,
    pub ops_per_sec: f64,
    pub bytes_per_sec: f64,
}

/// Build the full report from the run's per-worker results
pub fn build_report(config: &Config, workers: &[WorkerStats]) -> JsonReport {
    let total = aggregate(workers);
    let elapsed = if workers.is_empty() {
        0.0
    } else {
        total.elapsed_secs() / workers.len() as f64
    };
    let rate = |count: u64| {
        if elapsed > 0.0 {
            count as f64 / elapsed
        } else {
            0.0
        }
    };

    JsonReport {
        config: config.clone(),
        workers: workers
            .iter()
            .enumerate()
            .map(|(id, stats)| JsonWorkerStats::new(id, stats))
            .collect(),
        totals: JsonTotals {
            total_ops: total.total_ops(),
            total_bytes: total.total_bytes(),
            read_ops: total.read_ops,
            write_ops: total.write_ops,
            create_ops: total.create_ops,
            delete_ops: total.delete_ops,
            bytes_read: total.bytes_read,
            bytes_written: total.bytes_written,
            elapsed_secs: elapsed,
            ops_per_sec: rate(total.total_ops()),
            bytes_per_sec: rate(total.total_bytes()),
        },
    }
}

/// Write the report as pretty-printed JSON
pub fn write_json_output(path: &Path, report: &JsonReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report).context("Failed to serialize JSON report")?;
    Ok(())
}
