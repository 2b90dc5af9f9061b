//! CLI argument parsing

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Filesystem churn benchmark
///
/// Creates, reads, appends, and deletes files in a working directory from
/// many concurrent workers, according to configurable operation ratios.
#[derive(Parser, Debug)]
#[command(name = "fschurn", version, about)]
pub struct Cli {
    /// Run the benchmark in this directory
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Benchmark configuration file (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dump the effective benchmark configuration and exit
    #[arg(short = 'd', long)]
    pub dump_config: bool,

    /// Run multiple worker threads in parallel (0 = one per CPU)
    #[arg(short = 'p', long, value_name = "THREADS")]
    pub threads: Option<usize>,

    /// Generator seed value
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// I/O block size (accepts k/M/G suffixes)
    #[arg(long, value_name = "SIZE")]
    pub block_size: Option<String>,

    /// Truncate every write to a block-size multiple
    #[arg(long)]
    pub block_aligned: bool,

    /// Number of files to create before the benchmark runs
    #[arg(long, value_name = "N")]
    pub initial_files: Option<u64>,

    /// Minimum initial file size
    #[arg(long, value_name = "SIZE")]
    pub min_file_size: Option<String>,

    /// Maximum initial file size
    #[arg(long, value_name = "SIZE")]
    pub max_file_size: Option<String>,

    /// Minimum append size
    #[arg(long, value_name = "SIZE")]
    pub min_write_size: Option<String>,

    /// Maximum append size
    #[arg(long, value_name = "SIZE")]
    pub max_write_size: Option<String>,

    /// Ratio of I/O (read/write) to directory (create/delete) operations
    #[arg(long, value_name = "RATIO")]
    pub io_dir_ratio: Option<f64>,

    /// Ratio of reads to writes
    #[arg(long, value_name = "RATIO")]
    pub read_write_ratio: Option<f64>,

    /// Ratio of creates to deletes
    #[arg(long, value_name = "RATIO")]
    pub create_delete_ratio: Option<f64>,

    /// Stop after N operations across all workers (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_operations: Option<u64>,

    /// Stop after SECS seconds (0 = unlimited)
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,

    /// Write a machine-readable report to FILE
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parse size string (e.g., "1G", "100M", "4k") to bytes
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_uppercase();
    if s.is_empty() {
        anyhow::bail!("Empty size string");
    }

    let (num_str, multiplier) = if s.ends_with('K') {
        (&s[..s.len() - 1], 1024u64)
    } else if s.ends_with('M') {
        (&s[..s.len() - 1], 1024 * 1024)
    } else if s.ends_with('G') {
        (&s[..s.len() - 1], 1024 * 1024 * 1024)
    } else if s.ends_with('T') {
        (&s[..s.len() - 1], 1024 * 1024 * 1024 * 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid number in size: {}", num_str))?;

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4k").unwrap(), 4096);
        assert_eq!(parse_size("1M").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert!(parse_size("").is_err());
        assert!(parse_size("12x").is_err());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from(["fschurn", "-p", "4", "-s", "123", "-C", "/tmp/bench"])
            .unwrap();
        assert_eq!(cli.threads, Some(4));
        assert_eq!(cli.seed, Some(123));
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp/bench")));
        assert!(!cli.dump_config);
    }

    #[test]
    fn test_cli_workload_overrides() {
        let cli = Cli::try_parse_from([
            "fschurn",
            "--block-size",
            "4k",
            "--block-aligned",
            "--max-operations",
            "500",
            "--io-dir-ratio",
            "0.75",
        ])
        .unwrap();
        assert_eq!(cli.block_size.as_deref(), Some("4k"));
        assert!(cli.block_aligned);
        assert_eq!(cli.max_operations, Some(500));
        assert_eq!(cli.io_dir_ratio, Some(0.75));
    }
}
