//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod toml;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the benchmark files live in. Files are named by the
    /// decimal form of their identifier, directly in this directory.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub workload: WorkloadConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            workload: WorkloadConfig::default(),
            workers: WorkerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Workload shape: operation mix, sizes, and termination criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// I/O block size in bytes
    #[serde(default = "default_block_size")]
    pub block_size: u64,
    /// Truncate every write to a block-size multiple
    #[serde(default)]
    pub block_aligned: bool,
    /// Number of files to create before any worker starts
    #[serde(default = "default_initial_files")]
    pub initial_files: u64,
    /// Size range for newly created files (inclusive bounds, bytes)
    #[serde(default = "default_min_file_size")]
    pub min_file_size: u64,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Size range for append operations (inclusive bounds, bytes)
    #[serde(default = "default_min_write_size")]
    pub min_write_size: u64,
    #[serde(default = "default_max_write_size")]
    pub max_write_size: u64,
    /// Ratio of I/O (read/write) to directory (create/delete) operations
    #[serde(default = "default_io_dir_ratio")]
    pub io_dir_ratio: f64,
    /// Ratio of reads to writes within the I/O branch
    #[serde(default = "default_read_write_ratio")]
    pub read_write_ratio: f64,
    /// Ratio of creates to deletes within the directory branch
    #[serde(default = "default_create_delete_ratio")]
    pub create_delete_ratio: f64,
    /// Stop after this many operations across all workers (0 = unlimited).
    /// Approximate under concurrency: the total may overshoot by up to
    /// worker_count - 1.
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,
    /// Stop each worker after this many seconds (0 = unlimited)
    #[serde(default)]
    pub time_limit: u64,
}

fn default_block_size() -> u64 {
    512
}

fn default_initial_files() -> u64 {
    1000
}

fn default_min_file_size() -> u64 {
    1024
}

fn default_max_file_size() -> u64 {
    100 * 1024
}

fn default_min_write_size() -> u64 {
    512
}

fn default_max_write_size() -> u64 {
    10 * 1024
}

fn default_io_dir_ratio() -> f64 {
    0.90
}

fn default_read_write_ratio() -> f64 {
    0.50
}

fn default_create_delete_ratio() -> f64 {
    0.80
}

fn default_max_operations() -> u64 {
    10_000
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            block_aligned: false,
            initial_files: default_initial_files(),
            min_file_size: default_min_file_size(),
            max_file_size: default_max_file_size(),
            min_write_size: default_min_write_size(),
            max_write_size: default_max_write_size(),
            io_dir_ratio: default_io_dir_ratio(),
            read_write_ratio: default_read_write_ratio(),
            create_delete_ratio: default_create_delete_ratio(),
            max_operations: default_max_operations(),
            time_limit: 0,
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Base generator seed. Worker i runs on seed + i; initial seeding
    /// runs on seed - 1.
    #[serde(default = "default_seed")]
    pub seed: u32,
}

fn default_threads() -> usize {
    1
}

fn default_seed() -> u32 {
    0xdead_beef
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            seed: default_seed(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write a machine-readable report to this path
    pub json_output: Option<PathBuf>,
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark parameters:")?;
        writeln!(f, "  directory={}", self.directory.display())?;
        writeln!(f, "  block size={}", self.workload.block_size)?;
        writeln!(f, "  block aligned={}", self.workload.block_aligned)?;
        writeln!(f, "  initial files={}", self.workload.initial_files)?;
        writeln!(
            f,
            "  file size={}-{}",
            self.workload.min_file_size, self.workload.max_file_size
        )?;
        writeln!(
            f,
            "  write size={}-{}",
            self.workload.min_write_size, self.workload.max_write_size
        )?;
        writeln!(
            f,
            "  I/O operation/directory operation ratio={}",
            self.workload.io_dir_ratio
        )?;
        writeln!(f, "  read/write ratio={}", self.workload.read_write_ratio)?;
        writeln!(
            f,
            "  create/delete ratio={}",
            self.workload.create_delete_ratio
        )?;
        writeln!(f, "  max operations={}", self.workload.max_operations)?;
        writeln!(f, "  time limit={}", self.workload.time_limit)?;
        writeln!(f, "  threads={}", self.workers.threads)?;
        write!(f, "  seed={:#x}", self.workers.seed)
    }
}

// Validation methods

impl Config {
    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), String> {
        self.workload.validate()?;
        self.workers.validate()?;
        Ok(())
    }
}

impl WorkloadConfig {
    /// Validate the workload configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.block_size == 0 {
            return Err("block_size must be greater than 0".to_string());
        }

        if self.min_file_size > self.max_file_size {
            return Err(format!(
                "min_file_size ({}) must not exceed max_file_size ({})",
                self.min_file_size, self.max_file_size
            ));
        }
        if self.min_write_size > self.max_write_size {
            return Err(format!(
                "min_write_size ({}) must not exceed max_write_size ({})",
                self.min_write_size, self.max_write_size
            ));
        }

        // Sizes are drawn from a 32-bit generator range (inclusive, so
        // max + 1 must still fit in u32).
        let size_cap = u64::from(u32::MAX) - 1;
        if self.max_file_size > size_cap {
            return Err(format!("max_file_size must be at most {}", size_cap));
        }
        if self.max_write_size > size_cap {
            return Err(format!("max_write_size must be at most {}", size_cap));
        }

        for (name, ratio) in [
            ("io_dir_ratio", self.io_dir_ratio),
            ("read_write_ratio", self.read_write_ratio),
            ("create_delete_ratio", self.create_delete_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) || !ratio.is_finite() {
                return Err(format!("{} must be in [0, 1], got {}", name, ratio));
            }
        }

        Ok(())
    }
}

impl WorkerConfig {
    /// Validate the worker configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == 0 {
            return Err("threads must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workload.block_size, 512);
        assert_eq!(config.workload.initial_files, 1000);
        assert_eq!(config.workers.threads, 1);
        assert_eq!(config.workers.seed, 0xdead_beef);
    }

    #[test]
    fn test_reject_zero_block_size() {
        let mut config = Config::default();
        config.workload.block_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_inverted_size_ranges() {
        let mut config = Config::default();
        config.workload.min_file_size = 2048;
        config.workload.max_file_size = 1024;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workload.min_write_size = 4096;
        config.workload.max_write_size = 512;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_out_of_range_ratio() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let mut config = Config::default();
            config.workload.io_dir_ratio = bad;
            assert!(config.validate().is_err(), "ratio {} accepted", bad);
        }
    }

    #[test]
    fn test_reject_zero_threads() {
        let mut config = Config::default();
        config.workers.threads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_oversized_file_range() {
        let mut config = Config::default();
        config.workload.max_file_size = u64::from(u32::MAX);
        config.workload.min_file_size = 0;
        assert!(config.validate().is_err());
    }
}
