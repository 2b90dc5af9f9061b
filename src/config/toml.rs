//! TOML configuration file parsing

use super::Config;
use crate::config::cli::{parse_size, Cli};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a loaded configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(ref dir) = cli.directory {
        config.directory = dir.clone();
    }

    // Workload overrides
    if let Some(ref size_str) = cli.block_size {
        config.workload.block_size = parse_size(size_str).context("Invalid block size")?;
    }
    if cli.block_aligned {
        config.workload.block_aligned = true;
    }
    if let Some(n) = cli.initial_files {
        config.workload.initial_files = n;
    }
    if let Some(ref size_str) = cli.min_file_size {
        config.workload.min_file_size =
            parse_size(size_str).context("Invalid minimum file size")?;
    }
    if let Some(ref size_str) = cli.max_file_size {
        config.workload.max_file_size =
            parse_size(size_str).context("Invalid maximum file size")?;
    }
    if let Some(ref size_str) = cli.min_write_size {
        config.workload.min_write_size =
            parse_size(size_str).context("Invalid minimum write size")?;
    }
    if let Some(ref size_str) = cli.max_write_size {
        config.workload.max_write_size =
            parse_size(size_str).context("Invalid maximum write size")?;
    }
    if let Some(ratio) = cli.io_dir_ratio {
        config.workload.io_dir_ratio = ratio;
    }
    if let Some(ratio) = cli.read_write_ratio {
        config.workload.read_write_ratio = ratio;
    }
    if let Some(ratio) = cli.create_delete_ratio {
        config.workload.create_delete_ratio = ratio;
    }
    if let Some(n) = cli.max_operations {
        config.workload.max_operations = n;
    }
    if let Some(secs) = cli.time_limit {
        config.workload.time_limit = secs;
    }

    // Worker overrides. Zero threads means one worker per CPU.
    if let Some(threads) = cli.threads {
        config.workers.threads = if threads == 0 {
            num_cpus::get()
        } else {
            threads
        };
    }
    if let Some(seed) = cli.seed {
        config.workers.seed = seed;
    }

    // Output overrides
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_toml_basic() {
        let toml = r#"
directory = "/mnt/scratch"

[workload]
block_size = 4096
initial_files = 50
max_operations = 2000

[workers]
threads = 4
seed = 99
"#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.directory, std::path::PathBuf::from("/mnt/scratch"));
        assert_eq!(config.workload.block_size, 4096);
        assert_eq!(config.workload.initial_files, 50);
        assert_eq!(config.workload.max_operations, 2000);
        assert_eq!(config.workers.threads, 4);
        assert_eq!(config.workers.seed, 99);
        // untouched fields keep their defaults
        assert_eq!(config.workload.min_file_size, 1024);
        assert_eq!(config.workload.io_dir_ratio, 0.90);
    }

    #[test]
    fn test_parse_toml_empty_is_defaults() {
        let config = parse_toml_string("").unwrap();
        assert_eq!(config.workload.block_size, 512);
        assert_eq!(config.workers.threads, 1);
    }

    #[test]
    fn test_parse_toml_rejects_garbage() {
        assert!(parse_toml_string("workload = 3").is_err());
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let config = parse_toml_string(
            r#"
[workload]
block_size = 4096

[workers]
threads = 2
"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "fschurn",
            "--block-size",
            "8k",
            "-p",
            "8",
            "--time-limit",
            "30",
        ])
        .unwrap();

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.workload.block_size, 8192);
        assert_eq!(merged.workers.threads, 8);
        assert_eq!(merged.workload.time_limit, 30);
    }

    #[test]
    fn test_merge_zero_threads_uses_cpu_count() {
        let cli = Cli::try_parse_from(["fschurn", "-p", "0"]).unwrap();
        let merged = merge_cli_with_config(&cli, Config::default()).unwrap();
        assert!(merged.workers.threads >= 1);
    }
}
