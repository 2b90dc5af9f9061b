//! fschurn CLI entry point

use anyhow::{anyhow, Context, Result};
use fschurn::config::cli::Cli;
use fschurn::config::toml::{merge_cli_with_config, parse_toml_file};
use fschurn::config::Config;
use fschurn::output::{json, text};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // File config first, CLI overrides on top
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    let config = merge_cli_with_config(&cli, base)?;
    config
        .validate()
        .map_err(|e| anyhow!(e))
        .context("Configuration validation failed")?;

    if cli.dump_config {
        println!("{}", config);
        return Ok(());
    }

    println!("fschurn v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", config);
    println!();
    println!("Starting benchmark...");

    let config = Arc::new(config);
    let results = fschurn::coordinator::run(Arc::clone(&config)).context("Benchmark failed")?;

    println!();
    text::print_results(&results);

    if let Some(ref path) = config.output.json_output {
        let report = json::build_report(&config, &results);
        json::write_json_output(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}
