//! Human-readable text output

use crate::stats::{aggregate, WorkerStats};

/// Print per-worker counters and run totals to the console
pub fn print_results(workers: &[WorkerStats]) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                   BENCHMARK RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for (id, stats) in workers.iter().enumerate() {
        println!("Worker {} ({:.3}s):", id, stats.elapsed_secs());
        print_counters(stats, "  ");
        println!();
    }

    let total = aggregate(workers);
    // Workers run concurrently, so the run's wall-clock time is the
    // average of the per-worker clocks, not their sum.
    let elapsed = if workers.is_empty() {
        0.0
    } else {
        total.elapsed_secs() / workers.len() as f64
    };

    println!("Totals ({:.3}s):", elapsed);
    print_counters(&total, "  ");
    if elapsed > 0.0 {
        println!(
            "  Rate:    {} ops/s, {}/s",
            format_number((total.total_ops() as f64 / elapsed) as u64),
            format_bytes((total.total_bytes() as f64 / elapsed) as u64),
        );
    }
    println!();
    println!("═══════════════════════════════════════════════════════════");
}

fn print_counters(stats: &WorkerStats, indent: &str) {
    println!(
        "{}Reads:   {} ops ({})",
        indent,
        format_number(stats.read_ops),
        format_bytes(stats.bytes_read)
    );
    println!(
        "{}Writes:  {} ops ({})",
        indent,
        format_number(stats.write_ops),
        format_bytes(stats.bytes_written)
    );
    println!("{}Creates: {}", indent, format_number(stats.create_ops));
    println!("{}Deletes: {}", indent, format_number(stats.delete_ops));
    println!(
        "{}Total:   {} ops ({})",
        indent,
        format_number(stats.total_ops()),
        format_bytes(stats.total_bytes())
    );
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    let mut remaining = digits.len();
    for c in digits.chars() {
        out.push(c);
        remaining -= 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }

    out
}

/// Format bytes with appropriate units
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
