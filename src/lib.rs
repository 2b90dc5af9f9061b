//! fschurn - randomized filesystem churn benchmark
//!
//! fschurn hammers a directory with a randomized mix of file creates, reads,
//! appends, and deletes from many concurrent workers, measuring throughput
//! and elapsed-time characteristics of the underlying filesystem.
//!
//! # Architecture
//!
//! - **Deterministic generator**: seeded MT19937 stream, one per worker
//! - **Shared registry**: the set of files currently alive on disk
//! - **Executor**: performs one operation against registry + filesystem
//! - **Worker run loop**: barrier start, ratio-driven dispatch, termination
//! - **Reports**: per-worker and aggregate text or JSON output

pub mod config;
pub mod coordinator;
pub mod output;
pub mod prng;
pub mod registry;
pub mod stats;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use registry::FileRegistry;
pub use stats::WorkerStats;

/// Result type used throughout fschurn
pub type Result<T> = anyhow::Result<T>;
