//! Result reporting
//!
//! Text report for the console and an optional machine-readable JSON file.

pub mod json;
pub mod text;
