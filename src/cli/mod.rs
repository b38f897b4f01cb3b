//! Command-line front end: argument parsing and display infrastructure.
//!
//! The display-level atomic lives here rather than in the binary because
//! library code (the delete index's load-factor warning, the benchmark
//! driver) gates its diagnostics on it too.

pub mod args;
pub mod constants;
