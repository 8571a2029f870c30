//! Taskbench - Task System Grading Harness
//!
//! Benchmarks a student task-system binary against a reference binary over a
//! fixed catalog of workloads and reports, per scheduling strategy, whether
//! the student stays within a tolerated multiple of the reference time.
//!
//! # Architecture
//!
//! - **Models**: closed sets (authors, strategies) and workloads
//! - **Benchmark**: extraction, trials, best-of-N, comparison, session
//! - **Config / CLI**: environment configuration and command-line overrides

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult, TrialError};
