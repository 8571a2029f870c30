//! Benchmark comparison engine
//!
//! A grading session runs each workload against two task-system binaries:
//!
//! 1. **Extractor** (`extractor.rs`): pulls `[<strategy>]: [<ms>] ms` lines
//!    out of a binary's output.
//! 2. **Trial runner** (`runner.rs`): one invocation of one binary; any
//!    failure becomes a correctness failure with no measurements.
//! 3. **Aggregator** (`aggregator.rs`): interleaved repeated trials,
//!    reduced to best-of-N per (author, strategy).
//! 4. **Comparison** (`comparison.rs`): student/reference ratios against the
//!    threshold and the session-wide verdicts.
//! 5. **Session** (`session.rs`): drives the planned workloads from the
//!    catalog (`catalog.rs`) in order.

pub mod aggregator;
pub mod catalog;
pub mod comparison;
pub mod extractor;
pub mod process;
pub mod report;
pub mod runner;
pub mod session;

pub use aggregator::{BestOfN, RepeatedTrials, WorkloadRun};
pub use catalog::WorkloadCatalog;
pub use comparison::{PerfVerdicts, WorkloadComparison};
pub use process::{Invocation, ProcessOutput, ProcessRunner, SystemRunner};
pub use report::SessionReport;
pub use runner::TrialRunner;
pub use session::Session;
