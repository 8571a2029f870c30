//! Domain models
//!
//! Closed sets (authors, strategies) and workload descriptions shared by
//! the benchmark engine.

pub mod measurement;
pub mod workload;

pub use measurement::*;
pub use workload::*;
