//! Workload models

use serde::Serialize;

/// Thread count a workload runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the session-wide default
    SessionDefault,
    /// Always run with this many threads
    Pinned(usize),
}

impl ThreadCount {
    /// Resolve against the session default
    pub fn resolve(&self, session_default: usize) -> usize {
        match self {
            ThreadCount::SessionDefault => session_default,
            ThreadCount::Pinned(n) => *n,
        }
    }
}

/// Catalog entry for a named benchmark scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Workload {
    pub name: &'static str,
    pub threads: ThreadCount,
}

impl Workload {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            threads: ThreadCount::SessionDefault,
        }
    }

    pub const fn pinned(name: &'static str, threads: usize) -> Self {
        Self {
            name,
            threads: ThreadCount::Pinned(threads),
        }
    }
}

/// A workload resolved for execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedWorkload {
    /// Name passed to the binaries (may carry the async suffix)
    pub name: String,
    /// Concrete `-n` value
    pub num_threads: usize,
}
