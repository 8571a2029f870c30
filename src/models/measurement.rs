//! Measurement identity types
//!
//! A measurement is identified by who produced it ([`Author`]) and how the
//! task system executed the workload ([`Strategy`]).

use serde::{Deserialize, Serialize};

/// Which binary produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Author {
    /// Implementation under test
    Student,
    /// Trusted baseline
    Reference,
}

impl Author {
    /// Both authors, in report column order
    pub const ALL: [Author; 2] = [Author::Student, Author::Reference];

    /// Tag used as the measurement key prefix
    pub fn tag(&self) -> &'static str {
        match self {
            Author::Student => "STUDENT",
            Author::Reference => "REFERENCE",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Scheduling mode a task-system binary reports a timing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Serial,
    ParallelAlwaysSpawn,
    ParallelThreadPoolSpin,
    ParallelThreadPoolSleep,
}

impl Strategy {
    /// All strategies, in report order
    pub const ALL: [Strategy; 4] = [
        Strategy::Serial,
        Strategy::ParallelAlwaysSpawn,
        Strategy::ParallelThreadPoolSpin,
        Strategy::ParallelThreadPoolSleep,
    ];

    /// Label as printed by the task-system binaries (without brackets)
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Serial => "Serial",
            Strategy::ParallelAlwaysSpawn => "Parallel + Always Spawn",
            Strategy::ParallelThreadPoolSpin => "Parallel + Thread Pool + Spin",
            Strategy::ParallelThreadPoolSleep => "Parallel + Thread Pool + Sleep",
        }
    }

    /// Parse a label printed by a binary
    pub fn from_label(label: &str) -> Option<Self> {
        Strategy::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

/// (author, strategy) pair identifying one timing series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeasurementKey {
    pub author: Author,
    pub strategy: Strategy,
}

impl MeasurementKey {
    pub fn new(author: Author, strategy: Strategy) -> Self {
        Self { author, strategy }
    }
}

impl std::fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.author, self.strategy)
    }
}
