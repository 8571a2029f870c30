//! Error types
//!
//! Trial failures are absorbed at the trial boundary and reported as
//! correctness failures; only start-up problems surface as [`HarnessError`].

use std::time::Duration;

use crate::config::ConfigError;

/// Harness-level error type
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias using HarnessError
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Why a single trial produced no measurements
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrialError {
    #[error("Failed to launch {program}: {message}")]
    Launch { program: String, message: String },

    #[error("Process exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Killed by signal {signal}")]
    Killed { signal: i32 },

    #[error("Timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Process printed no timing lines")]
    NoMeasurements,
}
