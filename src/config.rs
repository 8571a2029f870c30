//! Harness configuration management
//!
//! Configuration is loaded from environment variables (and an optional
//! `.env` file) at startup. Command-line flags override individual values.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_LOG_FILTER, DEFAULT_NUM_TEST_RUNS, DEFAULT_PERF_THRESHOLD, DEFAULT_STUDENT_BINARY,
    REFERENCE_BINARY_STEM,
};

/// Main harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub binaries: BinaryConfig,
    pub benchmark: BenchmarkConfig,
    pub rust_log: String,
}

/// Executables under comparison
#[derive(Debug, Clone)]
pub struct BinaryConfig {
    pub student: PathBuf,
    pub reference: PathBuf,
}

/// Trial and verdict parameters
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Trials per (workload, author) pair
    pub num_runs: u32,
    /// Student/reference ratio must be strictly below this
    pub perf_threshold: f64,
    /// Kill a trial that runs longer than this
    pub trial_timeout: Option<Duration>,
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            binaries: BinaryConfig::from_env(),
            benchmark: BenchmarkConfig::from_env()?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            binaries: BinaryConfig::default(),
            benchmark: BenchmarkConfig::default(),
            rust_log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl BinaryConfig {
    fn from_env() -> Self {
        Self {
            student: env::var("STUDENT_BINARY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STUDENT_BINARY)),
            reference: env::var("REFERENCE_BINARY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_reference_binary()),
        }
    }
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            student: PathBuf::from(DEFAULT_STUDENT_BINARY),
            reference: default_reference_binary(),
        }
    }
}

impl BenchmarkConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let num_runs = env::var("NUM_TEST_RUNS")
            .unwrap_or_else(|_| DEFAULT_NUM_TEST_RUNS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("NUM_TEST_RUNS".to_string()))?;
        let perf_threshold = env::var("PERF_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_PERF_THRESHOLD.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PERF_THRESHOLD".to_string()))?;
        let trial_timeout = match env::var("TRIAL_TIMEOUT_SECS") {
            Ok(v) => Some(Duration::from_secs(
                v.parse()
                    .map_err(|_| ConfigError::InvalidValue("TRIAL_TIMEOUT_SECS".to_string()))?,
            )),
            Err(_) => None,
        };

        let config = Self {
            num_runs,
            perf_threshold,
            trial_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the verdicts meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_runs == 0 {
            return Err(ConfigError::InvalidValue("NUM_TEST_RUNS".to_string()));
        }
        if !self.perf_threshold.is_finite() || self.perf_threshold <= 0.0 {
            return Err(ConfigError::InvalidValue("PERF_THRESHOLD".to_string()));
        }
        if self.trial_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidValue("TRIAL_TIMEOUT_SECS".to_string()));
        }
        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_TEST_RUNS,
            perf_threshold: DEFAULT_PERF_THRESHOLD,
            trial_timeout: None,
        }
    }
}

/// Reference binary name for the host platform
pub fn default_reference_binary() -> PathBuf {
    PathBuf::from(format!(
        "{}{}",
        REFERENCE_BINARY_STEM,
        reference_suffix(env::consts::OS, env::consts::ARCH)
    ))
}

/// Platform suffix of the reference binary
pub fn reference_suffix(os: &str, arch: &str) -> &'static str {
    match (os, arch) {
        ("macos", "aarch64") => "_osx_arm",
        ("macos", _) => "_osx_x86",
        (_, "aarch64") => "_linux_arm",
        _ => "_linux",
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = HarnessConfig::default();
        assert_eq!(config.benchmark.num_runs, 5);
        assert_eq!(config.benchmark.perf_threshold, 1.2);
        assert!(config.benchmark.trial_timeout.is_none());
        assert_eq!(config.binaries.student, PathBuf::from("./runtasks"));
        assert!(
            config
                .binaries
                .reference
                .to_string_lossy()
                .starts_with("./runtasks_ref_")
        );
    }

    #[test]
    fn test_reference_suffix() {
        assert_eq!(reference_suffix("macos", "aarch64"), "_osx_arm");
        assert_eq!(reference_suffix("macos", "x86_64"), "_osx_x86");
        assert_eq!(reference_suffix("linux", "aarch64"), "_linux_arm");
        assert_eq!(reference_suffix("linux", "x86_64"), "_linux");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());

        config.num_runs = 0;
        assert!(config.validate().is_err());

        config.num_runs = 3;
        config.perf_threshold = 0.0;
        assert!(config.validate().is_err());

        config.perf_threshold = f64::NAN;
        assert!(config.validate().is_err());

        config.perf_threshold = 1.5;
        config.trial_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
