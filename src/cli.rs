//! Command-line surface

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};

/// Run task system performance tests
#[derive(Debug, Parser)]
#[command(name = "taskbench")]
#[command(about = "Run task system performance tests against a reference implementation")]
#[command(version)]
pub struct Cli {
    /// Max number of threads the task system can use (detected parallelism by default)
    #[arg(short = 'n', long, value_name = "N")]
    pub num_threads: Option<usize>,

    /// Tests to run (all catalog tests by default)
    #[arg(short = 't', long, value_name = "NAME", num_args = 1..)]
    pub test_names: Option<Vec<String>>,

    /// Also run the async variant of each selected test
    #[arg(short = 'a', long)]
    pub run_async: bool,

    /// Student binary (overrides STUDENT_BINARY)
    #[arg(long, value_name = "PATH")]
    pub student: Option<PathBuf>,

    /// Reference binary (overrides REFERENCE_BINARY)
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Trials per binary and test (overrides NUM_TEST_RUNS)
    #[arg(long, value_name = "N")]
    pub runs: Option<u32>,

    /// Maximum tolerated student/reference ratio (overrides PERF_THRESHOLD)
    #[arg(long, value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Kill a trial after this many seconds (overrides TRIAL_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Print the session report as JSON after the summary
    #[arg(long)]
    pub json: bool,

    /// List the test catalog and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, mut config: HarnessConfig) -> HarnessResult<HarnessConfig> {
        if let Some(ref student) = self.student {
            config.binaries.student = student.clone();
        }
        if let Some(ref reference) = self.reference {
            config.binaries.reference = reference.clone();
        }
        if let Some(runs) = self.runs {
            config.benchmark.num_runs = runs;
        }
        if let Some(threshold) = self.threshold {
            config.benchmark.perf_threshold = threshold;
        }
        if let Some(secs) = self.timeout_secs {
            config.benchmark.trial_timeout = Some(Duration::from_secs(secs));
        }

        config.benchmark.validate()?;
        Ok(config)
    }

    /// Thread count for workloads without a pinned value
    pub fn max_threads(&self, detected: usize) -> HarnessResult<usize> {
        match self.num_threads {
            Some(0) => Err(HarnessError::InvalidArgument(
                "--num-threads must be at least 1".to_string(),
            )),
            Some(n) => Ok(n),
            None => Ok(detected),
        }
    }
}

/// Number of execution contexts on this machine
pub fn detected_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
