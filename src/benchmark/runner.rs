//! Trial runner - one process invocation for one workload

use crate::error::TrialError;
use crate::models::Author;

use super::extractor::{self, Measurements};
use super::process::{Invocation, ProcessRunner};

/// Outcome of a single trial
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub author: Author,
    /// Empty when the trial failed
    pub measurements: Measurements,
    /// Set when the trial is a correctness failure
    pub failure: Option<TrialError>,
}

impl Trial {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Runs one invocation and extracts its timings
pub struct TrialRunner<R> {
    process: R,
}

impl<R: ProcessRunner> TrialRunner<R> {
    /// Create a new trial runner over a process capability
    pub fn new(process: R) -> Self {
        Self { process }
    }

    /// Run the invocation; never fails, failures become empty trials
    pub async fn run_trial(&self, invocation: &Invocation, author: Author) -> Trial {
        tracing::debug!(%author, command = %invocation, "Running trial");

        match self.measure(invocation, author).await {
            Ok(measurements) => Trial {
                author,
                measurements,
                failure: None,
            },
            Err(e) => {
                tracing::error!(%author, command = %invocation, error = %e, "Trial failed");
                println!("{}", e);
                println!("{} solution failed correctness check!", author);
                Trial {
                    author,
                    measurements: Measurements::new(),
                    failure: Some(e),
                }
            }
        }
    }

    async fn measure(&self, invocation: &Invocation, author: Author) -> Result<Measurements, TrialError> {
        let output = self.process.run(invocation).await?;
        let measurements = extractor::extract(&output.combined(), author);

        if measurements.is_empty() {
            return Err(TrialError::NoMeasurements);
        }

        Ok(measurements)
    }
}
