//! Repeated-trial aggregation
//!
//! Each workload is run `num_runs` times per author, interleaved
//! (reference, student, reference, student, ...) so slow drift in system
//! load hits both binaries alike. Every (author, strategy) series is then
//! reduced to its minimum.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::BinaryConfig;
use crate::models::{Author, MeasurementKey, PlannedWorkload, Strategy};

use super::extractor::{self, Measurements};
use super::process::{Invocation, ProcessRunner};
use super::runner::{Trial, TrialRunner};

/// Best (minimum) observed duration per key for one workload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestOfN {
    best: BTreeMap<MeasurementKey, f64>,
}

impl BestOfN {
    /// Reduce every series to its minimum; empty series yield no entry
    pub fn from_measurements(measurements: &Measurements) -> Self {
        let best = measurements
            .iter()
            .filter_map(|(key, values)| {
                values
                    .iter()
                    .copied()
                    .reduce(f64::min)
                    .map(|min| (*key, min))
            })
            .collect();

        Self { best }
    }

    pub fn get(&self, author: Author, strategy: Strategy) -> Option<f64> {
        self.best.get(&MeasurementKey::new(author, strategy)).copied()
    }

    /// Whether any strategy was measured for `author`
    pub fn has_author(&self, author: Author) -> bool {
        self.best.keys().any(|k| k.author == author)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

impl FromIterator<(MeasurementKey, f64)> for BestOfN {
    fn from_iter<I: IntoIterator<Item = (MeasurementKey, f64)>>(iter: I) -> Self {
        Self {
            best: iter.into_iter().collect(),
        }
    }
}

// Keys serialize as "STUDENT [Serial]" so the table reads like the console output
impl Serialize for BestOfN {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.best.len()))?;
        for (key, value) in &self.best {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

/// A trial that failed the correctness check
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CorrectnessFailure {
    pub author: Author,
    /// 1-indexed trial number
    pub trial: u32,
    pub reason: String,
}

/// Collects trials for one workload
#[derive(Debug, Default)]
pub struct TrialCollector {
    measurements: Measurements,
    failures: Vec<CorrectnessFailure>,
    trials: u32,
}

impl TrialCollector {
    /// Create a new trial collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished trial
    pub fn add_trial(&mut self, round: u32, trial: Trial) {
        self.trials += 1;
        if let Some(failure) = trial.failure {
            self.failures.push(CorrectnessFailure {
                author: trial.author,
                trial: round,
                reason: failure.to_string(),
            });
        }
        extractor::merge(&mut self.measurements, trial.measurements);
    }

    /// Get number of trials added
    pub fn trial_count(&self) -> u32 {
        self.trials
    }

    /// Reduce the collected trials
    pub fn finish(self, workload: PlannedWorkload) -> WorkloadRun {
        WorkloadRun {
            table: BestOfN::from_measurements(&self.measurements),
            workload,
            failures: self.failures,
        }
    }
}

/// Aggregated result of all trials for one workload
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkloadRun {
    pub workload: PlannedWorkload,
    pub table: BestOfN,
    pub failures: Vec<CorrectnessFailure>,
}

/// Runs the interleaved trial schedule for each workload
pub struct RepeatedTrials<R> {
    trials: TrialRunner<R>,
    binaries: BinaryConfig,
    num_runs: u32,
}

impl<R: ProcessRunner> RepeatedTrials<R> {
    pub fn new(process: R, binaries: BinaryConfig, num_runs: u32) -> Self {
        Self {
            trials: TrialRunner::new(process),
            binaries,
            num_runs,
        }
    }

    /// Run every trial for `workload` and reduce to best-of-N
    pub async fn run_workload(&self, workload: PlannedWorkload) -> WorkloadRun {
        let schedule = [
            (
                Author::Reference,
                Invocation::task_system(&self.binaries.reference, workload.num_threads, &workload.name),
            ),
            (
                Author::Student,
                Invocation::task_system(&self.binaries.student, workload.num_threads, &workload.name),
            ),
        ];

        let mut collector = TrialCollector::new();

        for round in 1..=self.num_runs {
            for (author, invocation) in &schedule {
                let trial = self.trials.run_trial(invocation, *author).await;
                tracing::debug!(
                    workload = %workload.name,
                    %author,
                    trial = round,
                    failed = trial.is_failure(),
                    "Trial finished"
                );
                collector.add_trial(round, trial);
            }
        }

        tracing::debug!(
            workload = %workload.name,
            trials = collector.trial_count(),
            "All trials finished"
        );

        collector.finish(workload)
    }
}
