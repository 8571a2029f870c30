//! Session driver - feeds planned workloads through trials and comparison

use chrono::Utc;

use crate::config::HarnessConfig;
use crate::constants::REPORT_RULE;
use crate::models::{Author, PlannedWorkload, Strategy};

use super::aggregator::RepeatedTrials;
use super::comparison::{self, PerfVerdicts};
use super::process::ProcessRunner;
use super::report::{self, SessionReport, WorkloadReport};

/// Sequential grading session over a fixed plan
pub struct Session<R> {
    trials: RepeatedTrials<R>,
    reference_binary: String,
    perf_threshold: f64,
    num_runs: u32,
}

impl<R: ProcessRunner> Session<R> {
    pub fn new(process: R, config: &HarnessConfig) -> Self {
        Self {
            trials: RepeatedTrials::new(
                process,
                config.binaries.clone(),
                config.benchmark.num_runs,
            ),
            reference_binary: config.binaries.reference.display().to_string(),
            perf_threshold: config.benchmark.perf_threshold,
            num_runs: config.benchmark.num_runs,
        }
    }

    /// Run every planned workload in order and print the report.
    ///
    /// Never aborts: failed trials only remove measurements.
    pub async fn run(&self, plan: Vec<PlannedWorkload>) -> SessionReport {
        let started_at = Utc::now();
        let mut verdicts = PerfVerdicts::new();
        let mut workloads = Vec::with_capacity(plan.len());

        tracing::info!(
            workloads = plan.len(),
            runs = self.num_runs,
            threshold = self.perf_threshold,
            "Starting grading session"
        );

        for workload in plan {
            println!("{}", REPORT_RULE);
            println!("Executing test: {}...", workload.name);
            println!("Reference binary: {}", self.reference_binary);

            let run = self.trials.run_workload(workload).await;

            for author in Author::ALL {
                if !run.table.has_author(author) {
                    tracing::warn!(
                        workload = %run.workload.name,
                        %author,
                        "No measurements recorded"
                    );
                }
            }

            let comparison =
                comparison::compare_workload(&run.workload.name, &run.table, self.perf_threshold);
            print!("{}", report::render_comparison(&comparison));

            verdicts = verdicts.record(&comparison);
            workloads.push(WorkloadReport { run, comparison });
        }

        print!("{}", report::render_summary(&verdicts));

        for strategy in Strategy::ALL {
            if verdicts.get(strategy).compared == 0 {
                tracing::warn!(%strategy, "Strategy was never compared; verdict is vacuous");
            }
        }

        let report = SessionReport {
            started_at,
            finished_at: Utc::now(),
            perf_threshold: self.perf_threshold,
            num_runs: self.num_runs,
            workloads,
            verdicts,
        };

        tracing::info!(
            correctness_failures = report.correctness_failures(),
            all_passed = report.verdicts.all_passed(),
            "Grading session finished"
        );

        report
    }
}
