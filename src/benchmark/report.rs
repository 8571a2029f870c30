//! Console rendering of comparisons and the final summary

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{REPORT_RULE, verdicts};
use crate::models::{Author, Strategy};

use super::aggregator::{BestOfN, WorkloadRun};
use super::comparison::{Outcome, PerfVerdicts, WorkloadComparison};

/// Everything recorded for one workload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadReport {
    #[serde(flatten)]
    pub run: WorkloadRun,
    pub comparison: WorkloadComparison,
}

/// Full record of a grading session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub perf_threshold: f64,
    pub num_runs: u32,
    pub workloads: Vec<WorkloadReport>,
    pub verdicts: PerfVerdicts,
}

impl SessionReport {
    /// Best-of-N table recorded for `workload`
    pub fn best_of_n(&self, workload: &str) -> Option<&BestOfN> {
        self.workloads
            .iter()
            .find(|w| w.run.workload.name == workload)
            .map(|w| &w.run.table)
    }

    /// Number of trials that failed the correctness check
    pub fn correctness_failures(&self) -> usize {
        self.workloads.iter().map(|w| w.run.failures.len()).sum()
    }
}

fn format_ms(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| verdicts::MISSING.to_string())
}

/// Comparison table for one workload
pub fn render_comparison(comparison: &WorkloadComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for: {}", comparison.workload);
    let _ = writeln!(
        out,
        "{:<40}{:<10}{:<12}PERF?",
        "",
        Author::Student.tag(),
        Author::Reference.tag()
    );

    for row in &comparison.rows {
        let student = format_ms(row.student_ms);
        let reference = format_ms(row.reference_ms);
        let label = row.strategy.to_string();

        match row.outcome {
            Outcome::Compared { ratio, passed } => {
                let feedback = if passed { verdicts::OK } else { verdicts::NOT_OK };
                let _ = writeln!(
                    out,
                    "{:<40}{:<10}{:<12}{:.2}  {}",
                    label, student, reference, ratio, feedback
                );
            }
            Outcome::ZeroReference => {
                let _ = writeln!(out, "{:<40}{:<10}{:<12}n/a", label, student, reference);
            }
            // Strategies neither binary reported are left out
            Outcome::Missing if row.student_ms.is_none() && row.reference_ms.is_none() => {}
            Outcome::Missing => {
                let _ = writeln!(out, "{:<40}{:<10}{:<12}-", label, student, reference);
            }
        }
    }

    out
}

/// Final per-strategy summary
pub fn render_summary(verdicts: &PerfVerdicts) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_RULE);
    let _ = writeln!(out, "Overall performance results");

    for strategy in Strategy::ALL {
        let verdict = verdicts.get(strategy);
        let note = if verdict.compared == 0 {
            " (no comparable data)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<40}: {}{}",
            strategy.to_string(),
            verdict.feedback(),
            note
        );
    }

    out
}

/// Session banner
pub fn render_banner(total_tests: usize, detected_contexts: usize, max_threads: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_RULE);
    let _ = writeln!(
        out,
        "Running task system grading harness... ({} total tests)",
        total_tests
    );
    let _ = writeln!(
        out,
        "  - Detected CPU with {} execution contexts",
        detected_contexts
    );
    let _ = writeln!(
        out,
        "  - Task system configured to use at most {} threads",
        max_threads
    );
    let _ = writeln!(out, "{}", REPORT_RULE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::comparison::StrategyComparison;

    fn row(strategy: Strategy, student: Option<f64>, reference: Option<f64>, outcome: Outcome) -> StrategyComparison {
        StrategyComparison {
            strategy,
            student_ms: student,
            reference_ms: reference,
            outcome,
        }
    }

    #[test]
    fn test_render_comparison() {
        let comparison = WorkloadComparison {
            workload: "super_light".to_string(),
            rows: vec![
                row(
                    Strategy::Serial,
                    Some(12.0),
                    Some(9.0),
                    Outcome::Compared { ratio: 12.0 / 9.0, passed: false },
                ),
                row(
                    Strategy::ParallelAlwaysSpawn,
                    None,
                    Some(5.0),
                    Outcome::Missing,
                ),
                row(Strategy::ParallelThreadPoolSpin, None, None, Outcome::Missing),
                row(
                    Strategy::ParallelThreadPoolSleep,
                    Some(8.0),
                    Some(10.0),
                    Outcome::Compared { ratio: 0.8, passed: true },
                ),
            ],
        };

        let text = render_comparison(&comparison);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Results for: super_light");
        assert!(lines[1].ends_with("STUDENT   REFERENCE   PERF?"));
        assert!(lines[2].starts_with("[Serial]"));
        assert!(lines[2].ends_with("12.000    9.000       1.33  (NOT OK)"));
        assert!(lines[3].contains("Missing"));
        assert!(lines[4].ends_with("0.80  (OK)"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&PerfVerdicts::new());
        assert!(text.contains("Overall performance results"));
        assert_eq!(text.matches("All passed Perf (no comparable data)").count(), 4);
    }
}
