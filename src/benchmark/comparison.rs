//! Student vs. reference comparison and cumulative verdicts

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::verdicts;
use crate::models::{Author, Strategy};

use super::aggregator::BestOfN;

/// Result of comparing one strategy at one workload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Student or reference value absent; no verdict change
    Missing,
    /// Reference reported 0 ms, so no ratio exists; no verdict change
    ZeroReference,
    Compared { ratio: f64, passed: bool },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Compared { passed: false, .. })
    }
}

/// One row of a workload comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyComparison {
    pub strategy: Strategy,
    pub student_ms: Option<f64>,
    pub reference_ms: Option<f64>,
    pub outcome: Outcome,
}

/// Comparison rows for every strategy at one workload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadComparison {
    pub workload: String,
    pub rows: Vec<StrategyComparison>,
}

impl WorkloadComparison {
    pub fn row(&self, strategy: Strategy) -> Option<&StrategyComparison> {
        self.rows.iter().find(|r| r.strategy == strategy)
    }
}

/// Compare a single pair of best-of-N values
pub fn compare_pair(student_ms: Option<f64>, reference_ms: Option<f64>, threshold: f64) -> Outcome {
    match (student_ms, reference_ms) {
        (Some(student), Some(reference)) => {
            if reference <= 0.0 {
                return Outcome::ZeroReference;
            }
            let ratio = student / reference;
            Outcome::Compared {
                ratio,
                passed: ratio < threshold,
            }
        }
        _ => Outcome::Missing,
    }
}

/// Compare every strategy of one workload's best-of-N table
pub fn compare_workload(workload: &str, table: &BestOfN, threshold: f64) -> WorkloadComparison {
    let rows = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let student_ms = table.get(Author::Student, strategy);
            let reference_ms = table.get(Author::Reference, strategy);
            let outcome = compare_pair(student_ms, reference_ms, threshold);

            if let Outcome::Compared { ratio, passed } = outcome {
                tracing::debug!(workload, %strategy, ratio, passed, "Compared strategy");
            }

            StrategyComparison {
                strategy,
                student_ms,
                reference_ms,
                outcome,
            }
        })
        .collect();

    WorkloadComparison {
        workload: workload.to_string(),
        rows,
    }
}

/// Cumulative verdict for one strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyVerdict {
    /// False once any workload failed; never reset
    pub passed: bool,
    /// Number of workloads at which a ratio was computed
    pub compared: u32,
}

impl StrategyVerdict {
    /// Fixed summary string for this verdict
    pub fn feedback(&self) -> &'static str {
        if self.passed {
            verdicts::ALL_PASSED
        } else {
            verdicts::NOT_ALL_PASSED
        }
    }
}

/// Session-wide per-strategy verdicts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PerfVerdicts {
    verdicts: BTreeMap<Strategy, StrategyVerdict>,
}

impl PerfVerdicts {
    /// Every strategy starts out passing
    pub fn new() -> Self {
        let verdicts = Strategy::ALL
            .into_iter()
            .map(|s| {
                (
                    s,
                    StrategyVerdict {
                        passed: true,
                        compared: 0,
                    },
                )
            })
            .collect();
        Self { verdicts }
    }

    /// Fold one workload's comparison into the verdicts
    pub fn record(mut self, comparison: &WorkloadComparison) -> Self {
        for row in &comparison.rows {
            if let Outcome::Compared { passed, .. } = row.outcome {
                let verdict = self
                    .verdicts
                    .entry(row.strategy)
                    .or_insert(StrategyVerdict {
                        passed: true,
                        compared: 0,
                    });
                verdict.compared += 1;
                verdict.passed &= passed;
            }
        }
        self
    }

    pub fn get(&self, strategy: Strategy) -> StrategyVerdict {
        self.verdicts.get(&strategy).copied().unwrap_or(StrategyVerdict {
            passed: true,
            compared: 0,
        })
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.values().all(|v| v.passed)
    }
}

impl Default for PerfVerdicts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementKey;

    fn table(entries: &[(Author, Strategy, f64)]) -> BestOfN {
        entries
            .iter()
            .map(|(a, s, v)| (MeasurementKey::new(*a, *s), *v))
            .collect()
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(
            compare_pair(Some(12.0), Some(10.0), 1.2),
            Outcome::Compared {
                ratio: 1.2,
                passed: false
            }
        );

        match compare_pair(Some(11.9), Some(10.0), 1.2) {
            Outcome::Compared { ratio, passed } => {
                assert!((ratio - 1.19).abs() < 1e-9);
                assert!(passed);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_missing_side_is_skipped() {
        assert_eq!(compare_pair(Some(1.0), None, 1.2), Outcome::Missing);
        assert_eq!(compare_pair(None, Some(1.0), 1.2), Outcome::Missing);
        assert_eq!(compare_pair(None, None, 1.2), Outcome::Missing);
        assert_eq!(compare_pair(Some(1.0), Some(0.0), 1.2), Outcome::ZeroReference);
    }

    #[test]
    fn test_compare_workload_rows() {
        let t = table(&[
            (Author::Student, Strategy::Serial, 12.0),
            (Author::Reference, Strategy::Serial, 9.0),
            (Author::Student, Strategy::ParallelThreadPoolSpin, 8.0),
            (Author::Reference, Strategy::ParallelThreadPoolSpin, 10.0),
            (Author::Reference, Strategy::ParallelAlwaysSpawn, 3.0),
        ]);
        let cmp = compare_workload("w1", &t, 1.2);

        assert_eq!(cmp.rows.len(), 4);
        assert!(cmp.row(Strategy::Serial).unwrap().outcome.is_failure());
        assert_eq!(
            cmp.row(Strategy::ParallelThreadPoolSpin).unwrap().outcome,
            Outcome::Compared {
                ratio: 0.8,
                passed: true
            }
        );
        let spawn = cmp.row(Strategy::ParallelAlwaysSpawn).unwrap();
        assert_eq!(spawn.outcome, Outcome::Missing);
        assert_eq!(spawn.reference_ms, Some(3.0));
        assert_eq!(spawn.student_ms, None);
    }

    #[test]
    fn test_verdicts_are_monotonic() {
        let failing = table(&[
            (Author::Student, Strategy::Serial, 20.0),
            (Author::Reference, Strategy::Serial, 10.0),
        ]);
        let passing = table(&[
            (Author::Student, Strategy::Serial, 5.0),
            (Author::Reference, Strategy::Serial, 10.0),
        ]);

        let verdicts = PerfVerdicts::new()
            .record(&compare_workload("a", &passing, 1.2))
            .record(&compare_workload("b", &failing, 1.2))
            .record(&compare_workload("c", &passing, 1.2));

        let serial = verdicts.get(Strategy::Serial);
        assert!(!serial.passed);
        assert_eq!(serial.compared, 3);
        assert_eq!(serial.feedback(), "Perf did not pass all tests");

        let sleep = verdicts.get(Strategy::ParallelThreadPoolSleep);
        assert!(sleep.passed);
        assert_eq!(sleep.compared, 0);
        assert_eq!(sleep.feedback(), "All passed Perf");
        assert!(!verdicts.all_passed());
    }

    #[test]
    fn test_missing_does_not_change_verdict() {
        let student_only = table(&[(Author::Student, Strategy::Serial, 100.0)]);
        let verdicts = PerfVerdicts::new().record(&compare_workload("w", &student_only, 1.2));
        assert_eq!(
            verdicts.get(Strategy::Serial),
            StrategyVerdict {
                passed: true,
                compared: 0
            }
        );
    }
}
