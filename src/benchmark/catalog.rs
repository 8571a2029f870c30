//! Workload catalog and execution planning

use crate::constants::ASYNC_SUFFIX;
use crate::models::{PlannedWorkload, Workload};

/// Every workload the task-system binaries understand, in run order
pub static CATALOG: &[Workload] = &[
    Workload::new("super_super_light"),
    Workload::new("super_light"),
    Workload::new("ping_pong_equal"),
    Workload::new("ping_pong_unequal"),
    Workload::new("recursive_fibonacci"),
    Workload::new("math_operations_in_tight_for_loop"),
    Workload::new("math_operations_in_tight_for_loop_fewer_tasks"),
    Workload::new("math_operations_in_tight_for_loop_fan_in"),
    Workload::new("math_operations_in_tight_for_loop_reduction_tree"),
    Workload::new("spin_between_run_calls"),
    Workload::new("mandelbrot_chunked"),
];

/// Ordered, immutable set of workloads
#[derive(Debug, Clone, Copy)]
pub struct WorkloadCatalog {
    workloads: &'static [Workload],
}

impl WorkloadCatalog {
    pub fn new(workloads: &'static [Workload]) -> Self {
        Self { workloads }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.workloads.iter().map(|w| w.name)
    }

    pub fn find(&self, name: &str) -> Option<&'static Workload> {
        self.workloads.iter().find(|w| w.name == name)
    }

    /// Resolve the workloads to run.
    ///
    /// `requested` filters by name (`None` selects everything) but the
    /// result always follows catalog order. Pinned workloads ignore
    /// `default_threads`. With `run_async`, each workload is followed by
    /// its `_async` variant using the same thread count.
    pub fn plan(
        &self,
        requested: Option<&[String]>,
        default_threads: usize,
        run_async: bool,
    ) -> Vec<PlannedWorkload> {
        if let Some(names) = requested {
            for name in names.iter().filter(|n| self.find(n).is_none()) {
                tracing::warn!(workload = %name, "Unknown workload requested, skipping");
            }
        }

        let mut plan = Vec::new();

        for workload in self.workloads {
            let selected = requested.is_none_or(|names| names.iter().any(|n| n == workload.name));
            if !selected {
                continue;
            }

            let num_threads = workload.threads.resolve(default_threads);
            plan.push(PlannedWorkload {
                name: workload.name.to_string(),
                num_threads,
            });
            if run_async {
                plan.push(PlannedWorkload {
                    name: format!("{}{}", workload.name, ASYNC_SUFFIX),
                    num_threads,
                });
            }
        }

        plan
    }
}

impl Default for WorkloadCatalog {
    fn default() -> Self {
        Self::new(CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PINNED: &[Workload] = &[
        Workload::new("alpha"),
        Workload::pinned("beta", 2),
        Workload::new("gamma"),
    ];

    #[test]
    fn test_full_catalog_uses_default_threads() {
        let plan = WorkloadCatalog::default().plan(None, 16, false);
        assert_eq!(plan.len(), 11);
        assert_eq!(plan[0].name, "super_super_light");
        assert_eq!(plan[10].name, "mandelbrot_chunked");
        assert!(plan.iter().all(|p| p.num_threads == 16));
    }

    #[test]
    fn test_pinned_workload_ignores_default() {
        let plan = WorkloadCatalog::new(PINNED).plan(None, 8, false);
        let threads: Vec<usize> = plan.iter().map(|p| p.num_threads).collect();
        assert_eq!(threads, vec![8, 2, 8]);
    }

    #[test]
    fn test_requested_subset_keeps_catalog_order() {
        let requested = vec!["gamma".to_string(), "alpha".to_string(), "nope".to_string()];
        let plan = WorkloadCatalog::new(PINNED).plan(Some(&requested), 4, false);
        let names: Vec<&str> = plan.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "gamma"]);
    }

    #[test]
    fn test_async_variants_follow_each_workload() {
        let requested = vec!["beta".to_string(), "gamma".to_string()];
        let plan = WorkloadCatalog::new(PINNED).plan(Some(&requested), 4, true);
        assert_eq!(
            plan,
            vec![
                PlannedWorkload { name: "beta".to_string(), num_threads: 2 },
                PlannedWorkload { name: "beta_async".to_string(), num_threads: 2 },
                PlannedWorkload { name: "gamma".to_string(), num_threads: 4 },
                PlannedWorkload { name: "gamma_async".to_string(), num_threads: 4 },
            ]
        );
    }
}
