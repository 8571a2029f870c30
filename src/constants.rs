//! Application-wide constants
//!
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// BINARY DEFAULTS
// =============================================================================

/// Name of the student task-system binary
pub const DEFAULT_STUDENT_BINARY: &str = "./runtasks";

/// Stem of the reference binary; a platform suffix is appended
pub const REFERENCE_BINARY_STEM: &str = "./runtasks_ref";

// =============================================================================
// BENCHMARK DEFAULTS
// =============================================================================

/// Number of trials per (workload, author) pair
pub const DEFAULT_NUM_TEST_RUNS: u32 = 5;

/// Student time must be strictly below this multiple of the reference time
pub const DEFAULT_PERF_THRESHOLD: f64 = 1.2;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "taskbench=info";

/// Suffix appended to a workload name for its asynchronous variant
pub const ASYNC_SUFFIX: &str = "_async";

/// Maximum stderr characters kept from a failed trial
pub const STDERR_EXCERPT_CHARS: usize = 500;

// =============================================================================
// REPORT STRINGS
// =============================================================================

pub mod verdicts {
    pub const ALL_PASSED: &str = "All passed Perf";
    pub const NOT_ALL_PASSED: &str = "Perf did not pass all tests";
    pub const OK: &str = "(OK)";
    pub const NOT_OK: &str = "(NOT OK)";
    pub const MISSING: &str = "Missing";
}

/// Separator line used between report sections
pub const REPORT_RULE: &str =
    "================================================================================";
