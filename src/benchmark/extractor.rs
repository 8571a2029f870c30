//! Timing extraction from task-system output
//!
//! The binaries print one line per strategy, e.g. `[Serial]: [12.345] ms`.
//! Everything else on stdout (diagnostics, progress) is ignored.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Author, MeasurementKey, Strategy};

/// Timing line pattern: `[<label>]: [<ms>] ms`
static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(.*)\]:\s+\[(\d+\.\d+)\] ms").expect("Failed to compile timing pattern")
});

/// Raw durations (ms) per key, in the order they were observed
pub type Measurements = BTreeMap<MeasurementKey, Vec<f64>>;

/// Parse one line into a strategy and duration
pub fn parse_line(line: &str) -> Option<(Strategy, f64)> {
    let caps = TIMING_LINE.captures(line)?;
    let strategy = Strategy::from_label(&caps[1])?;
    let duration_ms = caps[2].parse().ok()?;
    Some((strategy, duration_ms))
}

/// Extract every timing line in `output`, tagging each with `author`
pub fn extract(output: &str, author: Author) -> Measurements {
    let mut measurements = Measurements::new();

    for line in output.lines() {
        match parse_line(line) {
            Some((strategy, duration_ms)) => {
                measurements
                    .entry(MeasurementKey::new(author, strategy))
                    .or_default()
                    .push(duration_ms);
            }
            None => {
                if line.starts_with('[') && line.ends_with(" ms") {
                    tracing::debug!(%author, line, "Ignoring unrecognized timing line");
                }
            }
        }
    }

    measurements
}

/// Append every value of `from` onto `into`
pub fn merge(into: &mut Measurements, from: Measurements) {
    for (key, values) in from {
        into.entry(key).or_default().extend(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reference_and_student() {
        let reference = extract("[Serial]: [12.345] ms\n", Author::Reference);
        assert_eq!(
            reference.get(&MeasurementKey::new(Author::Reference, Strategy::Serial)),
            Some(&vec![12.345])
        );
        assert_eq!(reference.len(), 1);

        let student = extract("[Serial]: [12.345] ms", Author::Student);
        let key = MeasurementKey::new(Author::Student, Strategy::Serial);
        assert_eq!(key.to_string(), "STUDENT [Serial]");
        assert_eq!(student.get(&key), Some(&vec![12.345]));
    }

    #[test]
    fn test_extract_all_strategies_among_noise() {
        let output = "\
===================================================================================
Test name: super_light
===================================================================================
[Serial]:                                   [9.132] ms
[Parallel + Always Spawn]:                  [31.540] ms
[Parallel + Thread Pool + Spin]:            [6.001] ms
[Parallel + Thread Pool + Sleep]:           [7.250] ms
===================================================================================
";
        let measurements = extract(output, Author::Student);
        assert_eq!(measurements.len(), 4);
        assert_eq!(
            measurements[&MeasurementKey::new(Author::Student, Strategy::ParallelAlwaysSpawn)],
            vec![31.540]
        );
        assert_eq!(
            measurements[&MeasurementKey::new(Author::Student, Strategy::ParallelThreadPoolSleep)],
            vec![7.250]
        );
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let output = "\
Serial: [12.0] ms
[Serial]: 12.0 ms
[Serial]: [12] ms
[Serial]: [abc] ms
[Serial] [12.0] ms
  [Serial]: [12.0] ms
[Unknown Strategy]: [1.0] ms
";
        assert!(extract(output, Author::Reference).is_empty());
    }

    #[test]
    fn test_duplicate_lines_are_kept() {
        let output = "[Serial]: [5.0] ms\n[Serial]: [4.0] ms\n";
        let measurements = extract(output, Author::Reference);
        assert_eq!(
            measurements[&MeasurementKey::new(Author::Reference, Strategy::Serial)],
            vec![5.0, 4.0]
        );
    }

    #[test]
    fn test_merge_appends() {
        let mut all = extract("[Serial]: [5.0] ms", Author::Student);
        merge(&mut all, extract("[Serial]: [3.0] ms", Author::Student));
        merge(&mut all, extract("[Serial]: [4.0] ms", Author::Reference));

        assert_eq!(
            all[&MeasurementKey::new(Author::Student, Strategy::Serial)],
            vec![5.0, 3.0]
        );
        assert_eq!(
            all[&MeasurementKey::new(Author::Reference, Strategy::Serial)],
            vec![4.0]
        );
    }
}
