//! Joins changed files with the coverage report and applies the threshold.
//!
//! Everything here is pure: the same report and changed files always give
//! the same results.

use crate::changes::ChangedFile;
use crate::report::CoverageReport;

/// Minimum coverage percentage a changed file has to exceed.
pub const COVERAGE_THRESHOLD: f64 = 80.0;

/// Coverage of one changed file that was found in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedFileCoverage {
    pub target: String,
    pub name: String,
    /// Percentage in 0..=100 with two decimals
    pub coverage_percent: f64,
    pub passing: bool,
}

/// Round to two decimal places.
///
/// Formats with exactly two fraction digits and parses the text back, so the
/// result is what a reader of the printed value would see. Ties resolve on
/// the exact binary value of the input.
pub fn round_to_two_decimals(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(0.0)
}

/// Convert a 0.0–1.0 coverage ratio into a rounded percentage.
pub fn coverage_percent(ratio: f64) -> f64 {
    round_to_two_decimals(ratio * 100.0)
}

/// Strictly above the threshold passes; exactly 80.00 fails.
pub fn is_passing(coverage_percent: f64) -> bool {
    coverage_percent > COVERAGE_THRESHOLD
}

fn matches(target_name: &str, file_name: &str, changed: &ChangedFile) -> bool {
    target_name == changed.target && file_name == changed.name
}

/// Coverage for every changed file present in the report.
///
/// Results follow report target order, then changed-file order, then report
/// file order. Changed files without a report entry produce nothing; see
/// [`unmatched`].
pub fn evaluate(
    report: &CoverageReport,
    changed_files: &[ChangedFile],
) -> Vec<ChangedFileCoverage> {
    let mut results = Vec::new();

    for target in &report.targets {
        for changed in changed_files {
            if target.name != changed.target {
                continue;
            }
            for file in target.files.iter().filter(|f| f.name == changed.name) {
                let percent = coverage_percent(file.line_coverage);
                results.push(ChangedFileCoverage {
                    target: changed.target.clone(),
                    name: file.name.clone(),
                    coverage_percent: percent,
                    passing: is_passing(percent),
                });
            }
        }
    }

    results
}

/// Changed files that have no entry in the report.
pub fn unmatched<'a>(
    report: &CoverageReport,
    changed_files: &'a [ChangedFile],
) -> Vec<&'a ChangedFile> {
    changed_files
        .iter()
        .filter(|changed| {
            !report.targets.iter().any(|target| {
                target
                    .files
                    .iter()
                    .any(|file| matches(&target.name, &file.name, changed))
            })
        })
        .collect()
}
