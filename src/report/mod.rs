//! Coverage report decoding.
//!
//! The report is the JSON document printed by
//! `xcrun xccov view --report --json <tests.xcresult>`: a report holds
//! targets, targets hold files, files hold functions. Decoding is strict:
//! every field listed below must be present with the right type, otherwise
//! the whole report is rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GateError, Result};

/// Root of a decoded coverage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub covered_lines: u64,
    pub executable_lines: u64,
    /// Fraction of executable lines covered, 0.0 to 1.0
    pub line_coverage: f64,
    pub targets: Vec<Target>,
}

/// A build product such as `Home.framework`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub build_product_path: String,
    pub covered_lines: u64,
    pub executable_lines: u64,
    pub files: Vec<FileCoverage>,
    pub line_coverage: f64,
    pub name: String,
}

/// Coverage of one source file inside a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverage {
    pub covered_lines: u64,
    pub executable_lines: u64,
    pub functions: Vec<FunctionCoverage>,
    /// Decoded ratio; this is what the gate uses, it is never recomputed
    pub line_coverage: f64,
    /// Bare file name, e.g. `Foo.swift`
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCoverage {
    pub covered_lines: u64,
    pub executable_lines: u64,
    pub execution_count: u64,
    pub line_coverage: f64,
    pub line_number: u64,
    pub name: String,
}

impl FileCoverage {
    pub fn is_consistent(&self) -> bool {
        self.covered_lines <= self.executable_lines
    }
}

impl CoverageReport {
    /// Files whose covered line count exceeds their executable line count.
    ///
    /// Such entries are still evaluated with their decoded ratio.
    pub fn consistency_warnings(&self) -> Vec<String> {
        self.targets
            .iter()
            .flat_map(|target| {
                target
                    .files
                    .iter()
                    .filter(|file| !file.is_consistent())
                    .map(move |file| {
                        format!(
                            "[{}] {} reports {} covered of {} executable lines",
                            target.name, file.name, file.covered_lines, file.executable_lines
                        )
                    })
            })
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.targets.iter().map(|t| t.files.len()).sum()
    }
}

/// Decode a report from its JSON text.
pub fn parse_report(json: &str) -> Result<CoverageReport> {
    serde_json::from_str(json).map_err(GateError::ReportDecode)
}

/// Read and decode the report at `base_dir/argument`.
///
/// # Errors
///
/// `ReportRead` when the file cannot be read as UTF-8 text,
/// `ReportDecode` when its content does not match the schema.
pub fn load_report(base_dir: &Path, argument: &str) -> Result<CoverageReport> {
    let path = base_dir.join(argument);
    let json = std::fs::read_to_string(&path)
        .map_err(|source| GateError::report_read(path.clone(), source))?;

    log::debug!(
        "Read {} bytes of coverage report from {}",
        json.len(),
        path.display()
    );
    let report = parse_report(&json)?;
    log::info!(
        "Decoded coverage report: {} targets, {} files",
        report.targets.len(),
        report.file_count()
    );
    Ok(report)
}
