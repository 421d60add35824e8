//! Coverage quality gate for changed source files.
//!
//! Reads an `xccov` JSON coverage report, matches it against the files
//! changed in the current revision and fails when any of them is covered at
//! or below [`evaluate::COVERAGE_THRESHOLD`] percent.

pub mod changes;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod evaluate;
pub mod formatting;
pub mod render;
pub mod report;

pub use crate::changes::{parse_changed_files, ChangeParseOptions, ChangeSource, ChangedFile};
pub use crate::commands::gate::{run_gate, GateOptions};
pub use crate::config::GateConfig;
pub use crate::errors::{ChangedFileError, GateError};
pub use crate::evaluate::{
    coverage_percent, evaluate, is_passing, round_to_two_decimals, unmatched, ChangedFileCoverage,
    COVERAGE_THRESHOLD,
};
pub use crate::render::GateOutcome;
pub use crate::report::{parse_report, CoverageReport, FileCoverage, FunctionCoverage, Target};
