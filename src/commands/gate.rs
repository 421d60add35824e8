use std::io::Write;
use std::path::PathBuf;

use crate::changes::{parse_changed_files, ChangeSource};
use crate::config::GateConfig;
use crate::errors::Result;
use crate::evaluate::{evaluate, unmatched};
use crate::formatting::Colorizer;
use crate::render::{render_no_changes, render_results, GateOutcome};
use crate::report::load_report;

pub struct GateOptions {
    /// Report path as given on the command line
    pub report: String,
    /// Directory the report path is resolved against
    pub base_dir: PathBuf,
    pub config: GateConfig,
}

/// Run the gate end to end.
///
/// The changed files are resolved first; when there are none the report is
/// never read. Every error is returned to the caller, which owns the process
/// exit.
pub fn run_gate<S, W>(
    options: &GateOptions,
    source: &S,
    colorizer: &dyn Colorizer,
    out: &mut W,
) -> Result<GateOutcome>
where
    S: ChangeSource + ?Sized,
    W: Write,
{
    let raw = source.changed_paths()?;
    let changed_files = parse_changed_files(&raw, &options.config.change_options())?;
    log::info!("Found {} changed source files", changed_files.len());

    if changed_files.is_empty() {
        return Ok(render_no_changes(out, colorizer)?);
    }

    let report = load_report(&options.base_dir, &options.report)?;
    for warning in report.consistency_warnings() {
        log::warn!("Inconsistent coverage counts: {}", warning);
    }

    let results = evaluate(&report, &changed_files);
    let missing = unmatched(&report, &changed_files);
    for changed in &missing {
        log::warn!("No coverage data for [{}] {}", changed.target, changed.name);
    }

    Ok(render_results(
        out,
        &results,
        &missing,
        colorizer,
        options.config.fail_on_unmatched,
    )?)
}
