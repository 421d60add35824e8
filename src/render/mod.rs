//! Console report and gate outcome.

use std::io::{self, Write};

use crate::changes::ChangedFile;
use crate::evaluate::ChangedFileCoverage;
use crate::formatting::{ColorTag, Colorizer};

pub const REPORT_TITLE: &str = "Code Coverage Report";
pub const NO_CHANGES_MESSAGE: &str =
    "No changes found. Check that new sources have been added to Git.";
pub const FAILURE_MESSAGE: &str = "Fail, please add code coverage in the files indicated above.";

/// Final decision of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Passed,
    Failed,
}

impl GateOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

/// Pure function deciding the outcome from evaluated results
pub fn decide_outcome(
    results: &[ChangedFileCoverage],
    unmatched_count: usize,
    fail_on_unmatched: bool,
) -> GateOutcome {
    let all_passing = results.iter().all(|r| r.passing);
    let missing_blocks = fail_on_unmatched && unmatched_count > 0;

    if all_passing && !missing_blocks {
        GateOutcome::Passed
    } else {
        GateOutcome::Failed
    }
}

pub fn format_result_line(result: &ChangedFileCoverage, colorizer: &dyn Colorizer) -> String {
    let icon = if result.passing {
        colorizer.colorize(&colorizer.glyph("✓", "[OK]"), ColorTag::Pass)
    } else {
        colorizer.colorize(&colorizer.glyph("⨯", "[FAIL]"), ColorTag::Fail)
    };
    let target = colorizer.colorize(&result.target, ColorTag::Label);

    format!(
        "    {} [{}] {} ({:.2}%)",
        icon, target, result.name, result.coverage_percent
    )
}

pub fn format_unmatched_line(
    changed: &ChangedFile,
    colorizer: &dyn Colorizer,
    blocking: bool,
) -> String {
    let tag = if blocking {
        ColorTag::Fail
    } else {
        ColorTag::Warning
    };
    let icon = colorizer.colorize(&colorizer.glyph("?", "[MISSING]"), tag);
    let target = colorizer.colorize(&changed.target, ColorTag::Label);

    format!(
        "    {} [{}] {} (no coverage data)",
        icon, target, changed.name
    )
}

/// Print the message for a revision without changed sources.
pub fn render_no_changes<W: Write>(
    out: &mut W,
    colorizer: &dyn Colorizer,
) -> io::Result<GateOutcome> {
    writeln!(
        out,
        "{}{}",
        colorizer.colorize("Success. ", ColorTag::Pass),
        NO_CHANGES_MESSAGE
    )?;
    Ok(GateOutcome::Passed)
}

/// Print one line per result, warnings for files missing from the report,
/// and the closing verdict.
pub fn render_results<W: Write>(
    out: &mut W,
    results: &[ChangedFileCoverage],
    unmatched: &[&ChangedFile],
    colorizer: &dyn Colorizer,
    fail_on_unmatched: bool,
) -> io::Result<GateOutcome> {
    writeln!(out)?;
    writeln!(out, "{}", colorizer.colorize(REPORT_TITLE, ColorTag::Label))?;
    writeln!(out, "{}", "-".repeat(REPORT_TITLE.len()))?;

    for result in results {
        writeln!(out, "{}", format_result_line(result, colorizer))?;
    }
    for changed in unmatched {
        let line = format_unmatched_line(changed, colorizer, fail_on_unmatched);
        writeln!(out, "{}", line)?;
    }

    let outcome = decide_outcome(results, unmatched.len(), fail_on_unmatched);
    let verdict = match outcome {
        GateOutcome::Passed => colorizer.colorize("Success", ColorTag::Pass),
        GateOutcome::Failed => colorizer.colorize(FAILURE_MESSAGE, ColorTag::Fail),
    };
    writeln!(out, "{}", verdict)?;

    Ok(outcome)
}
