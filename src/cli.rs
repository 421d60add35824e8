use clap::Parser;
use std::path::PathBuf;

use crate::config::GateConfig;
use crate::formatting::{ColorMode, FormattingConfig};

pub const USAGE_HINT: &str =
    "Include JSON file generated by \"xcrun xccov view --report --json <tests.xcresult>\"";

#[derive(Parser, Debug)]
#[command(name = "coverage-gate")]
#[command(about = "Fail when a changed source file is not covered well enough", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Coverage report JSON, relative to the current directory
    pub report: String,

    /// Command printing the changed source paths
    #[arg(long = "diff-command", env = "COVERAGE_GATE_DIFF_COMMAND")]
    pub diff_command: Option<String>,

    /// Shell used to run the diff command
    #[arg(long)]
    pub shell: Option<String>,

    /// When to color the output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Plain output: no colors, ASCII markers
    #[arg(long)]
    pub plain: bool,

    /// Configuration file (defaults to .coverage-gate.toml lookup)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Fold command line overrides into the file configuration.
    pub fn apply_overrides(&self, mut config: GateConfig) -> GateConfig {
        if let Some(command) = &self.diff_command {
            config.diff_command = command.clone();
        }
        if let Some(shell) = &self.shell {
            config.shell = shell.clone();
        }
        config
    }

    pub fn formatting_config(&self) -> FormattingConfig {
        let base = if self.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };

        match self.color {
            Some(color) => base.with_color(color),
            None => base,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Usage text printed when the argument count is wrong.
pub fn usage_message() -> String {
    format!("{}\nUsage: coverage-gate file.JSON", USAGE_HINT)
}
