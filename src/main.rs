use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use coverage_gate::changes::ShellChangeSource;
use coverage_gate::cli::{usage_message, Cli};
use coverage_gate::commands::gate::{run_gate, GateOptions};
use coverage_gate::config;
use coverage_gate::errors::GateError;
use coverage_gate::formatting::colorizer_for;
use coverage_gate::render::GateOutcome;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    init_logging(cli.log_filter());

    match run(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(error) => {
            // Errors go to stdout next to the report, not to stderr
            println!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}

// Wrong argument count exits with 1, help and version keep clap's behavior
fn handle_parse_error(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("{}", error.render());
            println!("{}", GateError::usage(usage_message()));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<GateOutcome> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let file_config = match &cli.config {
        Some(path) => config::load_explicit_config(path)?,
        None => config::load_config(&cwd),
    };
    let gate_config = cli.apply_overrides(file_config);
    gate_config.validate().map_err(anyhow::Error::msg)?;

    let source = ShellChangeSource::new(&gate_config.shell, &gate_config.diff_command)
        .with_working_dir(&cwd);
    let colorizer = colorizer_for(cli.formatting_config());

    let options = GateOptions {
        report: cli.report.clone(),
        base_dir: cwd,
        config: gate_config,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = run_gate(&options, &source, colorizer.as_ref(), &mut out)?;
    Ok(outcome)
}
