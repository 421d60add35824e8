use std::path::PathBuf;
use std::process::Command;

use crate::errors::{GateError, Result};

/// Producer of the raw changed-path listing.
///
/// The gate only needs whitespace-separated text; how it is produced is up
/// to the implementation.
pub trait ChangeSource {
    fn changed_paths(&self) -> Result<String>;
}

/// Runs a shell command and returns its standard output.
#[derive(Debug, Clone)]
pub struct ShellChangeSource {
    shell: String,
    command: String,
    working_dir: Option<PathBuf>,
}

impl ShellChangeSource {
    pub fn new(shell: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command: command.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl ChangeSource for ShellChangeSource {
    fn changed_paths(&self) -> Result<String> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(&self.command);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        log::debug!("Running diff command: {} -c {}", self.shell, self.command);
        let output = cmd.output().map_err(|source| GateError::DiffCommand {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            log::warn!(
                "Diff command `{}` exited with {}; using its output anyway",
                self.command,
                output.status
            );
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::debug!("Diff command stderr: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Fixed listing, for callers that already have the paths.
impl ChangeSource for str {
    fn changed_paths(&self) -> Result<String> {
        Ok(self.to_string())
    }
}
