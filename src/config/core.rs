use serde::{Deserialize, Serialize};

use crate::changes::ChangeParseOptions;

pub const DEFAULT_DIFF_COMMAND: &str = "bash ./scripts/filterSourceChanges.sh";
pub const DEFAULT_SHELL: &str = "sh";
pub const DEFAULT_TARGET_SUFFIX: &str = ".framework";
pub const DEFAULT_SOURCE_EXTENSION: &str = "swift";
pub const DEFAULT_MIN_PATH_SEGMENTS: usize = 4;

/// What to do with a changed path that has too few segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortPathPolicy {
    /// Stop parsing; the short entry and everything after it are dropped
    #[default]
    Halt,
    /// Drop only the short entry and keep going
    Skip,
}

/// Settings read from `.coverage-gate.toml`.
///
/// Every key is optional; missing keys take the defaults above. The
/// coverage threshold is not part of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Command that prints the changed source paths
    pub diff_command: String,
    /// Shell used to run `diff_command` as `<shell> -c <command>`
    pub shell: String,
    /// Appended to the first path segment to form the report target name
    pub target_suffix: String,
    /// Token a changed file name must contain
    pub source_extension: String,
    pub min_path_segments: usize,
    pub short_path_policy: ShortPathPolicy,
    /// Fail the gate when a changed file has no entry in the report
    pub fail_on_unmatched: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            diff_command: DEFAULT_DIFF_COMMAND.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            target_suffix: DEFAULT_TARGET_SUFFIX.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            min_path_segments: DEFAULT_MIN_PATH_SEGMENTS,
            short_path_policy: ShortPathPolicy::Halt,
            fail_on_unmatched: false,
        }
    }
}

impl GateConfig {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.diff_command.trim().is_empty() {
            return Err("diff_command must not be empty".to_string());
        }
        if self.shell.trim().is_empty() {
            return Err("shell must not be empty".to_string());
        }
        if self.source_extension.is_empty() {
            return Err("source_extension must not be empty".to_string());
        }
        if self.min_path_segments == 0 {
            return Err("min_path_segments must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn change_options(&self) -> ChangeParseOptions {
        ChangeParseOptions {
            target_suffix: self.target_suffix.clone(),
            source_extension: self.source_extension.clone(),
            min_path_segments: self.min_path_segments,
            short_path_policy: self.short_path_policy,
        }
    }
}
