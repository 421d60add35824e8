//! Error types for the coverage gate.
//!
//! Detection and termination are kept apart: every stage returns a
//! [`GateError`] and only the binary decides to print it and exit with
//! status 1. Changed-file parsing has its own [`ChangedFileError`] so the
//! parsing logic can be tested without touching the process.

use std::path::PathBuf;
use thiserror::Error;

/// A raw changed-file entry that could not be turned into a `ChangedFile`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangedFileError {
    /// The path has no segments to take a target and file name from
    #[error("Changed file parsing error: {path} is not a valid file")]
    InvalidPath { path: String },

    /// The file name does not carry the expected source extension
    #[error("Changed file parsing error: {path} is not a valid {extension} source file")]
    NotSource { path: String, extension: String },
}

/// Main error type for gate operations
#[derive(Debug, Error)]
pub enum GateError {
    /// The command line did not contain exactly one report path
    #[error("Incorrect parameters. {0}")]
    Usage(String),

    /// The diff collaborator could not be started
    #[error("Failed to run diff command `{command}`")]
    DiffCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A changed-file entry was rejected
    #[error(transparent)]
    ChangedFile(#[from] ChangedFileError),

    /// The report file is missing, unreadable or not UTF-8
    #[error("Error: Invalid JSON at path: {}", .path.display())]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report does not match the expected schema
    #[error("Error: Could not decode the report.")]
    ReportDecode(#[source] serde_json::Error),

    /// Writing the console report failed
    #[error("Failed to write report output")]
    Output(#[from] std::io::Error),
}

impl GateError {
    /// Create a usage error with a message
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a report read error for `path`
    pub fn report_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::ReportRead { path, source }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, GateError>;
