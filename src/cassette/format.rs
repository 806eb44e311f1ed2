//! Cassette data structures for recording and replaying command runs.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::options::RunOptions;

/// A single recorded command run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordedRun {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Command string passed to the shell.
    pub command: String,
    /// Options the command ran with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RunOptions>,
    /// What the run returned.
    pub outcome: Outcome,
}

/// Result of a recorded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The command succeeded with this (trimmed) output.
    Ok {
        /// Output returned to the caller.
        output: String,
    },
    /// The run failed.
    Err(RecordedError),
}

/// Serializable mirror of [`RunError`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedError {
    /// See [`RunError::ShellNotFound`].
    ShellNotFound {
        /// Configured shell.
        shell: PathBuf,
        /// Failure description.
        reason: String,
    },
    /// See [`RunError::InvalidWorkingDir`].
    InvalidWorkingDir {
        /// Requested directory.
        path: PathBuf,
        /// Failure description.
        reason: String,
    },
    /// See [`RunError::CommandFailed`].
    CommandFailed {
        /// Command string.
        command: String,
        /// Exit code, if any.
        exit_code: Option<i32>,
        /// Combined output.
        output: String,
    },
    /// See [`RunError::Io`].
    Io {
        /// Rendered error message.
        message: String,
    },
    /// See [`RunError::Cassette`].
    Cassette {
        /// Failure description.
        reason: String,
    },
}

impl From<&RunError> for RecordedError {
    fn from(err: &RunError) -> Self {
        match err {
            RunError::ShellNotFound { shell, reason } => {
                Self::ShellNotFound { shell: shell.clone(), reason: reason.clone() }
            }
            RunError::InvalidWorkingDir { path, reason } => {
                Self::InvalidWorkingDir { path: path.clone(), reason: reason.clone() }
            }
            RunError::CommandFailed { command, exit_code, output } => Self::CommandFailed {
                command: command.clone(),
                exit_code: *exit_code,
                output: output.clone(),
            },
            RunError::Io { .. } => Self::Io { message: err.to_string() },
            RunError::Cassette { reason } => Self::Cassette { reason: reason.clone() },
        }
    }
}

impl From<RecordedError> for RunError {
    fn from(err: RecordedError) -> Self {
        match err {
            RecordedError::ShellNotFound { shell, reason } => Self::shell_not_found(shell, reason),
            RecordedError::InvalidWorkingDir { path, reason } => {
                Self::invalid_working_dir(path, reason)
            }
            RecordedError::CommandFailed { command, exit_code, output } => {
                Self::command_failed(command, exit_code, output)
            }
            RecordedError::Io { message } => {
                Self::io("replaying recorded run", std::io::Error::other(message))
            }
            RecordedError::Cassette { reason } => Self::cassette(reason),
        }
    }
}

/// A cassette containing a sequence of recorded runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was last written.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of runs.
    pub runs: Vec<RecordedRun>,
}
