//! Error types returned by command runs.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for command runs.
pub type RunResult<T> = std::result::Result<T, RunError>;

/// Failure of a single command run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured shell does not exist or cannot be executed.
    #[error("Shell not found: {} - {reason}", .shell.display())]
    ShellNotFound {
        /// Shell path as configured.
        shell: PathBuf,
        /// Why resolution or spawning failed.
        reason: String,
    },

    /// The requested working directory is missing or not a directory.
    #[error("Invalid working directory: {} - {reason}", .path.display())]
    InvalidWorkingDir {
        /// Requested working directory.
        path: PathBuf,
        /// Why the directory was rejected.
        reason: String,
    },

    /// The command ran but exited unsuccessfully.
    #[error("Command failed ({}): {command}\n{output}", ExitCodeDisplay(.exit_code))]
    CommandFailed {
        /// Command string passed to the shell.
        command: String,
        /// Exit code, `None` if the process was terminated by a signal.
        exit_code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },

    /// Talking to the spawned process failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What the runner was doing.
        context: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A cassette could not be read, written or replayed.
    #[error("Cassette error: {reason}")]
    Cassette {
        /// What went wrong.
        reason: String,
    },
}

/// Coarse classification of a [`RunError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`RunError::ShellNotFound`].
    ShellNotFound,
    /// See [`RunError::InvalidWorkingDir`].
    InvalidWorkingDir,
    /// See [`RunError::CommandFailed`].
    CommandFailed,
    /// See [`RunError::Io`].
    Io,
    /// See [`RunError::Cassette`].
    Cassette,
}

impl RunError {
    /// Creates a `ShellNotFound` error.
    pub fn shell_not_found(shell: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ShellNotFound { shell: shell.into(), reason: reason.into() }
    }

    /// Creates an `InvalidWorkingDir` error.
    pub fn invalid_working_dir(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidWorkingDir { path: path.into(), reason: reason.into() }
    }

    /// Creates a `CommandFailed` error.
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        output: impl Into<String>,
    ) -> Self {
        Self::CommandFailed { command: command.into(), exit_code, output: output.into() }
    }

    /// Creates an `Io` error.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Creates a `Cassette` error.
    pub fn cassette(reason: impl Into<String>) -> Self {
        Self::Cassette { reason: reason.into() }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShellNotFound { .. } => ErrorKind::ShellNotFound,
            Self::InvalidWorkingDir { .. } => ErrorKind::InvalidWorkingDir,
            Self::CommandFailed { .. } => ErrorKind::CommandFailed,
            Self::Io { .. } => ErrorKind::Io,
            Self::Cassette { .. } => ErrorKind::Cassette,
        }
    }

    /// Exit code carried by a `CommandFailed` error.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

struct ExitCodeDisplay<'a>(&'a Option<i32>);

impl fmt::Display for ExitCodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}
