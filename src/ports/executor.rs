//! Command executor port for running shell command strings.

use crate::error::RunResult;
use crate::options::RunOptions;

/// Runs a complete command string through a shell.
///
/// Abstracting execution allows deterministic replay by recording and
/// replaying command outcomes from a cassette.
pub trait CommandExecutor: Send + Sync {
    /// Runs `command` and returns its trimmed combined output.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be started, the working
    /// directory is invalid, or the command exits unsuccessfully.
    fn run_command(&self, options: Option<&RunOptions>, command: &str) -> RunResult<String>;
}
