//! Run shell commands with a configurable shell, working directory,
//! environment and stdin, and capture their output.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cmdrunner::adapters::TracingLogger;
//! use cmdrunner::{run_cmd, CommandRunner, RunOptions};
//!
//! let runner = CommandRunner::new(Arc::new(TracingLogger));
//! let options = RunOptions::new().env("NAME", "world");
//! let output = run_cmd!(runner, Some(&options), "echo hello $NAME").unwrap();
//! assert_eq!(output, "hello world");
//! ```

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod options;
pub mod ports;
pub mod quote;
pub mod runner;

pub use config::RunnerConfig;
pub use error::{ErrorKind, RunError, RunResult};
pub use options::RunOptions;
pub use ports::{CommandExecutor, Field, Level, Logger};
pub use runner::CommandRunner;

use clap::Parser;

/// Formats a command with `format_args!` syntax and runs it on a
/// [`CommandRunner`].
///
/// `run_cmd!(runner, options, "echo {}", value)` expands to
/// `runner.run(options, format_args!("echo {}", value))`.
#[macro_export]
macro_rules! run_cmd {
    ($runner:expr, $options:expr, $($fmt:tt)+) => {
        $runner.run($options, ::std::format_args!($($fmt)+))
    };
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_executes_quote() {
        let result = run(["cmdrunner", "quote", "a b"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["cmdrunner", "unknown"]);
        assert!(result.is_err());
    }
}
