//! Command dispatch and handlers.

pub mod quote;
pub mod run;

use std::sync::Arc;

use crate::adapters::live::TracingLogger;
use crate::cli::Command;
use crate::config::RunnerConfig;

/// Dispatch a parsed command to its handler.
///
/// When `CMDRUNNER_RECORD` is set to a file path, runs are appended to the
/// cassette at that path.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = RunnerConfig::from_env();
    match command {
        Command::Run(args) => run::run(args, &config, Arc::new(TracingLogger)),
        Command::Quote { values } => {
            println!("{}", quote::render(values));
            Ok(())
        }
    }
}
