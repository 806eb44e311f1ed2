//! `cmdrunner run`: execute one command and print what it produced.

use std::io::Read;
use std::sync::Arc;

use serde::Serialize;

use crate::cli::RunArgs;
use crate::config::RunnerConfig;
use crate::context::RunnerContext;
use crate::error::{RunError, RunResult};
use crate::options::RunOptions;
use crate::ports::logger::Logger;

/// JSON report printed by `run --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RunReport {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Trimmed output on success, combined output on command failure.
    pub output: String,
    /// Exit code of a failed command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Builds a report from a run result.
    #[must_use]
    pub fn from_result(result: &RunResult<String>) -> Self {
        match result {
            Ok(output) => Self { ok: true, output: output.clone(), exit_code: None, error: None },
            Err(err) => Self {
                ok: false,
                output: match err {
                    RunError::CommandFailed { output, .. } => output.clone(),
                    _ => String::new(),
                },
                exit_code: err.exit_code(),
                error: Some(err.to_string()),
            },
        }
    }
}

/// Run the command described by `args` and print its output.
///
/// # Errors
///
/// Returns an error string if the command fails or the recording cannot be
/// written.
pub fn run(args: &RunArgs, config: &RunnerConfig, logger: Arc<dyn Logger>) -> Result<(), String> {
    let (result, recorded) = execute(args, config, logger)?;
    if let Some(path) = recorded {
        eprintln!("Recording saved to: {}", path.display());
    }

    if args.json {
        let report = RunReport::from_result(&result);
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
        return match report.error {
            Some(error) => Err(error),
            None => Ok(()),
        };
    }

    let output = result.map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

/// Run the command, returning its result and the cassette path if recording.
///
/// # Errors
///
/// Returns an error string if the options are invalid or the recording
/// cannot be opened or written. Failures of the command itself are returned
/// inside the result.
pub fn execute(
    args: &RunArgs,
    config: &RunnerConfig,
    logger: Arc<dyn Logger>,
) -> Result<(RunResult<String>, Option<std::path::PathBuf>), String> {
    let mut config = config.clone();
    if let Some(shell) = &args.shell {
        config.shell = Some(shell.clone());
    }

    let options = build_options(args)?;
    let ctx = match &config.record {
        Some(path) => {
            RunnerContext::recording(logger, &config, path).map_err(|e| e.to_string())?
        }
        None => RunnerContext::live(logger, &config),
    };

    let command = args.command.join(" ");
    let result = ctx.executor.run_command(options.as_ref(), &command);
    let recorded = ctx.finish().map_err(|e| e.to_string())?;
    Ok((result, recorded))
}

/// Options for the run, `None` when nothing is overridden.
fn build_options(args: &RunArgs) -> Result<Option<RunOptions>, String> {
    let mut options = RunOptions::new().envs(args.env.iter().cloned());
    if let Some(dir) = &args.cwd {
        options = options.working_dir(dir);
    }
    match args.stdin.as_deref() {
        Some("-") => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            options = options.stdin(content);
        }
        Some(text) => options = options.stdin(text),
        None => {}
    }

    Ok((options != RunOptions::default()).then_some(options))
}
