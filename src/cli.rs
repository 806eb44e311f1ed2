//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `cmdrunner`.
#[derive(Debug, Parser)]
#[command(name = "cmdrunner", version, about = "Run shell commands and capture their output")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a command through the shell and print its output.
    Run(RunArgs),
    /// Print values quoted for safe use inside a shell command.
    Quote {
        /// Values to quote.
        #[arg(required = true)]
        values: Vec<String>,
    },
}

/// Arguments for `cmdrunner run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory to run the command in.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
    /// Extra environment variable, repeatable.
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,
    /// Text to send on stdin; `-` forwards this process's stdin.
    #[arg(long, value_name = "TEXT")]
    pub stdin: Option<String>,
    /// Shell to use instead of the configured default.
    #[arg(long, value_name = "PATH")]
    pub shell: Option<PathBuf>,
    /// Print a JSON report instead of the raw output.
    #[arg(long)]
    pub json: bool,
    /// Command words, joined with spaces before being passed to the shell.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}
