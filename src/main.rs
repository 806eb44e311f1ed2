//! Binary entrypoint for the `cmdrunner` CLI.

use std::process::ExitCode;

use cmdrunner::{logging, RunnerConfig};

fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    logging::init(&RunnerConfig::from_env().log_filter);

    match cmdrunner::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
