//! Replaying adapter for the `CommandExecutor` port.

use std::sync::{Mutex, PoisonError};

use crate::cassette::format::Outcome;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{RunError, RunResult};
use crate::options::RunOptions;
use crate::ports::CommandExecutor;

/// Replays recorded command outcomes from a cassette.
///
/// Nothing is spawned; the command string and options must match the
/// recording.
pub struct ReplayingExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingExecutor {
    /// Creates a new replaying executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl CommandExecutor for ReplayingExecutor {
    fn run_command(&self, options: Option<&RunOptions>, command: &str) -> RunResult<String> {
        let run = self
            .replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_run(command, options)?;
        match run.outcome {
            Outcome::Ok { output } => Ok(output),
            Outcome::Err(err) => Err(RunError::from(err)),
        }
    }
}
