//! Recording adapter for the `CommandExecutor` port.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::format::{Outcome, RecordedError};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::RunResult;
use crate::options::RunOptions;
use crate::ports::CommandExecutor;

/// Records every run while delegating to an inner executor.
pub struct RecordingExecutor {
    inner: Box<dyn CommandExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingExecutor {
    /// Creates a new recording executor wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommandExecutor for RecordingExecutor {
    fn run_command(&self, options: Option<&RunOptions>, command: &str) -> RunResult<String> {
        let result = self.inner.run_command(options, command);
        let outcome = match &result {
            Ok(output) => Outcome::Ok { output: output.clone() },
            Err(err) => Outcome::Err(RecordedError::from(err)),
        };
        self.recorder.lock().unwrap_or_else(PoisonError::into_inner).record(
            command,
            options,
            outcome,
        );
        result
    }
}
