//! Runner context bundling the executor with its optional recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::recording::RecordingExecutor;
use crate::adapters::replaying::ReplayingExecutor;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::RunnerConfig;
use crate::error::{RunError, RunResult};
use crate::ports::executor::CommandExecutor;
use crate::ports::logger::Logger;
use crate::runner::CommandRunner;

/// Name given to cassettes started by a recording context.
pub const SESSION_NAME: &str = "cmdrunner-session";

/// Wires an executor for live, recording or replaying use.
pub struct RunnerContext {
    /// Executor that runs (or replays) commands.
    pub executor: Box<dyn CommandExecutor>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl RunnerContext {
    /// Creates a live context that spawns real processes.
    #[must_use]
    pub fn live(logger: Arc<dyn Logger>, config: &RunnerConfig) -> Self {
        Self { executor: Box::new(CommandRunner::from_config(logger, config)), recorder: None }
    }

    /// Creates a live context that also records every run to `path`.
    ///
    /// Runs are appended to an existing cassette. Call [`Self::finish`] to
    /// write the file.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing cassette at `path` cannot be parsed.
    pub fn recording(
        logger: Arc<dyn Logger>,
        config: &RunnerConfig,
        path: &Path,
    ) -> RunResult<Self> {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::open(path, SESSION_NAME)?));
        let runner = CommandRunner::from_config(logger, config);
        Ok(Self {
            executor: Box::new(RecordingExecutor::new(Box::new(runner), Arc::clone(&recorder))),
            recorder: Some(recorder),
        })
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn replaying(path: &Path) -> RunResult<Self> {
        let replayer = CassetteReplayer::load(path)?;
        Ok(Self { executor: Box::new(ReplayingExecutor::new(replayer)), recorder: None })
    }

    /// Whether runs are being recorded.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Writes the cassette if recording. Returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> RunResult<Option<PathBuf>> {
        let Self { executor, recorder } = self;
        // Drop the executor first to release its recorder reference
        drop(executor);

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| RunError::cassette("Recording executor still has references"))?
            .into_inner()
            .map_err(|e| RunError::cassette(format!("Recorder lock poisoned: {e}")))?;
        let path = recorder
            .finish()
            .map_err(|e| RunError::cassette(format!("Failed to write cassette: {e}")))?;
        Ok(Some(path))
    }
}
