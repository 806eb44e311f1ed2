//! Replays recorded runs from a cassette.

use std::collections::VecDeque;
use std::path::Path;

use super::format::{Cassette, RecordedRun};
use super::recorder::read_cassette;
use crate::error::{RunError, RunResult};
use crate::options::RunOptions;

/// Serves recorded runs back in the order they were recorded.
#[derive(Debug)]
pub struct CassetteReplayer {
    runs: VecDeque<RecordedRun>,
    last_seq: Option<u64>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { runs: cassette.runs.iter().cloned().collect(), last_seq: None }
    }

    /// Load a cassette file and create a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> RunResult<Self> {
        Ok(Self::new(&read_cassette(path)?))
    }

    /// Number of runs not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.runs.len()
    }

    /// Return the next recorded run, which must be for `command` with
    /// `options`.
    ///
    /// `None` and default options are treated as the same request.
    ///
    /// # Errors
    ///
    /// Returns a `Cassette` error when every run has been consumed or when
    /// the next run was recorded for a different command or with different
    /// options. A mismatched run is not consumed.
    pub fn next_run(
        &mut self,
        command: &str,
        options: Option<&RunOptions>,
    ) -> RunResult<RecordedRun> {
        let Some(next) = self.runs.front() else {
            return Err(RunError::cassette(format!(
                "Cassette exhausted: no recorded run left for {command:?}. Last run was seq={}.",
                self.last_seq.map_or_else(|| "none".to_string(), |seq| seq.to_string()),
            )));
        };

        if next.command != command {
            return Err(RunError::cassette(format!(
                "Cassette mismatch at seq={}: expected {:?}, got {command:?}",
                next.seq, next.command,
            )));
        }

        if !same_options(next.options.as_ref(), options) {
            return Err(RunError::cassette(format!(
                "Cassette mismatch at seq={}: options for {command:?} differ from the recording",
                next.seq,
            )));
        }

        let run = self.runs.pop_front().ok_or_else(|| RunError::cassette("Cassette exhausted"))?;
        self.last_seq = Some(run.seq);
        Ok(run)
    }
}

fn same_options(recorded: Option<&RunOptions>, requested: Option<&RunOptions>) -> bool {
    let default = RunOptions::default();
    recorded.unwrap_or(&default) == requested.unwrap_or(&default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Outcome;
    use crate::error::ErrorKind;
    use chrono::Utc;

    fn make_cassette(commands: &[&str]) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            runs: commands
                .iter()
                .zip(0..)
                .map(|(command, seq)| RecordedRun {
                    seq,
                    command: (*command).to_string(),
                    options: None,
                    outcome: Outcome::Ok { output: format!("out-{seq}") },
                })
                .collect(),
        }
    }

    #[test]
    fn replays_runs_in_order() {
        let mut replayer = CassetteReplayer::new(&make_cassette(&["echo a", "echo b", "echo a"]));

        assert_eq!(replayer.next_run("echo a", None).unwrap().seq, 0);
        assert_eq!(replayer.next_run("echo b", None).unwrap().seq, 1);
        let third = replayer.next_run("echo a", None).unwrap();
        assert_eq!(third.outcome, Outcome::Ok { output: "out-2".into() });
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn exhausted_replayer_reports_last_seq() {
        let mut replayer = CassetteReplayer::new(&make_cassette(&["pwd"]));
        replayer.next_run("pwd", None).unwrap();

        let err = replayer.next_run("pwd", None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cassette);
        assert!(err.to_string().contains("Cassette exhausted"));
        assert!(err.to_string().contains("seq=0"));
    }

    #[test]
    fn mismatched_command_is_not_consumed() {
        let mut replayer = CassetteReplayer::new(&make_cassette(&["echo a"]));

        let err = replayer.next_run("echo b", None).unwrap_err();
        assert!(err.to_string().contains("Cassette mismatch at seq=0"));
        assert_eq!(replayer.remaining(), 1);
        assert!(replayer.next_run("echo a", None).is_ok());
    }

    #[test]
    fn mismatched_options_are_not_consumed() {
        let mut cassette = make_cassette(&["echo $X"]);
        cassette.runs[0].options = Some(RunOptions::new().env("X", "1"));
        let mut replayer = CassetteReplayer::new(&cassette);
        let recorded = RunOptions::new().env("X", "1");
        let changed = RunOptions::new().env("X", "2");

        let err = replayer.next_run("echo $X", Some(&changed)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cassette);
        assert!(err.to_string().contains("options for \"echo $X\" differ"));
        assert!(replayer.next_run("echo $X", None).is_err());
        assert_eq!(replayer.remaining(), 1);

        let run = replayer.next_run("echo $X", Some(&recorded)).unwrap();
        assert_eq!(run.seq, 0);
    }

    #[test]
    fn default_options_match_missing_options() {
        let mut replayer = CassetteReplayer::new(&make_cassette(&["pwd"]));
        assert!(replayer.next_run("pwd", Some(&RunOptions::default())).is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CassetteReplayer::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read cassette file"));
    }
}
