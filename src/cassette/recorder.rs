//! Records command runs into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, Outcome, RecordedRun};
use crate::error::{RunError, RunResult};
use crate::options::RunOptions;

/// Records runs and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    runs: Vec<RecordedRun>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new, empty recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), runs: Vec::new(), next_seq: 0 }
    }

    /// Create a recorder that appends to the cassette at `path`.
    ///
    /// A missing file starts an empty cassette named `name`; an existing one
    /// keeps its name, runs and sequence numbering.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>, name: impl Into<String>) -> RunResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path, name));
        }

        let cassette = read_cassette(&path)?;
        let next_seq = cassette.runs.last().map_or(0, |run| run.seq + 1);
        Ok(Self { path, name: cassette.name, runs: cassette.runs, next_seq })
    }

    /// Record a run. The `seq` field is assigned automatically.
    pub fn record(&mut self, command: &str, options: Option<&RunOptions>, outcome: Outcome) {
        self.runs.push(RecordedRun {
            seq: self.next_seq,
            command: command.to_string(),
            options: options.cloned(),
            outcome,
        });
        self.next_seq += 1;
    }

    /// Number of runs recorded so far, including any loaded by [`Self::open`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette { name: self.name, recorded_at: Utc::now(), runs: self.runs };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

/// Read and parse a cassette file.
///
/// # Errors
///
/// Returns a `Cassette` error if the file cannot be read or parsed.
pub fn read_cassette(path: &Path) -> RunResult<Cassette> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RunError::cassette(format!("Failed to read cassette file {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        RunError::cassette(format!("Failed to parse cassette file {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::RecordedError;

    #[test]
    fn record_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording");
        recorder.record("echo a", None, Outcome::Ok { output: "a".into() });
        recorder.record(
            "cat",
            Some(&RunOptions::new().stdin("b")),
            Outcome::Ok { output: "b".into() },
        );
        recorder.record(
            "exit 1",
            None,
            Outcome::Err(RecordedError::CommandFailed {
                command: "exit 1".into(),
                exit_code: Some(1),
                output: String::new(),
            }),
        );
        assert_eq!(recorder.len(), 3);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let cassette = read_cassette(&path).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.runs.len(), 3);
        assert_eq!(cassette.runs[0].seq, 0);
        assert_eq!(cassette.runs[2].seq, 2);
        assert_eq!(cassette.runs[1].options.as_ref().unwrap().stdin.as_deref(), Some("b"));
    }

    #[test]
    fn open_continues_existing_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("append.cassette.yaml");

        let mut first = CassetteRecorder::open(&path, "session").unwrap();
        assert!(first.is_empty());
        first.record("echo 1", None, Outcome::Ok { output: "1".into() });
        first.finish().unwrap();

        let mut second = CassetteRecorder::open(&path, "ignored").unwrap();
        assert_eq!(second.len(), 1);
        second.record("echo 2", None, Outcome::Ok { output: "2".into() });
        second.finish().unwrap();

        let cassette = read_cassette(&path).unwrap();
        assert_eq!(cassette.name, "session");
        let seqs: Vec<u64> = cassette.runs.iter().map(|run| run.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn finish_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/runs.cassette.yaml");

        CassetteRecorder::new(&path, "nested").finish().unwrap();

        assert!(path.exists());
    }

    #[test]
    fn unparseable_cassette_is_a_cassette_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.cassette.yaml");
        std::fs::write(&path, "runs: [not, a, run").unwrap();

        let err = CassetteRecorder::open(&path, "x").unwrap_err();

        assert!(err.to_string().contains("Failed to parse cassette file"));
    }
}
