//! Record-replay round-trip integration test.
//!
//! Records a session of real runs, replays the cassette, and checks that
//! outputs and errors come back identically on every replay.

use std::sync::Arc;

use cmdrunner::adapters::MemoryLogger;
use cmdrunner::context::RunnerContext;
use cmdrunner::{ErrorKind, RunOptions, RunResult, RunnerConfig};

/// Runs a fixed script of commands, returning every result.
fn exercise(ctx: &RunnerContext) -> Vec<RunResult<String>> {
    let options = RunOptions::new().env("WHO", "tape").stdin("line one\nline two\n");
    vec![
        ctx.executor.run_command(None, "echo \"hello 1\""),
        ctx.executor.run_command(Some(&options), "echo $WHO && cat"),
        ctx.executor.run_command(None, "echo nope >&2; exit 7"),
    ]
}

#[cfg(unix)]
#[test]
fn record_then_replay_produces_identical_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("roundtrip.cassette.yaml");

    let ctx = RunnerContext::recording(
        Arc::new(MemoryLogger::new()),
        &RunnerConfig::default(),
        &cassette_path,
    )
    .unwrap();
    let recorded = exercise(&ctx);
    assert_eq!(ctx.finish().unwrap(), Some(cassette_path.clone()));

    assert_eq!(recorded[0].as_deref().unwrap(), "hello 1");
    assert_eq!(recorded[1].as_deref().unwrap(), "tape\nline one\nline two");
    let failure = recorded[2].as_ref().unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::CommandFailed);
    assert_eq!(failure.exit_code(), Some(7));

    for _ in 0..2 {
        let replay = RunnerContext::replaying(&cassette_path).unwrap();
        let replayed = exercise(&replay);

        for (live, again) in recorded.iter().zip(&replayed) {
            match (live, again) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
                _ => panic!("replay diverged: {live:?} vs {again:?}"),
            }
        }
    }
}

#[cfg(unix)]
#[test]
fn replay_rejects_commands_not_on_tape() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("short.cassette.yaml");

    let ctx = RunnerContext::recording(
        Arc::new(MemoryLogger::new()),
        &RunnerConfig::default(),
        &cassette_path,
    )
    .unwrap();
    ctx.executor.run_command(None, "echo only").unwrap();
    ctx.finish().unwrap();

    let replay = RunnerContext::replaying(&cassette_path).unwrap();
    let err = replay.executor.run_command(None, "echo other").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cassette);
    assert_eq!(replay.executor.run_command(None, "echo only").unwrap(), "only");
    let exhausted = replay.executor.run_command(None, "echo only").unwrap_err();
    assert_eq!(exhausted.kind(), ErrorKind::Cassette);
}
