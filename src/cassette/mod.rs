//! Cassette format for recording and replaying command runs.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Outcome, RecordedError, RecordedRun};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
