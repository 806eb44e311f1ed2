//! Adapters implementing the port traits.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;

pub use live::{NullLogger, TracingLogger};
pub use memory::MemoryLogger;
pub use recording::RecordingExecutor;
pub use replaying::ReplayingExecutor;
