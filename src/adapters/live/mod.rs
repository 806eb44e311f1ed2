//! Live adapters for real external interactions.
//!
//! The live command executor is [`crate::runner::CommandRunner`] itself.

pub mod logger;

pub use logger::{NullLogger, TracingLogger};
