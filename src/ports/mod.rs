//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the runner and something
//! outside it (process execution, log sinks). Implementations live in
//! `src/adapters/`.

pub mod executor;
pub mod logger;

pub use executor::CommandExecutor;
pub use logger::{Field, Level, Logger};
