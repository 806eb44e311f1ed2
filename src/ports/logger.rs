//! Logger port for diagnostic messages.

use std::fmt;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Verbose diagnostics.
    Debug,
    /// Normal operation.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// A failure.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

/// A structured key/value attached to a log message.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Field name.
    pub key: &'a str,
    /// Field value.
    pub value: &'a dyn fmt::Display,
}

impl<'a> Field<'a> {
    /// Creates a field.
    pub fn new(key: &'a str, value: &'a dyn fmt::Display) -> Self {
        Self { key, value }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Receives diagnostic messages.
///
/// Passed explicitly to anything that logs, so tests can capture output and
/// the library never touches a global subscriber.
pub trait Logger: Send + Sync {
    /// Emits a message with structured fields.
    fn log(&self, level: Level, message: &str, fields: &[Field<'_>]);

    /// Emits a debug message.
    fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::Debug, message, fields);
    }
}

/// Renders fields as space separated `key=value` pairs.
#[must_use]
pub fn render_fields(fields: &[Field<'_>]) -> String {
    fields
        .iter()
        .map(|field| format!("{}={}", field.key, field.value))
        .collect::<Vec<_>>()
        .join(" ")
}
