//! Live logger adapters backed by `tracing`.

use crate::ports::logger::{render_fields, Field, Level, Logger};

/// Forwards messages to the global `tracing` subscriber.
///
/// Fields are rendered into a single `fields` value as `key=value` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        let fields = render_fields(fields);
        match level {
            Level::Debug => tracing::debug!(fields = %fields, "{message}"),
            Level::Info => tracing::info!(fields = %fields, "{message}"),
            Level::Warn => tracing::warn!(fields = %fields, "{message}"),
            Level::Error => tracing::error!(fields = %fields, "{message}"),
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str, _fields: &[Field<'_>]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_logger_accepts_every_level() {
        let logger = TracingLogger;
        let value = 1;
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            logger.log(level, "message", &[Field::new("value", &value)]);
        }
    }

    #[test]
    fn null_logger_is_usable_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(NullLogger);
        logger.debug("ignored", &[]);
    }
}
