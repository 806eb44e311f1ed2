//! In-memory logger that keeps every record, for assertions in tests.

use std::sync::{Mutex, PoisonError};

use crate::ports::logger::{Field, Level, Logger};

/// One captured log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
    /// Rendered fields, in the order given.
    pub fields: Vec<(String, String)>,
}

impl LogRecord {
    /// Value of the first field named `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Logger that stores records instead of emitting them.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        let record = LogRecord {
            level,
            message: message.to_string(),
            fields: fields.iter().map(|f| (f.key.to_string(), f.value.to_string())).collect(),
        };
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_records_in_order() {
        let logger = MemoryLogger::new();
        let code = 2;
        logger.log(Level::Info, "first", &[]);
        logger.log(Level::Error, "second", &[Field::new("code", &code)]);

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].level, Level::Error);
        assert_eq!(records[1].field("code"), Some("2"));
        assert_eq!(records[1].field("missing"), None);
    }
}
