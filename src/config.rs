//! Runner configuration read from the environment.
//!
//! | Variable           | Meaning                                   |
//! |--------------------|-------------------------------------------|
//! | `CMDRUNNER_SHELL`  | Shell to use instead of the default       |
//! | `CMDRUNNER_LOG`    | `tracing` filter directive (default `warn`) |
//! | `CMDRUNNER_RECORD` | Cassette file to record runs into         |

use std::path::PathBuf;

/// Environment variable overriding the shell.
pub const SHELL_VAR: &str = "CMDRUNNER_SHELL";
/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "CMDRUNNER_LOG";
/// Environment variable naming a cassette to record into.
pub const RECORD_VAR: &str = "CMDRUNNER_RECORD";

/// Filter used when `CMDRUNNER_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings shared by the binary and library callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Shell override, `None` for the platform default.
    pub shell: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Cassette path; runs are recorded when set.
    pub record: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { shell: None, log_filter: DEFAULT_LOG_FILTER.to_string(), record: None }
    }
}

impl RunnerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            shell: get(SHELL_VAR).map(PathBuf::from),
            log_filter: get(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            record: get(RECORD_VAR).map(PathBuf::from),
        }
    }
}
