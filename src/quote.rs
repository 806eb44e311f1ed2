//! POSIX shell quoting for values interpolated into command strings.

use std::borrow::Cow;

/// Quotes `value` so a POSIX shell reads it back as a single literal word.
///
/// Values made only of safe characters are returned unchanged.
#[must_use]
pub fn quote(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed("''");
    }

    if value.chars().all(is_safe) {
        return Cow::Borrowed(value);
    }

    Cow::Owned(format!("'{}'", value.replace('\'', "'\"'\"'")))
}

/// Quotes every value and joins them with spaces.
#[must_use]
pub fn join<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| quote(value.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | ':' | '@' | '=' | '+' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_values_pass_through() {
        assert_eq!(quote("hello"), "hello");
        assert_eq!(quote("/usr/bin/env"), "/usr/bin/env");
        assert_eq!(quote("KEY=value"), "KEY=value");
        assert!(matches!(quote("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_value_is_quoted() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn metacharacters_are_wrapped() {
        assert_eq!(quote("a b"), "'a b'");
        assert_eq!(quote("$(rm -rf /)"), "'$(rm -rf /)'");
        assert_eq!(quote("x; y"), "'x; y'");
    }

    #[test]
    fn single_quotes_are_escaped() {
        assert_eq!(quote("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn join_quotes_each_value() {
        assert_eq!(join(["echo", "a b", ""]), "echo 'a b' ''");
    }

    #[cfg(unix)]
    #[test]
    fn quoted_values_survive_the_shell() {
        use std::sync::Arc;

        use crate::adapters::memory::MemoryLogger;
        use crate::runner::CommandRunner;

        let runner = CommandRunner::new(Arc::new(MemoryLogger::new()));
        let hostile = "it's $HOME; `echo pwned`";

        let output = crate::run_cmd!(runner, None, "printf '%s' {}", quote(hostile)).unwrap();

        assert_eq!(output, hostile);
    }
}
