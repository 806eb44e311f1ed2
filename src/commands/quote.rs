//! `cmdrunner quote`: print values shell-quoted.

/// Quote each value and join with spaces.
#[must_use]
pub fn render(values: &[String]) -> String {
    crate::quote::join(values)
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn renders_quoted_values() {
        let values = vec!["ls".to_string(), "my file".to_string()];
        assert_eq!(render(&values), "ls 'my file'");
    }
}
