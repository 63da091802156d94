//! Utility functions for the executor.

/// Shell-quote a value for safe interpolation.
pub fn shell_quote(s: impl std::fmt::Display) -> String {
    let s = s.to_string();
    if !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == '/')
    {
        s
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}

/// Join a command and its (already quoted or free-form) option strings,
/// dropping empty parts.
pub fn join_command<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("simple"), "simple");
        assert_eq!(shell_quote("/path/to/file"), "/path/to/file");
        assert_eq!(shell_quote("has space"), "'has space'");
        assert_eq!(shell_quote("has'quote"), "'has'\"'\"'quote'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_join_command() {
        assert_eq!(join_command(["make", "-j4", ""]), "make -j4");
        assert_eq!(join_command(["make", " all V=1 "]), "make all V=1");
        assert_eq!(join_command(["./install.sh"]), "./install.sh");
    }
}
