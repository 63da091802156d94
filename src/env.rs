//! Build environment handed to spawned commands.
//!
//! The executor snapshots the process environment once and threads the
//! snapshot through the lifecycle. Recipes extend search paths by prepending;
//! existing entries are always kept after the new ones.

use std::collections::BTreeMap;

/// Separator for path-list variables.
pub const PATH_SEPARATOR: &str = ":";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .map(|(k, v)| {
                    (
                        k.to_string_lossy().into_owned(),
                        v.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Set a variable that does not carry a search path.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        tracing::debug!(%name, %value, "setting environment variable");
        self.vars.insert(name, value);
    }

    /// Prepend entries to a path-list variable, keeping every existing entry.
    ///
    /// `prepend_path("PATH", ["/a", "/b"])` on `PATH=/usr/bin` yields
    /// `PATH=/a:/b:/usr/bin`. An unset or empty variable ends up holding only
    /// the new entries.
    pub fn prepend_path<I, S>(&mut self, name: &str, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts: Vec<String> = entries.into_iter().map(Into::into).collect();
        if let Some(existing) = self.vars.get(name).filter(|v| !v.is_empty()) {
            parts.push(existing.clone());
        }
        let value = parts.join(PATH_SEPARATOR);
        tracing::debug!(%name, %value, "prepending to path variable");
        self.vars.insert(name.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_keeps_existing() {
        let mut env: Environment = [("PATH", "/usr/bin")].into_iter().collect();
        env.prepend_path("PATH", ["/opt/arb/bin"]);
        assert_eq!(env.get("PATH"), Some("/opt/arb/bin:/usr/bin"));
    }

    #[test]
    fn test_prepend_multiple_in_order() {
        let mut env: Environment = [("LD_LIBRARY_PATH", "/usr/lib:/lib")].into_iter().collect();
        env.prepend_path("LD_LIBRARY_PATH", ["/a/lib", "/a/LIBLINK"]);
        assert_eq!(
            env.get("LD_LIBRARY_PATH"),
            Some("/a/lib:/a/LIBLINK:/usr/lib:/lib")
        );
    }

    #[test]
    fn test_prepend_unset_variable() {
        let mut env = Environment::new();
        env.prepend_path("LD_LIBRARY_PATH", ["/a/lib"]);
        assert_eq!(env.get("LD_LIBRARY_PATH"), Some("/a/lib"));
    }

    #[test]
    fn test_prepend_empty_variable_has_no_trailing_separator() {
        let mut env: Environment = [("PATH", "")].into_iter().collect();
        env.prepend_path("PATH", ["/a/bin"]);
        assert_eq!(env.get("PATH"), Some("/a/bin"));
    }

    #[test]
    fn test_prepend_never_shortens() {
        let mut env: Environment = [("PATH", "/usr/bin:/bin")].into_iter().collect();
        let before = env.get("PATH").unwrap().to_string();
        env.prepend_path("PATH", ["/x"]);
        assert!(env.get("PATH").unwrap().ends_with(&before));
    }

    #[test]
    fn test_set_and_iter() {
        let mut env = Environment::new();
        env.set("ARBHOME", "/opt/arb");
        let vars: Vec<_> = env.iter().collect();
        assert_eq!(vars, vec![("ARBHOME", "/opt/arb")]);
    }

    #[test]
    fn test_from_process_sees_path() {
        let env = Environment::from_process();
        assert_eq!(env.get("PATH").map(str::to_string), std::env::var("PATH").ok());
    }
}
