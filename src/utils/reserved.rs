//! Shortcuts that must never be allocated.
//!
//! These collide with path segments the HTTP layer routes itself.

use std::collections::HashSet;

/// Built-in reserved path segments.
pub const RESERVED_SHORTCUTS: &[&str] = &["api", "admin", "health", "static"];

/// Set of disallowed shortcuts, matched exactly (case-sensitive).
#[derive(Debug, Clone)]
pub struct ReservedShortcuts {
    names: HashSet<String>,
}

impl ReservedShortcuts {
    /// Builds the set from the built-in names plus `extra`.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: HashSet<String> = RESERVED_SHORTCUTS.iter().map(|s| s.to_string()).collect();
        names.extend(
            extra
                .into_iter()
                .map(|s| {
                    let s: String = s.into();
                    s.trim().to_string()
                })
                .filter(|s| !s.is_empty()),
        );
        Self { names }
    }

    pub fn contains(&self, shortcut: &str) -> bool {
        self.names.contains(shortcut)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ReservedShortcuts {
    /// The built-in names only.
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}
