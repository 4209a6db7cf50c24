//! Presence-only boolean flags.

use std::collections::BTreeMap;

use tracing::debug;

/// Registry of flag names and whether each has been seen.
///
/// Flags do not need to be registered before they are observed: a flag
/// seen for the first time gets an entry that is already set. Registration
/// only matters for listing the flag in help output.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<String, bool>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a flag. An existing entry keeps its state.
    pub fn register(&mut self, name: impl Into<String>) {
        self.flags.entry(name.into()).or_insert(false);
    }

    /// Mark a flag as present, creating it if it was never registered.
    pub fn observe(&mut self, name: &str) {
        match self.flags.get_mut(name) {
            Some(state) => *state = true,
            None => {
                debug!(flag = name, "observed undeclared flag");
                self.flags.insert(name.to_string(), true);
            }
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Flag names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_flags_start_unset() {
        let mut flags = FlagRegistry::new();
        flags.register("--verbose");
        assert!(!flags.is_set("--verbose"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn observe_sets_state() {
        let mut flags = FlagRegistry::new();
        flags.register("--verbose");
        flags.observe("--verbose");
        assert!(flags.is_set("--verbose"));
    }

    #[test]
    fn registering_again_keeps_state() {
        let mut flags = FlagRegistry::new();
        flags.register("--verbose");
        flags.observe("--verbose");
        flags.register("--verbose");
        assert!(flags.is_set("--verbose"));
    }

    #[test]
    fn undeclared_flags_are_created_set() {
        let mut flags = FlagRegistry::new();
        flags.observe("--dry-run");
        assert!(flags.is_set("--dry-run"));
        assert_eq!(flags.names().collect::<Vec<_>>(), vec!["--dry-run"]);
    }

    #[test]
    fn unknown_flags_are_unset() {
        let flags = FlagRegistry::new();
        assert!(!flags.is_set("--quiet"));
        assert!(flags.is_empty());
    }
}
