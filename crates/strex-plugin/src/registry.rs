// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry.
//!
//! The `PluginRegistry` stores `Plugin` values keyed by name in registration
//! order, alongside the set of removed plugin names. A name moves from
//! unregistered to registered to (optionally) removed, never backwards: a
//! removed name cannot be registered again in the same registry.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use strex_core::StrexError;
use tracing::debug;

use crate::matcher::{self, Resolved};
use crate::plugin::Plugin;
use crate::removed;

/// Catalog of the plugins available in this process.
///
/// Populated during a single-threaded initialization phase and read-only
/// afterwards; `&PluginRegistry` can be shared freely between threads.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Plugin>,
    removed: BTreeSet<String>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that refuses the given removed names.
    pub fn with_removed(removed: impl IntoIterator<Item = String>) -> Self {
        Self {
            plugins: IndexMap::new(),
            removed: removed.into_iter().collect(),
        }
    }

    /// Parse a removed list; see [`removed::load_removed_list`].
    pub fn load_removed_list(source: &str) -> BTreeSet<String> {
        removed::load_removed_list(source)
    }

    /// Register a plugin.
    ///
    /// Fails if the name is already registered or has been removed.
    pub fn register(&mut self, plugin: Plugin) -> Result<(), StrexError> {
        let name = plugin.name().to_string();
        if self.removed.contains(&name) {
            return Err(StrexError::DuplicateName {
                name,
                removed: true,
            });
        }
        if self.plugins.contains_key(&name) {
            return Err(StrexError::DuplicateName {
                name,
                removed: false,
            });
        }
        debug!(plugin = %name, patterns = plugin.patterns().len(), "registered plugin");
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Retire a plugin name.
    ///
    /// A registered plugin is taken out of the registry and returned; an
    /// unknown name is simply recorded as removed.
    pub fn remove(&mut self, name: &str) -> Option<Plugin> {
        let plugin = self.plugins.shift_remove(name);
        self.removed.insert(name.to_string());
        debug!(plugin = %name, was_registered = plugin.is_some(), "removed plugin");
        plugin
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Live plugin names in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Plugins in registration order.
    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed.contains(name)
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// Resolve a URL to a plugin; see [`matcher::resolve`].
    pub fn resolve(&self, url: &str) -> Result<Option<Resolved<'_>>, StrexError> {
        matcher::resolve(self, url)
    }

    /// Search plugins by name or description (case-insensitive).
    ///
    /// An empty query returns every plugin. Results keep registration order.
    pub fn search(&self, query: &str) -> Vec<&Plugin> {
        if query.is_empty() {
            return self.plugins().collect();
        }
        let query_lower = query.to_lowercase();
        self.plugins()
            .filter(|p| {
                p.name().to_lowercase().contains(&query_lower)
                    || p.description().to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::UrlPattern;

    fn test_plugin(name: &str) -> Plugin {
        Plugin::new(name)
            .unwrap()
            .with_description(format!("Test plugin {name}"))
            .with_pattern(UrlPattern::new(&format!(r"https?://{name}\.example/")).unwrap())
    }

    #[test]
    fn register_then_keys_contains_name_once() {
        let mut registry = PluginRegistry::new();
        registry.register(test_plugin("twitch")).unwrap();

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["twitch"]);
        assert_eq!(registry.get("twitch").unwrap().name(), "twitch");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = PluginRegistry::new();
        registry.register(test_plugin("twitch")).unwrap();
        let err = registry.register(test_plugin("twitch")).unwrap_err();
        assert!(matches!(
            err,
            StrexError::DuplicateName { ref name, removed: false } if name == "twitch"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removed_name_cannot_be_registered() {
        let mut registry = PluginRegistry::with_removed(["justintv".to_string()]);
        let err = registry.register(test_plugin("justintv")).unwrap_err();
        assert!(matches!(err, StrexError::DuplicateName { removed: true, .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_is_monotonic() {
        let mut registry = PluginRegistry::new();
        registry.register(test_plugin("twitch")).unwrap();

        let taken = registry.remove("twitch").unwrap();
        assert_eq!(taken.name(), "twitch");
        assert!(registry.is_removed("twitch"));
        assert!(!registry.contains("twitch"));

        assert!(registry.register(test_plugin("twitch")).is_err());
        assert!(registry.keys().all(|name| !registry.is_removed(name)));
    }

    #[test]
    fn remove_unknown_name_records_it() {
        let mut registry = PluginRegistry::new();
        assert!(registry.remove("ghost").is_none());
        assert!(registry.is_removed("ghost"));
    }

    #[test]
    fn keys_keep_registration_order() {
        let mut registry = PluginRegistry::new();
        registry.register(test_plugin("zebra")).unwrap();
        registry.register(test_plugin("alpha")).unwrap();
        registry.register(test_plugin("middle")).unwrap();

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn remove_keeps_order_of_remaining() {
        let mut registry = PluginRegistry::new();
        for name in ["a", "b", "c"] {
            registry.register(test_plugin(name)).unwrap();
        }
        registry.remove("b");
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn removed_list_loaded_through_registry_seeds_it() {
        let removed = PluginRegistry::load_removed_list("foo\n# comment\n\nbar\n");
        assert_eq!(
            removed,
            BTreeSet::from(["foo".to_string(), "bar".to_string()])
        );

        let mut registry = PluginRegistry::with_removed(removed);
        assert!(registry.is_removed("foo"));
        assert!(registry.register(test_plugin("bar")).is_err());
        assert!(registry.register(test_plugin("twitch")).is_ok());
    }

    #[test]
    fn search_matches_name_and_description() {
        let mut registry = PluginRegistry::new();
        registry
            .register(test_plugin("twitch").with_description("Live game streaming"))
            .unwrap();
        registry.register(test_plugin("youtube")).unwrap();

        assert_eq!(registry.search("TWITCH").len(), 1);
        assert_eq!(registry.search("game").len(), 1);
        assert_eq!(registry.search("").len(), 2);
        assert!(registry.search("xyz_nonexistent").is_empty());
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.register(test_plugin("test")).unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PluginRegistry>();
    }
}
