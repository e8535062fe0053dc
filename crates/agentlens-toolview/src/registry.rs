//! Renderer dispatch registry.
//!
//! Tool identifiers are produced by an independently evolving backend, so
//! call sites never switch on a closed set of renderer types. The registry is
//! the single indirection point: known identifiers map to their capability,
//! everything else degrades to the default entry.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{ToolCapability, canonical_tool_name};

/// Reserved key for the wildcard fallback entry.
const DEFAULT_KEY: &str = "default";

/// Identifier-to-capability lookup table with a mandatory fallback entry.
///
/// Constructed once at application start and injected into consumers.
/// Mutation normally happens before wide read access begins, but lookups are
/// safe against concurrent `register`/`clear` calls: each `get` observes a
/// consistent snapshot behind the lock.
pub struct ToolViewRegistry {
    entries: RwLock<HashMap<String, ToolCapability>>,
}

impl ToolViewRegistry {
    /// Create a registry seeded with the baseline mapping for known tool
    /// families plus the mandatory default entry.
    pub fn new() -> Self {
        let registry = Self {
            entries: RwLock::new(HashMap::from([(
                DEFAULT_KEY.to_string(),
                ToolCapability::Generic,
            )])),
        };
        registry.register_many(seed_entries());
        registry
    }

    /// Insert or overwrite a single mapping.
    pub fn register(&self, name: &str, capability: ToolCapability) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(canonical_tool_name(name), capability);
    }

    /// Merge a batch of mappings, later entries winning on key collision.
    pub fn register_many<I, S>(&self, mappings: I)
    where
        I: IntoIterator<Item = (S, ToolCapability)>,
        S: AsRef<str>,
    {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for (name, capability) in mappings {
            entries.insert(canonical_tool_name(name.as_ref()), capability);
        }
    }

    /// Resolve an identifier to its capability, falling back to the default
    /// entry for anything unregistered. Never fails.
    pub fn get(&self, name: &str) -> ToolCapability {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&canonical_tool_name(name))
            .or_else(|| entries.get(DEFAULT_KEY))
            .copied()
            .unwrap_or(ToolCapability::Generic)
    }

    /// Whether an identifier is explicitly registered (fallback excluded).
    pub fn has(&self, name: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(&canonical_tool_name(name))
    }

    /// All registered identifiers, excluding the default entry. Order is
    /// not guaranteed.
    pub fn tool_names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .keys()
            .filter(|k| *k != DEFAULT_KEY)
            .cloned()
            .collect()
    }

    /// Drop every registration, seed set included, keeping only the current
    /// default entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let default = entries
            .get(DEFAULT_KEY)
            .copied()
            .unwrap_or(ToolCapability::Generic);
        entries.clear();
        entries.insert(DEFAULT_KEY.to_string(), default);
    }
}

impl Default for ToolViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline mapping covering the known tool families.
///
/// Hyphenated spellings only; canonicalization folds the underscored
/// variants onto the same entries.
fn seed_entries() -> Vec<(&'static str, ToolCapability)> {
    vec![
        ("browser-navigate-to", ToolCapability::Browser),
        ("browser-go-back", ToolCapability::Browser),
        ("browser-wait", ToolCapability::Browser),
        ("browser-click-element", ToolCapability::Browser),
        ("browser-input-text", ToolCapability::Browser),
        ("browser-send-keys", ToolCapability::Browser),
        ("browser-switch-tab", ToolCapability::Browser),
        ("browser-close-tab", ToolCapability::Browser),
        ("browser-scroll-down", ToolCapability::Browser),
        ("browser-scroll-up", ToolCapability::Browser),
        ("browser-scroll-to-text", ToolCapability::Browser),
        ("browser-get-dropdown-options", ToolCapability::Browser),
        ("browser-select-dropdown-option", ToolCapability::Browser),
        ("browser-drag-drop", ToolCapability::Browser),
        ("browser-click-coordinates", ToolCapability::Browser),
        ("execute-command", ToolCapability::Shell),
        ("check-command-output", ToolCapability::Shell),
        ("terminate-command", ToolCapability::Shell),
        ("list-commands", ToolCapability::Shell),
        ("create-file", ToolCapability::File),
        ("delete-file", ToolCapability::File),
        ("full-file-rewrite", ToolCapability::File),
        ("read-file", ToolCapability::File),
        ("str-replace", ToolCapability::Edit),
        ("web-search", ToolCapability::Web),
        ("crawl-webpage", ToolCapability::Web),
        ("scrape-webpage", ToolCapability::Web),
        ("execute-data-provider-call", ToolCapability::Data),
        ("get-data-provider-endpoints", ToolCapability::Data),
        ("expose-port", ToolCapability::Port),
        ("see-image", ToolCapability::Vision),
        ("ask", ToolCapability::Ask),
        ("complete", ToolCapability::Completion),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen_underscore_equivalence() {
        let registry = ToolViewRegistry::new();
        for name in registry.tool_names() {
            let hyphenated = name.replace('_', "-");
            assert_eq!(
                registry.get(&name),
                registry.get(&hyphenated),
                "{name} and {hyphenated} should resolve identically"
            );
        }
    }

    #[test]
    fn test_get_unknown_falls_back_to_default() {
        let registry = ToolViewRegistry::new();
        assert_eq!(registry.get("never-registered"), registry.get("default"));
        assert_eq!(registry.get("never-registered"), ToolCapability::Generic);
    }

    #[test]
    fn test_seeded_families() {
        let registry = ToolViewRegistry::new();
        assert_eq!(registry.get("browser-navigate-to"), ToolCapability::Browser);
        assert_eq!(registry.get("execute_command"), ToolCapability::Shell);
        assert_eq!(registry.get("create-file"), ToolCapability::File);
        assert_eq!(registry.get("str_replace"), ToolCapability::Edit);
        assert_eq!(registry.get("web-search"), ToolCapability::Web);
        assert_eq!(
            registry.get("execute-data-provider-call"),
            ToolCapability::Data
        );
        assert_eq!(registry.get("expose_port"), ToolCapability::Port);
        assert_eq!(registry.get("see-image"), ToolCapability::Vision);
        assert_eq!(registry.get("ask"), ToolCapability::Ask);
        assert_eq!(registry.get("complete"), ToolCapability::Completion);
    }

    #[test]
    fn test_register_overwrites() {
        let registry = ToolViewRegistry::new();
        registry.register("web-search", ToolCapability::Generic);
        assert_eq!(registry.get("web_search"), ToolCapability::Generic);
    }

    #[test]
    fn test_register_many_later_wins() {
        let registry = ToolViewRegistry::new();
        registry.register_many(vec![
            ("custom-tool", ToolCapability::Web),
            ("custom-tool", ToolCapability::Data),
        ]);
        assert_eq!(registry.get("custom-tool"), ToolCapability::Data);
    }

    #[test]
    fn test_has_excludes_fallback_semantics() {
        let registry = ToolViewRegistry::new();
        assert!(registry.has("execute-command"));
        assert!(registry.has("execute_command"));
        assert!(!registry.has("never-registered"));
    }

    #[test]
    fn test_tool_names_excludes_default() {
        let registry = ToolViewRegistry::new();
        let names = registry.tool_names();
        assert!(!names.is_empty());
        assert!(!names.iter().any(|n| n == "default"));
    }

    #[test]
    fn test_clear_keeps_default() {
        let registry = ToolViewRegistry::new();
        registry.clear();
        assert!(registry.tool_names().is_empty());
        assert_eq!(registry.get("anything"), ToolCapability::Generic);
        assert_eq!(registry.get("browser-wait"), ToolCapability::Generic);
    }

    #[test]
    fn test_clear_keeps_overridden_default() {
        let registry = ToolViewRegistry::new();
        registry.register("default", ToolCapability::Web);
        registry.clear();
        assert_eq!(registry.get("anything"), ToolCapability::Web);
    }
}
