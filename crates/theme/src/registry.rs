//! Theme registry
//!
//! Holds every registered theme fully precomputed (style override, metadata
//! and CSS text), keyed by id. The registry is an ordinary value owned by the
//! application's composition root; share it behind an `Arc` if several
//! threads need it.
//!
//! Registration runs the whole merge → validate → resolve → adapt → CSS
//! pipeline before taking the write lock, so a reader only ever sees
//! complete entries.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use theme::{RegistryConfig, ThemeRegistry};
//!
//! let registry = ThemeRegistry::new(RegistryConfig::default()).unwrap();
//! assert!(registry.has_theme("nord"));
//!
//! let added = registry.register_custom_theme(&json!({
//!     "id": "brand",
//!     "name": "Brand",
//!     "colorScheme": "light",
//!     "colors": { "primary": "#0ca678" }
//! }));
//! assert!(added);
//! assert_eq!(registry.get_theme("brand").meta.name, "Brand");
//! ```

use crate::adapter::{adapt_resolved, StyleOverride};
use crate::bundled::{base_document, bundled_documents};
use crate::config::RegistryConfig;
use crate::css::generate_css_variables;
use crate::error::{Result, ThemeError};
use crate::loader::load_theme_dir;
use crate::merge::deep_merge;
use crate::resolve::resolve_colors;
use crate::types::{ThemeDefinition, ThemeMeta};
use crate::validation::validate_theme;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A fully precomputed theme
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEntry {
    /// Structure for the component theming provider
    pub style_override: StyleOverride,
    /// Picker metadata
    pub meta: ThemeMeta,
    /// Scoped custom property block
    pub css_vars: String,
    /// The merged definition the entry was built from
    pub definition: ThemeDefinition,
}

impl ThemeEntry {
    /// Theme id
    pub fn id(&self) -> &str {
        &self.meta.id
    }
}

/// Run the registration pipeline for one extension document
///
/// Stateless: the result is not stored anywhere.
pub fn build_entry(base: &Value, extension: &Value, selector: &str) -> Result<ThemeEntry> {
    let merged = deep_merge(base, extension);
    let definition = validate_theme(&merged)?;
    let resolved = resolve_colors(&definition.colors, definition.color_scheme);

    Ok(ThemeEntry {
        style_override: adapt_resolved(&definition, &resolved),
        meta: ThemeMeta::from(&definition),
        css_vars: generate_css_variables(&resolved, &definition, selector),
        definition,
    })
}

/// Registered themes, keyed by id, in registration order
pub struct ThemeRegistry {
    config: RegistryConfig,
    base: Value,
    by_id: RwLock<IndexMap<String, Arc<ThemeEntry>>>,
    /// Slot of the default id in `by_id`; entries are never removed and
    /// re-inserting a key keeps its slot
    default_index: usize,
}

impl std::fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("default_theme_id", &self.config.default_theme_id)
            .field("themes", &self.all_theme_ids())
            .finish()
    }
}

impl ThemeRegistry {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Register the bundled themes, then every document in
    /// `config.theme_dirs`
    ///
    /// Fails with [`ThemeError::MissingDefaultTheme`] if the configured
    /// default did not register.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let base = base_document()?;
        let mut documents = bundled_documents()?;
        for dir in &config.theme_dirs {
            documents.extend(load_theme_dir(dir)?);
        }
        Self::with_documents(config, base, documents)
    }

    /// Initialize from caller-supplied base and extension documents
    ///
    /// Extensions are registered in iteration order. One that fails the
    /// pipeline is logged and skipped; a later document with the same id
    /// replaces an earlier one.
    pub fn with_documents(
        config: RegistryConfig,
        base: Value,
        extensions: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        let mut by_id: IndexMap<String, Arc<ThemeEntry>> = IndexMap::new();

        for extension in extensions {
            match build_entry(&base, &extension, &config.css_selector) {
                Ok(entry) => {
                    tracing::debug!("Registered theme '{}' ({})", entry.id(), entry.meta.color_scheme);
                    by_id.insert(entry.meta.id.clone(), Arc::new(entry));
                }
                Err(ThemeError::Validation(err)) => {
                    tracing::warn!("Skipping invalid theme: {}", err);
                }
                Err(err) => {
                    tracing::warn!("Skipping theme that failed to build: {}", err);
                }
            }
        }

        let default_id = config.default_theme_id.clone();
        let Some(default_index) = by_id.get_index_of(&default_id) else {
            tracing::error!(
                "Default theme '{}' failed to register ({} other theme(s) available)",
                default_id,
                by_id.len()
            );
            return Err(ThemeError::MissingDefaultTheme(default_id));
        };

        tracing::info!(
            "Theme registry initialized with {} theme(s), default '{}'",
            by_id.len(),
            default_id
        );

        Ok(Self {
            config,
            base,
            by_id: RwLock::new(by_id),
            default_index,
        })
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Entry for `id`, or the default theme's entry if `id` is unknown
    pub fn get_theme(&self, id: &str) -> Arc<ThemeEntry> {
        let by_id = self.by_id.read();
        match by_id.get(id) {
            Some(entry) => Arc::clone(entry),
            None => {
                tracing::debug!(
                    "Theme '{}' not found, using default '{}'",
                    id,
                    self.config.default_theme_id
                );
                Arc::clone(&by_id[self.default_index])
            }
        }
    }

    /// Entry for `id`, without falling back
    pub fn try_get_theme(&self, id: &str) -> Result<Arc<ThemeEntry>> {
        self.by_id
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ThemeError::NotFound(id.to_string()))
    }

    /// Style override for `id` (falls back like [`get_theme`](Self::get_theme))
    pub fn get_mantine_theme(&self, id: &str) -> StyleOverride {
        self.get_theme(id).style_override.clone()
    }

    /// CSS custom property block for `id` (falls back like
    /// [`get_theme`](Self::get_theme))
    pub fn css_for(&self, id: &str) -> String {
        self.get_theme(id).css_vars.clone()
    }

    /// Metadata of every theme, in registration order
    pub fn all_theme_meta(&self) -> Vec<ThemeMeta> {
        self.by_id
            .read()
            .values()
            .map(|entry| entry.meta.clone())
            .collect()
    }

    /// Every registered id, in registration order
    pub fn all_theme_ids(&self) -> Vec<String> {
        self.by_id.read().keys().cloned().collect()
    }

    /// Whether `id` is registered
    pub fn has_theme(&self, id: &str) -> bool {
        self.by_id.read().contains_key(id)
    }

    /// The designated default theme id
    pub fn default_theme_id(&self) -> &str {
        &self.config.default_theme_id
    }

    /// Number of registered themes
    pub fn len(&self) -> usize {
        self.by_id.read().len()
    }

    /// Whether no theme is registered (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.by_id.read().is_empty()
    }

    /// Configuration the registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // =========================================================================
    // Runtime registration
    // =========================================================================

    /// Register an extension at runtime through the startup pipeline
    ///
    /// Returns `false`, leaving the registry untouched, if the extension is
    /// rejected. An existing theme with the same id is replaced.
    pub fn register_custom_theme<T: Serialize + ?Sized>(&self, extension: &T) -> bool {
        match self.try_register_custom_theme(extension) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("Custom theme rejected: {}", err);
                false
            }
        }
    }

    /// [`register_custom_theme`](Self::register_custom_theme) reporting why a
    /// theme was rejected
    pub fn try_register_custom_theme<T: Serialize + ?Sized>(&self, extension: &T) -> Result<ThemeMeta> {
        let document = serde_json::to_value(extension)?;
        let entry = Arc::new(build_entry(&self.base, &document, &self.config.css_selector)?);
        let meta = entry.meta.clone();

        self.by_id.write().insert(meta.id.clone(), entry);

        tracing::debug!("Registered custom theme '{}' ({})", meta.id, meta.color_scheme);
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::{bundled_theme_ids, DEFAULT_THEME_ID};
    use crate::types::ThemeExtension;
    use color::ColorScheme;
    use serde_json::json;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new(RegistryConfig::default()).unwrap()
    }

    fn minimal(id: &str) -> Value {
        json!({ "id": id, "name": id.to_uppercase(), "colorScheme": "dark" })
    }

    // ==========================================================================
    // Initialization Tests
    // ==========================================================================

    #[test]
    fn test_bundled_themes_all_register() {
        let registry = registry();
        let expected: Vec<String> = bundled_theme_ids().map(String::from).collect();
        assert_eq!(registry.all_theme_ids(), expected);
        assert_eq!(registry.len(), 14);
        assert!(registry.has_theme(DEFAULT_THEME_ID));
    }

    #[test]
    fn test_invalid_extension_skipped() {
        let base = base_document().unwrap();
        let docs = vec![
            minimal("default-dark"),
            json!({ "id": "broken", "name": "Broken", "colorScheme": "sepia" }),
            minimal("second"),
        ];
        let registry = ThemeRegistry::with_documents(RegistryConfig::default(), base, docs).unwrap();
        assert_eq!(registry.all_theme_ids(), vec!["default-dark", "second"]);
    }

    #[test]
    fn test_missing_default_fails_fast() {
        let base = base_document().unwrap();
        let result = ThemeRegistry::with_documents(
            RegistryConfig::default().with_default_theme("nope"),
            base,
            vec![minimal("default-dark")],
        );
        assert!(matches!(result, Err(ThemeError::MissingDefaultTheme(id)) if id == "nope"));
    }

    #[test]
    fn test_invalid_default_fails_fast() {
        let base = base_document().unwrap();
        let docs = vec![json!({ "id": "default-dark", "name": "", "colorScheme": "dark" })];
        let result = ThemeRegistry::with_documents(RegistryConfig::default(), base, docs);
        assert!(matches!(result, Err(ThemeError::MissingDefaultTheme(_))));
    }

    #[test]
    fn test_configured_selector_used() {
        let config = RegistryConfig {
            css_selector: ".wpsg-shell".to_string(),
            ..RegistryConfig::default()
        };
        let registry = ThemeRegistry::new(config).unwrap();
        assert!(registry.css_for("ocean").starts_with(".wpsg-shell {"));
    }

    // ==========================================================================
    // Lookup Tests
    // ==========================================================================

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let registry = registry();
        let fallback = registry.get_theme("nonexistent-id");
        let default = registry.get_theme(DEFAULT_THEME_ID);
        assert!(Arc::ptr_eq(&fallback, &default));
    }

    #[test]
    fn test_try_get_does_not_fall_back() {
        let registry = registry();
        assert!(registry.try_get_theme("nord").is_ok());
        assert!(matches!(
            registry.try_get_theme("nonexistent-id"),
            Err(ThemeError::NotFound(id)) if id == "nonexistent-id"
        ));
    }

    #[test]
    fn test_meta_in_registration_order() {
        let registry = registry();
        let meta = registry.all_theme_meta();
        assert_eq!(meta.len(), registry.len());
        assert_eq!(meta[0].id, "default-dark");
        assert_eq!(meta[0].color_scheme, ColorScheme::Dark);
        assert_eq!(meta[1].id, "default-light");
        assert_eq!(meta[1].color_scheme, ColorScheme::Light);
    }

    #[test]
    fn test_mantine_theme_matches_entry() {
        let registry = registry();
        assert_eq!(
            registry.get_mantine_theme("dracula"),
            registry.get_theme("dracula").style_override
        );
    }

    // ==========================================================================
    // Registration Tests
    // ==========================================================================

    #[test]
    fn test_register_custom_theme() {
        let registry = registry();
        let ext = ThemeExtension::new("brand", "Brand", ColorScheme::Light)
            .with_section("colors", json!({ "primary": { "base": "#0ca678", "shades": 10 } }));

        assert!(registry.register_custom_theme(&ext));
        assert!(registry.has_theme("brand"));
        assert_eq!(registry.all_theme_ids().last().map(String::as_str), Some("brand"));
        assert!(registry.css_for("brand").contains("--wpsg-color-scheme: light;"));
    }

    #[test]
    fn test_rejected_custom_theme_leaves_registry_untouched() {
        let registry = registry();
        let before = registry.all_theme_meta();

        assert!(!registry.register_custom_theme(&json!({ "id": "", "name": "X", "colorScheme": "dark" })));
        assert!(!registry.register_custom_theme(&json!({ "id": "nord", "name": "", "colorScheme": "dark" })));

        assert_eq!(registry.all_theme_meta(), before);
        assert_eq!(registry.get_theme("nord").meta.name, "Nord");
    }

    #[test]
    fn test_custom_theme_cannot_break_out_of_rule_block() {
        let registry = registry();
        let ext = json!({
            "id": "x",
            "name": "X",
            "colorScheme": "dark",
            "typography": { "fontFamily": "a; } :host { display: none" }
        });

        assert!(!registry.register_custom_theme(&ext));
        assert!(!registry.has_theme("x"));
        assert!(!registry.css_for("x").contains("display: none"));
        assert_eq!(registry.css_for("x").matches('{').count(), 1);
    }

    #[test]
    fn test_try_register_reports_issues() {
        let registry = registry();
        let err = registry
            .try_register_custom_theme(&json!({
                "id": "bad",
                "name": "Bad",
                "colorScheme": "dark",
                "colors": { "border": "nope" }
            }))
            .unwrap_err();
        match err {
            ThemeError::Validation(v) => assert!(v.has_issue_at("colors.border")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let registry = registry();
        let position = registry.all_theme_ids().iter().position(|id| id == "ocean");

        let mut doc = minimal("ocean");
        doc["name"] = json!("Ocean Deep");
        assert!(registry.register_custom_theme(&doc));

        assert_eq!(registry.get_theme("ocean").meta.name, "Ocean Deep");
        assert_eq!(registry.all_theme_ids().iter().position(|id| id == "ocean"), position);
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn test_replacing_default_updates_fallback() {
        let registry = registry();
        let mut doc = minimal(DEFAULT_THEME_ID);
        doc["name"] = json!("House Style");
        assert!(registry.register_custom_theme(&doc));
        assert_eq!(registry.get_theme("missing").meta.name, "House Style");

        assert!(registry.register_custom_theme(&minimal("after-default")));
        assert_eq!(registry.get_theme("missing").meta.name, "House Style");
    }

    #[test]
    fn test_concurrent_reads_and_registration() {
        let registry = registry();
        std::thread::scope(|scope| {
            for i in 0..4 {
                let registry = &registry;
                scope.spawn(move || {
                    let id = format!("custom-{}", i);
                    assert!(registry.register_custom_theme(&minimal(&id)));
                });
                scope.spawn(move || {
                    for _ in 0..50 {
                        let entry = registry.get_theme("midnight");
                        assert_eq!(entry.style_override.colors["primary"].len(), 10);
                    }
                });
            }
        });
        assert_eq!(registry.len(), 18);
    }
}
