//! Themes shipped with the crate
//!
//! The documents are embedded at compile time. [`BUNDLED_THEMES`] fixes the
//! registration order, which is also the order the theme picker lists them.

use crate::error::Result;
use serde_json::Value;

/// Id of the designated default theme
pub const DEFAULT_THEME_ID: &str = "default-dark";

/// Shared base-defaults document every extension is merged onto
pub const BASE_DEFAULTS: &str = include_str!("../themes/base.json");

/// The designated default theme
pub const DEFAULT_DARK: &str = include_str!("../themes/default-dark.json");

/// Bundled extension documents as `(id, json)`, in registration order
pub const BUNDLED_THEMES: [(&str, &str); 14] = [
    (DEFAULT_THEME_ID, DEFAULT_DARK),
    ("default-light", include_str!("../themes/default-light.json")),
    ("midnight", include_str!("../themes/midnight.json")),
    ("ocean", include_str!("../themes/ocean.json")),
    ("forest", include_str!("../themes/forest.json")),
    ("sunset", include_str!("../themes/sunset.json")),
    ("nord", include_str!("../themes/nord.json")),
    ("dracula", include_str!("../themes/dracula.json")),
    ("solarized-dark", include_str!("../themes/solarized-dark.json")),
    ("solarized-light", include_str!("../themes/solarized-light.json")),
    ("rose", include_str!("../themes/rose.json")),
    ("slate", include_str!("../themes/slate.json")),
    ("high-contrast", include_str!("../themes/high-contrast.json")),
    ("paper", include_str!("../themes/paper.json")),
];

/// Ids of the bundled themes, in registration order
pub fn bundled_theme_ids() -> impl Iterator<Item = &'static str> {
    BUNDLED_THEMES.iter().map(|(id, _)| *id)
}

/// Parse the base-defaults document
pub fn base_document() -> Result<Value> {
    Ok(serde_json::from_str(BASE_DEFAULTS)?)
}

/// Parse every bundled extension document, in registration order
pub fn bundled_documents() -> Result<Vec<Value>> {
    BUNDLED_THEMES
        .iter()
        .map(|(_, json)| serde_json::from_str(json).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_documents_parse() {
        assert!(base_document().unwrap().is_object());
        assert_eq!(bundled_documents().unwrap().len(), 14);
    }

    #[test]
    fn test_declared_ids_match_documents() {
        for ((id, _), doc) in BUNDLED_THEMES.iter().zip(bundled_documents().unwrap()) {
            assert_eq!(doc["id"], *id);
            assert!(doc["name"].is_string(), "{id}");
        }
    }

    #[test]
    fn test_default_theme_is_first() {
        assert_eq!(bundled_theme_ids().next(), Some(DEFAULT_THEME_ID));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = bundled_theme_ids().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BUNDLED_THEMES.len());
    }

    #[test]
    fn test_bundle_exercises_both_shorthands_and_overrides() {
        let docs = bundled_documents().unwrap();
        assert!(docs.iter().any(|d| d["colors"]["primary"].is_string()));
        assert!(docs.iter().any(|d| d["colors"]["primary"]["base"].is_string()));
        assert!(docs.iter().any(|d| d["colors"]["dark"].is_array()));
        assert!(docs.iter().any(|d| d["components"].is_object()));
        assert!(docs.iter().any(|d| d["colors"]["warning"].is_string()));
    }
}
