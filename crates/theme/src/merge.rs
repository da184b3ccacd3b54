//! Recursive JSON merge
//!
//! Used to lay a theme extension over the base defaults, and by the adapter
//! to combine generated and explicit `defaultProps`.

use serde_json::{Map, Value};

/// Merge `extension` onto `base`, returning a new value
///
/// When both sides are objects their keys merge recursively. In every other
/// case the extension value wins outright: arrays are replaced wholesale,
/// never concatenated, and an explicit `null` overwrites.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use theme::deep_merge;
///
/// let base = json!({ "colors": { "text": "#fff", "border": "#333" } });
/// let ext = json!({ "colors": { "border": "#444" } });
///
/// let merged = deep_merge(&base, &ext);
/// assert_eq!(merged, json!({ "colors": { "text": "#fff", "border": "#444" } }));
/// ```
pub fn deep_merge(base: &Value, extension: &Value) -> Value {
    match (base, extension) {
        (Value::Object(base), Value::Object(extension)) => Value::Object(merge_maps(base, extension)),
        (_, extension) => extension.clone(),
    }
}

/// Object-level form of [`deep_merge`]
pub fn merge_maps(base: &Map<String, Value>, extension: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in extension {
        let next = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge_key_by_key() {
        let base = json!({
            "typography": {
                "fontFamily": "Inter",
                "headings": { "fontWeight": "700", "sizes": { "h1": { "fontSize": "2rem" } } }
            }
        });
        let ext = json!({
            "typography": { "headings": { "sizes": { "h1": { "lineHeight": "1.2" } } } }
        });

        let merged = deep_merge(&base, &ext);
        assert_eq!(merged["typography"]["fontFamily"], "Inter");
        assert_eq!(merged["typography"]["headings"]["fontWeight"], "700");
        assert_eq!(merged["typography"]["headings"]["sizes"]["h1"]["fontSize"], "2rem");
        assert_eq!(merged["typography"]["headings"]["sizes"]["h1"]["lineHeight"], "1.2");
    }

    #[test]
    fn test_arrays_are_replaced_not_concatenated() {
        let base = json!({ "dark": ["#1", "#2", "#3"] });
        let ext = json!({ "dark": ["#a"] });
        assert_eq!(deep_merge(&base, &ext), json!({ "dark": ["#a"] }));
    }

    #[test]
    fn test_scalars_and_null_overwrite() {
        let base = json!({ "a": { "b": 1 }, "c": "x" });
        let ext = json!({ "a": null, "c": 2 });
        assert_eq!(deep_merge(&base, &ext), json!({ "a": null, "c": 2 }));
    }

    #[test]
    fn test_object_replaces_scalar() {
        let base = json!({ "primary": "#228be6" });
        let ext = json!({ "primary": { "base": "#7950f2", "shades": 10 } });
        assert_eq!(deep_merge(&base, &ext)["primary"]["base"], "#7950f2");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = json!({ "spacing": { "md": "16px" } });
        let ext = json!({ "spacing": { "md": "20px" } });
        let before = base.clone();
        let _ = deep_merge(&base, &ext);
        assert_eq!(base, before);
    }

    #[test]
    fn test_non_object_base_yields_extension() {
        assert_eq!(deep_merge(&json!(null), &json!({ "id": "x" })), json!({ "id": "x" }));
        assert_eq!(deep_merge(&json!({ "id": "x" }), &json!(3)), json!(3));
    }
}
