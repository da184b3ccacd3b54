//! Theme schema validation
//!
//! Validation walks the merged JSON document and records every violation it
//! finds instead of stopping at the first one. Only a document with no
//! issues is deserialized into a [`ThemeDefinition`], so code downstream of
//! validation works with fully populated, typed sections.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use theme::validate_theme;
//!
//! let err = validate_theme(&json!({ "id": "", "colorScheme": "midnight" })).unwrap_err();
//! assert!(err.has_issue_at("id"));
//! assert!(err.has_issue_at("colorScheme"));
//! assert!(err.has_issue_at("colors"));
//! ```

use crate::error::{IssueKind, ValidationError, ValidationIssue};
use crate::types::{HeadingSizes, Scale, ThemeDefinition};
use color::is_valid_css_color;
use serde_json::{Map, Value};

/// Required plain color fields of the `colors` section
pub const REQUIRED_COLOR_FIELDS: [&str; 9] = [
    "background",
    "surface",
    "surface2",
    "surface3",
    "text",
    "textMuted",
    "textMuted2",
    "border",
    "success",
];

/// Optional semantic color fields of the `colors` section
pub const OPTIONAL_COLOR_FIELDS: [&str; 6] = [
    "warning",
    "error",
    "info",
    "accent",
    "accentGreen",
    "accentPurple",
];

/// Sections sharing the five-step `xs..xl` scale shape
pub const SCALE_SECTIONS: [&str; 4] = ["spacing", "radius", "shadows", "breakpoints"];

const UNKNOWN_ID: &str = "<unknown>";

/// Characters that could terminate a declaration, the `:host` block or the
/// enclosing `<style>` element
const UNSAFE_CSS_CHARS: [char; 5] = ['{', '}', ';', '<', '>'];

/// Validate a merged theme document
///
/// Returns the typed definition when the document is structurally complete,
/// otherwise a [`ValidationError`] listing every violated field path.
pub fn validate_theme(candidate: &Value) -> Result<ThemeDefinition, ValidationError> {
    let Some(root) = candidate.as_object() else {
        return Err(ValidationError {
            theme_id: UNKNOWN_ID.to_string(),
            issues: vec![ValidationIssue::new("theme", IssueKind::NotAnObject)],
        });
    };

    let mut checker = Checker::default();
    let theme_id = checker
        .required_string(root, "id", "")
        .unwrap_or(UNKNOWN_ID)
        .to_string();
    checker.required_string(root, "name", "");
    checker.color_scheme(root);

    if let Some(colors) = checker.object(root, "colors", "") {
        checker.colors(colors);
    }

    if let Some(typography) = checker.object(root, "typography", "") {
        checker.typography(typography);
    }

    for section in SCALE_SECTIONS {
        if let Some(scale) = checker.object(root, section, "") {
            checker.scale(scale, section);
        }
    }

    if let Some(components) = root.get("components").filter(|v| !v.is_null()) {
        checker.components(components);
    }

    if !checker.issues.is_empty() {
        return Err(ValidationError {
            theme_id,
            issues: checker.issues,
        });
    }

    serde_json::from_value(candidate.clone()).map_err(|err| ValidationError {
        theme_id,
        issues: vec![ValidationIssue::new("theme", IssueKind::Malformed(err.to_string()))],
    })
}

/// Boolean form of [`validate_theme`]
///
/// Rejections are reported through `tracing::debug!` rather than returned.
pub fn is_valid_theme(candidate: &Value) -> bool {
    match validate_theme(candidate) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!("Theme rejected: {}", err);
            false
        }
    }
}

// =============================================================================
// Checker
// =============================================================================

fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Issue accumulator with one helper per field shape
#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, kind: IssueKind) {
        self.issues.push(ValidationIssue::new(path, kind));
    }

    /// Required nested object
    fn object<'a>(&mut self, map: &'a Map<String, Value>, key: &str, parent: &str) -> Option<&'a Map<String, Value>> {
        match map.get(key) {
            None | Some(Value::Null) => {
                self.push(child(parent, key), IssueKind::Missing);
                None
            }
            Some(Value::Object(inner)) => Some(inner),
            Some(_) => {
                self.push(child(parent, key), IssueKind::NotAnObject);
                None
            }
        }
    }

    /// Required non-empty string
    fn required_string<'a>(&mut self, map: &'a Map<String, Value>, key: &str, parent: &str) -> Option<&'a str> {
        match map.get(key) {
            None | Some(Value::Null) => {
                self.push(child(parent, key), IssueKind::Missing);
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(child(parent, key), IssueKind::EmptyString);
                None
            }
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                self.push(child(parent, key), IssueKind::NotAString);
                None
            }
        }
    }

    /// Required non-empty string emitted verbatim as a CSS custom property value
    fn css_value(&mut self, map: &Map<String, Value>, key: &str, parent: &str) {
        if let Some(value) = self.required_string(map, key, parent) {
            if value.contains(UNSAFE_CSS_CHARS) {
                self.push(child(parent, key), IssueKind::UnsafeCssValue(value.to_string()));
            }
        }
    }

    /// Optional string; `null` counts as absent
    fn optional_string(&mut self, map: &Map<String, Value>, key: &str, parent: &str) {
        match map.get(key) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => self.push(child(parent, key), IssueKind::NotAString),
        }
    }

    fn color_value(&mut self, value: &Value, path: String) {
        match value {
            Value::String(s) if is_valid_css_color(s) => {}
            Value::String(s) => self.push(path, IssueKind::InvalidColor(s.clone())),
            _ => self.push(path, IssueKind::NotAString),
        }
    }

    fn required_color(&mut self, map: &Map<String, Value>, key: &str, parent: &str) {
        match map.get(key) {
            None | Some(Value::Null) => self.push(child(parent, key), IssueKind::Missing),
            Some(value) => self.color_value(value, child(parent, key)),
        }
    }

    fn optional_color(&mut self, map: &Map<String, Value>, key: &str, parent: &str) {
        if let Some(value) = map.get(key).filter(|v| !v.is_null()) {
            self.color_value(value, child(parent, key));
        }
    }

    fn integer_in(&mut self, map: &Map<String, Value>, key: &str, parent: &str, min: i64, max: i64) {
        let path = child(parent, key);
        match map.get(key) {
            None | Some(Value::Null) => self.push(path, IssueKind::Missing),
            Some(value) => match value.as_i64() {
                Some(n) if (min..=max).contains(&n) => {}
                Some(n) => self.push(path, IssueKind::OutOfRange { value: n, min, max }),
                None => self.push(path, IssueKind::NotAnInteger),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    fn color_scheme(&mut self, root: &Map<String, Value>) {
        match root.get("colorScheme") {
            None | Some(Value::Null) => self.push("colorScheme", IssueKind::Missing),
            Some(Value::String(s)) if s == "light" || s == "dark" => {}
            Some(other) => self.push("colorScheme", IssueKind::InvalidColorScheme(other.to_string())),
        }
    }

    fn colors(&mut self, colors: &Map<String, Value>) {
        for field in REQUIRED_COLOR_FIELDS {
            self.required_color(colors, field, "colors");
        }

        match colors.get("primary") {
            None | Some(Value::Null) => self.push("colors.primary", IssueKind::Missing),
            Some(value @ Value::String(_)) => self.color_value(value, "colors.primary".to_string()),
            Some(Value::Object(scale)) if scale.contains_key("base") || scale.contains_key("shades") => {
                self.required_color(scale, "base", "colors.primary");
                self.integer_in(scale, "shades", "colors.primary", 1, i64::from(u32::MAX));
            }
            Some(_) => self.push("colors.primary", IssueKind::InvalidShorthand),
        }

        if let Some(shade) = self.object(colors, "primaryShade", "colors") {
            self.integer_in(shade, "light", "colors.primaryShade", 0, 9);
            self.integer_in(shade, "dark", "colors.primaryShade", 0, 9);
        }

        for field in OPTIONAL_COLOR_FIELDS {
            self.optional_color(colors, field, "colors");
        }

        match colors.get("dark") {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                if entries.len() != color::SCALE_LEN {
                    self.push(
                        "colors.dark",
                        IssueKind::WrongLength {
                            expected: color::SCALE_LEN,
                            actual: entries.len(),
                        },
                    );
                }
                for (index, entry) in entries.iter().enumerate() {
                    self.color_value(entry, format!("colors.dark[{}]", index));
                }
            }
            Some(_) => self.push("colors.dark", IssueKind::NotAnArray),
        }
    }

    fn typography(&mut self, typography: &Map<String, Value>) {
        self.css_value(typography, "fontFamily", "typography");
        self.css_value(typography, "fontFamilyMono", "typography");
        self.optional_string(typography, "lineHeight", "typography");

        if let Some(sizes) = self.object(typography, "fontSizes", "typography") {
            self.scale(sizes, "typography.fontSizes");
        }

        let Some(headings) = self.object(typography, "headings", "typography") else {
            return;
        };
        self.optional_string(headings, "fontFamily", "typography.headings");
        self.optional_string(headings, "fontWeight", "typography.headings");

        let Some(sizes) = self.object(headings, "sizes", "typography.headings") else {
            return;
        };
        for level in HeadingSizes::KEYS {
            if let Some(size) = self.object(sizes, level, "typography.headings.sizes") {
                let parent = format!("typography.headings.sizes.{}", level);
                self.required_string(size, "fontSize", &parent);
                self.required_string(size, "lineHeight", &parent);
            }
        }
    }

    fn scale(&mut self, scale: &Map<String, Value>, path: &str) {
        for key in Scale::KEYS {
            self.css_value(scale, key, path);
        }
    }

    fn components(&mut self, components: &Value) {
        let Some(components) = components.as_object() else {
            self.push("components", IssueKind::NotAnObject);
            return;
        };
        for (name, rule) in components {
            let path = child("components", name);
            let Some(rule) = rule.as_object() else {
                self.push(path, IssueKind::NotAnObject);
                continue;
            };
            for key in ["defaultProps", "styles"] {
                if rule.get(key).is_some_and(|v| !v.is_null() && !v.is_object()) {
                    self.push(child(&path, key), IssueKind::NotAnObject);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::{BASE_DEFAULTS, DEFAULT_DARK};
    use crate::merge::deep_merge;
    use serde_json::json;

    fn merged_default() -> Value {
        let base: Value = serde_json::from_str(BASE_DEFAULTS).unwrap();
        let ext: Value = serde_json::from_str(DEFAULT_DARK).unwrap();
        deep_merge(&base, &ext)
    }

    fn rejects_at(doc: &Value, path: &str) {
        let err = validate_theme(doc).expect_err("document should be rejected");
        assert!(err.has_issue_at(path), "expected issue at {path}, got {:?}", err.paths());
        assert!(err.to_string().contains(path), "message should name {path}: {err}");
    }

    // ==========================================================================
    // Acceptance Tests
    // ==========================================================================

    #[test]
    fn test_accepts_merged_default_theme() {
        let def = validate_theme(&merged_default()).unwrap();
        assert_eq!(def.id, "default-dark");
        assert_eq!(def.color_scheme, color::ColorScheme::Dark);
    }

    #[test]
    fn test_accepts_scheme_swapped_to_light() {
        let mut doc = merged_default();
        doc["colorScheme"] = json!("light");
        assert!(is_valid_theme(&doc));
    }

    #[test]
    fn test_accepts_scale_shorthand_and_dark_tuple() {
        let mut doc = merged_default();
        doc["colors"]["primary"] = json!({ "base": "#7950f2", "shades": 10 });
        doc["colors"]["dark"] = json!([
            "#c1c2c5", "#a6a7ab", "#909296", "#5c5f66", "#373a40",
            "#2c2e33", "#25262b", "#1a1b1e", "#141517", "#101113"
        ]);
        assert!(is_valid_theme(&doc));
    }

    // ==========================================================================
    // Rejection Tests
    // ==========================================================================

    #[test]
    fn test_rejects_null_and_non_objects() {
        rejects_at(&Value::Null, "theme");
        rejects_at(&json!("default-dark"), "theme");
        rejects_at(&json!([1, 2, 3]), "theme");
    }

    #[test]
    fn test_rejects_missing_and_empty_id() {
        let mut doc = merged_default();
        doc.as_object_mut().unwrap().remove("id");
        rejects_at(&doc, "id");

        doc["id"] = json!("");
        rejects_at(&doc, "id");
        assert_eq!(validate_theme(&doc).unwrap_err().theme_id, "<unknown>");
    }

    #[test]
    fn test_rejects_invalid_color_scheme() {
        let mut doc = merged_default();
        doc["colorScheme"] = json!("midnight");
        rejects_at(&doc, "colorScheme");
    }

    #[test]
    fn test_rejects_missing_sections() {
        for section in ["colors", "typography", "spacing", "radius", "shadows", "breakpoints"] {
            let mut doc = merged_default();
            doc.as_object_mut().unwrap().remove(section);
            rejects_at(&doc, section);
        }
    }

    #[test]
    fn test_rejects_unparseable_required_color() {
        for field in REQUIRED_COLOR_FIELDS {
            let mut doc = merged_default();
            doc["colors"][field] = json!("not-a-color");
            rejects_at(&doc, &format!("colors.{}", field));
        }
    }

    #[test]
    fn test_rejects_primary_shade_out_of_range() {
        let mut doc = merged_default();
        doc["colors"]["primaryShade"]["light"] = json!(10);
        rejects_at(&doc, "colors.primaryShade.light");

        doc["colors"]["primaryShade"]["light"] = json!(-1);
        rejects_at(&doc, "colors.primaryShade.light");

        doc["colors"]["primaryShade"]["light"] = json!(2.5);
        rejects_at(&doc, "colors.primaryShade.light");
    }

    #[test]
    fn test_rejects_bad_primary_shorthand() {
        let mut doc = merged_default();
        doc["colors"]["primary"] = json!({ "base": "#7950f2", "shades": 0 });
        rejects_at(&doc, "colors.primary.shades");

        doc["colors"]["primary"] = json!({ "base": "nope", "shades": 10 });
        rejects_at(&doc, "colors.primary.base");

        doc["colors"]["primary"] = json!(42);
        rejects_at(&doc, "colors.primary");
    }

    #[test]
    fn test_rejects_short_dark_tuple() {
        let mut doc = merged_default();
        doc["colors"]["dark"] = json!(["#000000", "#111111"]);
        let err = validate_theme(&doc).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::WrongLength { expected: 10, actual: 2 }));
    }

    #[test]
    fn test_rejects_non_array_dark_tuple() {
        let mut doc = merged_default();
        doc["colors"]["dark"] = json!("#101113");
        let err = validate_theme(&doc).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::new("colors.dark", IssueKind::NotAnArray)]);
    }

    #[test]
    fn test_rejects_values_that_escape_the_rule_block() {
        let mut doc = merged_default();
        doc["typography"]["fontFamily"] = json!("a; } :host { display: none");
        doc["typography"]["fontFamilyMono"] = json!("mono</style><script>");
        doc["spacing"]["md"] = json!("1rem}");
        doc["shadows"]["xs"] = json!("0 0 1px red; color: red");

        let err = validate_theme(&doc).unwrap_err();
        assert_eq!(err.issues.len(), 4, "{err}");
        for path in ["typography.fontFamily", "typography.fontFamilyMono", "spacing.md", "shadows.xs"] {
            assert!(err.has_issue_at(path), "{path}");
        }
        assert!(err
            .issues
            .iter()
            .all(|i| matches!(i.kind, IssueKind::UnsafeCssValue(_))));
    }

    #[test]
    fn test_accepts_quoted_font_stacks_and_composite_shadows() {
        let mut doc = merged_default();
        doc["typography"]["fontFamily"] = json!("\"Iowan Old Style\", Georgia, serif");
        doc["shadows"]["md"] = json!("0 1px 3px rgba(0, 0, 0, 0.05), 0 10px 15px -5px rgba(0, 0, 0, 0.1)");
        assert!(validate_theme(&doc).is_ok());
    }

    #[test]
    fn test_rejects_invalid_optional_color() {
        let mut doc = merged_default();
        doc["colors"]["accentPurple"] = json!("purple-ish");
        rejects_at(&doc, "colors.accentPurple");
    }

    #[test]
    fn test_rejects_incomplete_typography() {
        let mut doc = merged_default();
        doc["typography"]["fontFamilyMono"] = json!("  ");
        doc["typography"]["headings"]["sizes"]["h4"]
            .as_object_mut()
            .unwrap()
            .remove("lineHeight");
        let err = validate_theme(&doc).unwrap_err();
        assert!(err.has_issue_at("typography.fontFamilyMono"));
        assert!(err.has_issue_at("typography.headings.sizes.h4.lineHeight"));
    }

    #[test]
    fn test_rejects_incomplete_scale() {
        let mut doc = merged_default();
        doc["radius"].as_object_mut().unwrap().remove("lg");
        rejects_at(&doc, "radius.lg");
    }

    #[test]
    fn test_collects_every_issue() {
        let mut doc = merged_default();
        doc["id"] = json!("");
        doc["colorScheme"] = json!("sepia");
        doc["colors"]["border"] = json!("???");
        doc["spacing"]["md"] = json!(16);

        let err = validate_theme(&doc).unwrap_err();
        assert_eq!(err.issues.len(), 4, "{err}");
        for path in ["id", "colorScheme", "colors.border", "spacing.md"] {
            assert!(err.has_issue_at(path), "{path}");
        }
    }

    #[test]
    fn test_rejects_non_object_component_props() {
        let mut doc = merged_default();
        doc["components"] = json!({ "Button": { "defaultProps": "filled" } });
        rejects_at(&doc, "components.Button.defaultProps");
    }
}
