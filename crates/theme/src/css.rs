//! Scoped CSS custom properties
//!
//! The gallery renders inside a shadow root, so theme tokens are published as
//! `--wpsg-*` custom properties on a single rule block (`:host` by default)
//! rather than on the host page's `:root`.

use crate::resolve::ResolvedColors;
use crate::types::{Scale, ThemeDefinition};
use std::fmt::Write;

/// Namespace prefix of every generated custom property
pub const CSS_VAR_PREFIX: &str = "--wpsg-";

/// Selector used when none is configured
pub const DEFAULT_SELECTOR: &str = ":host";

/// Render the custom property block for one theme
///
/// Emits, in order: the 14 semantic colors, `primary-0` through `primary-9`,
/// the spacing, radius and shadow scales, both font stacks and finally
/// `color-scheme`. Output is deterministic for a given input pair.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use theme::{deep_merge, generate_css_variables, resolve_colors, validate_theme};
/// use theme::bundled::{BASE_DEFAULTS, DEFAULT_DARK};
///
/// let base: Value = serde_json::from_str(BASE_DEFAULTS).unwrap();
/// let ext: Value = serde_json::from_str(DEFAULT_DARK).unwrap();
/// let def = validate_theme(&deep_merge(&base, &ext)).unwrap();
/// let resolved = resolve_colors(&def.colors, def.color_scheme);
///
/// let css = generate_css_variables(&resolved, &def, ":host");
/// assert!(css.starts_with(":host {"));
/// assert!(css.contains("--wpsg-color-scheme: dark;"));
/// ```
pub fn generate_css_variables(resolved: &ResolvedColors, definition: &ThemeDefinition, selector: &str) -> String {
    let selector = if selector.trim().is_empty() {
        DEFAULT_SELECTOR
    } else {
        selector.trim()
    };

    let semantic: [(&str, &str); 14] = [
        ("background", &resolved.background),
        ("surface", &resolved.surface),
        ("surface2", &resolved.surface2),
        ("surface3", &resolved.surface3),
        ("text", &resolved.text),
        ("text-muted", &resolved.text_muted),
        ("text-muted2", &resolved.text_muted2),
        ("border", &resolved.border),
        ("primary", resolved.primary_color()),
        ("success", &resolved.success),
        ("warning", &resolved.warning),
        ("error", &resolved.error),
        ("info", &resolved.info),
        ("accent", &resolved.accent),
    ];

    let mut css = String::with_capacity(2048);
    // Writing to a String cannot fail
    let _ = writeln!(css, "{} {{", selector);

    for (name, value) in semantic {
        declare(&mut css, &format!("color-{}", name), value);
    }
    for (index, shade) in resolved.primary.iter().enumerate() {
        declare(&mut css, &format!("color-primary-{}", index), shade);
    }

    declare_scale(&mut css, "space", &definition.spacing);
    declare_scale(&mut css, "radius", &definition.radius);
    declare_scale(&mut css, "shadow", &definition.shadows);

    declare(&mut css, "font-family", &definition.typography.font_family);
    declare(&mut css, "font-family-mono", &definition.typography.font_family_mono);
    declare(&mut css, "color-scheme", definition.color_scheme.as_str());

    css.push('}');
    css.push('\n');
    css
}

fn declare(css: &mut String, name: &str, value: &str) {
    let _ = writeln!(css, "  {}{}: {};", CSS_VAR_PREFIX, name, value);
}

fn declare_scale(css: &mut String, group: &str, scale: &Scale) {
    for (key, value) in scale.entries() {
        declare(css, &format!("{}-{}", group, key), value);
    }
}
