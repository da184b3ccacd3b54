//! Theme → component style override
//!
//! [`adapt_theme`] turns a validated [`ThemeDefinition`] into the structure
//! the UI's theming provider consumes: the primary and dark shade families,
//! copied typography and scales, a generated rule for every styled
//! component, and the raw palette under `other`.
//!
//! Generated component rules are a pure function of [`ResolvedColors`];
//! explicit `components` entries in the definition are layered on top.

use crate::merge::merge_maps;
use crate::resolve::{resolve_colors, ResolvedColors};
use crate::types::{ComponentMap, ComponentRule, Headings, PrimaryShade, Scale, ThemeDefinition};
use color::{with_alpha, ColorTuple};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Identifier of the generated primary color family
pub const PRIMARY_COLOR: &str = "primary";

/// Identifier of the generated surface color family
pub const DARK_COLOR: &str = "dark";

/// Components that always receive generated rules
pub const GENERATED_COMPONENTS: [&str; 20] = [
    "Button",
    "Card",
    "Paper",
    "Input",
    "TextInput",
    "PasswordInput",
    "Modal",
    "ActionIcon",
    "Badge",
    "Alert",
    "Tabs",
    "Table",
    "SegmentedControl",
    "Select",
    "Checkbox",
    "Switch",
    "Anchor",
    "Tooltip",
    "Menu",
    "Notification",
];

// =============================================================================
// Output types
// =============================================================================

/// Raw palette tokens for consumers outside the component system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteTokens {
    /// Page background
    pub background: String,
    /// Card and panel surface
    pub surface: String,
    /// Raised surface
    pub surface2: String,
    /// Highest surface
    pub surface3: String,
    /// Body text
    pub text: String,
    /// Secondary text
    pub text_muted: String,
    /// Tertiary text
    pub text_muted2: String,
    /// Borders and dividers
    pub border: String,
    /// Success state
    pub success: String,
    /// Warning state
    pub warning: String,
    /// Error state
    pub error: String,
    /// Informational state
    pub info: String,
    /// Accent
    pub accent: String,
    /// Green accent
    pub accent_green: String,
    /// Purple accent
    pub accent_purple: String,
    /// Page background, exposed under the name the host page styles use
    pub body_background: String,
}

impl From<&ResolvedColors> for PaletteTokens {
    fn from(c: &ResolvedColors) -> Self {
        Self {
            background: c.background.clone(),
            surface: c.surface.clone(),
            surface2: c.surface2.clone(),
            surface3: c.surface3.clone(),
            text: c.text.clone(),
            text_muted: c.text_muted.clone(),
            text_muted2: c.text_muted2.clone(),
            border: c.border.clone(),
            success: c.success.clone(),
            warning: c.warning.clone(),
            error: c.error.clone(),
            info: c.info.clone(),
            accent: c.accent.clone(),
            accent_green: c.accent_green.clone(),
            accent_purple: c.accent_purple.clone(),
            body_background: c.background.clone(),
        }
    }
}

/// Style configuration handed to the component theming provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    /// Always [`PRIMARY_COLOR`]
    pub primary_color: String,
    /// Default shade index per scheme
    pub primary_shade: PrimaryShade,
    /// Generated color families (`primary`, `dark`)
    pub colors: BTreeMap<String, ColorTuple>,
    /// Body font stack
    pub font_family: String,
    /// Monospace font stack
    pub font_family_monospace: String,
    /// Body font sizes
    pub font_sizes: Scale,
    /// Body line height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    /// Heading typography
    pub headings: Headings,
    /// Spacing scale
    pub spacing: Scale,
    /// Radius scale
    pub radius: Scale,
    /// Shadow scale
    pub shadows: Scale,
    /// Breakpoints
    pub breakpoints: Scale,
    /// Component name → rules
    pub components: ComponentMap,
    /// Raw palette tokens
    pub other: PaletteTokens,
}

impl StyleOverride {
    /// A generated color family by name
    pub fn color_family(&self, name: &str) -> Option<&ColorTuple> {
        self.colors.get(name)
    }

    /// Rules for one component
    pub fn component(&self, name: &str) -> Option<&ComponentRule> {
        self.components.get(name)
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// Adapt a validated definition, resolving its colors first
pub fn adapt_theme(definition: &ThemeDefinition) -> StyleOverride {
    let resolved = resolve_colors(&definition.colors, definition.color_scheme);
    adapt_resolved(definition, &resolved)
}

/// Adapt a definition whose colors were already resolved
///
/// The registry uses this so the palette is resolved once per theme and
/// shared with the CSS variable generator.
pub fn adapt_resolved(definition: &ThemeDefinition, resolved: &ResolvedColors) -> StyleOverride {
    let typography = &definition.typography;

    let mut colors = BTreeMap::new();
    colors.insert(PRIMARY_COLOR.to_string(), resolved.primary.clone());
    colors.insert(DARK_COLOR.to_string(), resolved.dark.clone());

    let mut components = generate_components(resolved);
    for (name, explicit) in &definition.components {
        let rule = components.entry(name.clone()).or_default();
        apply_override(rule, explicit);
    }

    StyleOverride {
        primary_color: PRIMARY_COLOR.to_string(),
        primary_shade: resolved.primary_shade,
        colors,
        font_family: typography.font_family.clone(),
        font_family_monospace: typography.font_family_mono.clone(),
        font_sizes: typography.font_sizes.clone(),
        line_height: typography.line_height.clone(),
        headings: typography.headings.clone(),
        spacing: definition.spacing.clone(),
        radius: definition.radius.clone(),
        shadows: definition.shadows.clone(),
        breakpoints: definition.breakpoints.clone(),
        components,
        other: PaletteTokens::from(resolved),
    }
}

/// Layer an explicit rule over a generated one
///
/// Top-level keys of `explicit` replace the generated ones, except
/// `defaultProps`, which is merged key by key with explicit values winning.
fn apply_override(rule: &mut ComponentRule, explicit: &ComponentRule) {
    if let Some(props) = &explicit.default_props {
        rule.default_props = Some(match &rule.default_props {
            Some(generated) => merge_maps(generated, props),
            None => props.clone(),
        });
    }
    if let Some(styles) = &explicit.styles {
        rule.styles = Some(styles.clone());
    }
    for (key, value) in &explicit.extra {
        rule.extra.insert(key.clone(), value.clone());
    }
}

// =============================================================================
// Generated component rules
// =============================================================================

fn rule(value: Value) -> ComponentRule {
    let Value::Object(mut map) = value else {
        return ComponentRule::default();
    };
    ComponentRule {
        default_props: take_object(&mut map, "defaultProps"),
        styles: take_object(&mut map, "styles"),
        extra: map,
    }
}

fn take_object(map: &mut Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    match map.remove(key) {
        Some(Value::Object(inner)) => Some(inner),
        _ => None,
    }
}

fn border(color: &str) -> String {
    format!("1px solid {}", color)
}

/// Build the generated rule set for every component in
/// [`GENERATED_COMPONENTS`]
pub fn generate_components(c: &ResolvedColors) -> ComponentMap {
    let primary = c.primary_color();
    // One step lighter in dark mode, one darker in light mode
    let primary_hover = if c.is_dark() {
        c.primary_at(c.primary_shade.dark.saturating_sub(1) as usize)
    } else {
        c.primary_at(c.primary_shade.light as usize + 1)
    };
    let on_primary = if c.is_dark() { c.dark_at(0) } else { "#ffffff" };

    let input = json!({
        "backgroundColor": c.surface2,
        "borderColor": c.border,
        "color": c.text,
        "&::placeholder": { "color": c.text_muted2 },
        "&:focus": { "borderColor": primary },
    });
    let field_parts = json!({
        "input": input,
        "label": { "color": c.text, "fontWeight": 500 },
        "description": { "color": c.text_muted },
        "error": { "color": c.error },
    });

    let mut password_parts = field_parts.clone();
    password_parts["innerInput"] = json!({ "color": c.text });
    password_parts["visibilityToggle"] = json!({ "color": c.text_muted });

    let mut select_parts = field_parts.clone();
    select_parts["dropdown"] = json!({
        "backgroundColor": c.surface,
        "borderColor": c.border,
    });
    select_parts["option"] = json!({
        "color": c.text,
        "&[data-combobox-selected]": { "backgroundColor": with_alpha(primary, 0.2), "color": c.text },
        "&:hover": { "backgroundColor": c.surface2 },
    });

    let generated = [
        (
            "Button",
            json!({
                "defaultProps": { "variant": "filled", "radius": "md" },
                "styles": {
                    "root": {
                        "backgroundColor": primary,
                        "color": on_primary,
                        "fontWeight": 600,
                        "&:hover": { "backgroundColor": primary_hover },
                        "&:disabled": { "backgroundColor": c.surface3, "color": c.text_muted2 },
                    }
                }
            }),
        ),
        (
            "Card",
            json!({
                "defaultProps": { "withBorder": true, "radius": "md", "padding": "lg" },
                "styles": {
                    "root": { "backgroundColor": c.surface, "borderColor": c.border, "color": c.text }
                }
            }),
        ),
        (
            "Paper",
            json!({
                "defaultProps": { "radius": "md" },
                "styles": { "root": { "backgroundColor": c.surface, "color": c.text } }
            }),
        ),
        (
            "Input",
            json!({
                "styles": {
                    "input": field_parts["input"],
                    "section": { "color": c.text_muted },
                }
            }),
        ),
        ("TextInput", json!({ "styles": field_parts })),
        ("PasswordInput", json!({ "styles": password_parts })),
        (
            "Modal",
            json!({
                "defaultProps": {
                    "centered": true,
                    "radius": "md",
                    "overlayProps": { "backgroundOpacity": 0.55, "blur": 3 }
                },
                "styles": {
                    "content": { "backgroundColor": c.surface, "color": c.text },
                    "header": { "backgroundColor": c.surface, "borderBottom": border(&c.border) },
                    "title": { "color": c.text, "fontWeight": 600 },
                    "close": { "color": c.text_muted },
                    "overlay": { "backgroundColor": with_alpha(&c.background, 0.7) },
                }
            }),
        ),
        (
            "ActionIcon",
            json!({
                "defaultProps": { "variant": "subtle", "radius": "md" },
                "styles": {
                    "root": {
                        "color": c.text_muted,
                        "&:hover": { "backgroundColor": c.surface2, "color": c.text },
                    }
                }
            }),
        ),
        (
            "Badge",
            json!({
                "defaultProps": { "variant": "light", "radius": "sm" },
                "styles": {
                    "root": {
                        "backgroundColor": with_alpha(primary, 0.15),
                        "color": if c.is_dark() { c.primary_at(3) } else { c.primary_at(7) },
                    }
                }
            }),
        ),
        (
            "Alert",
            json!({
                "defaultProps": { "variant": "light", "radius": "md" },
                "styles": {
                    "root": {
                        "backgroundColor": with_alpha(&c.info, 0.12),
                        "border": border(&with_alpha(&c.info, 0.35)),
                    },
                    "title": { "color": c.text },
                    "message": { "color": c.text_muted },
                    "icon": { "color": c.info },
                }
            }),
        ),
        (
            "Tabs",
            json!({
                "styles": {
                    "list": { "borderColor": c.border },
                    "tab": {
                        "color": c.text_muted,
                        "&:hover": { "backgroundColor": c.surface2, "color": c.text },
                        "&[data-active]": { "color": primary, "borderColor": primary },
                    },
                }
            }),
        ),
        (
            "Table",
            json!({
                "defaultProps": { "highlightOnHover": true, "verticalSpacing": "sm" },
                "styles": {
                    "table": { "color": c.text },
                    "th": { "color": c.text_muted, "borderBottom": border(&c.border) },
                    "td": { "borderBottom": border(&c.border) },
                    "tr": { "&:hover": { "backgroundColor": c.surface2 } },
                }
            }),
        ),
        (
            "SegmentedControl",
            json!({
                "defaultProps": { "radius": "md" },
                "styles": {
                    "root": { "backgroundColor": c.surface2 },
                    "indicator": { "backgroundColor": c.surface3 },
                    "label": {
                        "color": c.text_muted,
                        "&[data-active]": { "color": c.text },
                    },
                }
            }),
        ),
        ("Select", json!({ "styles": select_parts })),
        (
            "Checkbox",
            json!({
                "defaultProps": { "color": PRIMARY_COLOR },
                "styles": {
                    "input": {
                        "backgroundColor": c.surface2,
                        "borderColor": c.border,
                        "&:checked": { "backgroundColor": primary, "borderColor": primary },
                    },
                    "label": { "color": c.text },
                    "icon": { "color": on_primary },
                }
            }),
        ),
        (
            "Switch",
            json!({
                "defaultProps": { "color": PRIMARY_COLOR },
                "styles": {
                    "track": { "backgroundColor": c.surface3, "borderColor": c.border },
                    "thumb": { "backgroundColor": c.text, "borderColor": c.border },
                    "label": { "color": c.text },
                }
            }),
        ),
        (
            "Anchor",
            json!({
                "defaultProps": { "underline": "hover" },
                "styles": {
                    "root": { "color": primary, "&:hover": { "color": primary_hover } }
                }
            }),
        ),
        (
            "Tooltip",
            json!({
                "defaultProps": { "withArrow": true, "openDelay": 200 },
                "styles": {
                    "tooltip": { "backgroundColor": c.text, "color": c.background }
                }
            }),
        ),
        (
            "Menu",
            json!({
                "defaultProps": { "shadow": "md", "radius": "md" },
                "styles": {
                    "dropdown": { "backgroundColor": c.surface, "borderColor": c.border },
                    "item": {
                        "color": c.text,
                        "&:hover": { "backgroundColor": c.surface2 },
                    },
                    "label": { "color": c.text_muted2 },
                    "divider": { "borderColor": c.border },
                }
            }),
        ),
        (
            "Notification",
            json!({
                "defaultProps": { "withBorder": true, "radius": "md" },
                "styles": {
                    "root": {
                        "backgroundColor": c.surface,
                        "borderColor": c.border,
                        "&::before": { "backgroundColor": primary },
                    },
                    "title": { "color": c.text },
                    "description": { "color": c.text_muted },
                    "closeButton": { "color": c.text_muted },
                }
            }),
        ),
    ];

    generated
        .into_iter()
        .map(|(name, value)| (name.to_string(), rule(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::{BASE_DEFAULTS, DEFAULT_DARK};
    use crate::merge::deep_merge;
    use crate::validation::validate_theme;

    fn definition() -> ThemeDefinition {
        let base: Value = serde_json::from_str(BASE_DEFAULTS).unwrap();
        let ext: Value = serde_json::from_str(DEFAULT_DARK).unwrap();
        validate_theme(&deep_merge(&base, &ext)).unwrap()
    }

    fn with_components(components: Value) -> ThemeDefinition {
        let mut def = definition();
        def.components = serde_json::from_value(components).unwrap();
        def
    }

    // ==========================================================================
    // Shape Tests
    // ==========================================================================

    #[test]
    fn test_adapted_shape() {
        let out = adapt_theme(&definition());
        assert_eq!(out.primary_color, "primary");
        assert_eq!(out.color_family("primary").map(|t| t.len()), Some(10));
        assert_eq!(out.color_family("dark").map(|t| t.len()), Some(10));
        for name in ["Card", "Button", "Input", "Modal", "Select", "Tabs"] {
            assert!(out.component(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_every_listed_component_generated() {
        let out = adapt_theme(&definition());
        for name in GENERATED_COMPONENTS {
            let rule = out.component(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(rule.styles.is_some(), "{name} has no styles");
        }
    }

    #[test]
    fn test_scales_copied_verbatim() {
        let def = definition();
        let out = adapt_theme(&def);
        assert_eq!(out.font_family, def.typography.font_family);
        assert_eq!(out.font_family_monospace, def.typography.font_family_mono);
        assert_eq!(out.font_sizes, def.typography.font_sizes);
        assert_eq!(out.headings, def.typography.headings);
        assert_eq!(out.spacing, def.spacing);
        assert_eq!(out.radius, def.radius);
        assert_eq!(out.shadows, def.shadows);
        assert_eq!(out.breakpoints, def.breakpoints);
        assert_eq!(out.primary_shade, def.colors.primary_shade);
    }

    #[test]
    fn test_other_carries_palette() {
        let def = definition();
        let out = adapt_theme(&def);
        assert_eq!(out.other.background, def.colors.background);
        assert_eq!(out.other.body_background, def.colors.background);
        assert_eq!(out.other.text_muted2, def.colors.text_muted2);
        assert!(!out.other.accent_purple.is_empty());
    }

    #[test]
    fn test_adapt_is_deterministic() {
        let def = definition();
        assert_eq!(adapt_theme(&def), adapt_theme(&def));
    }

    #[test]
    fn test_generated_rules_follow_palette() {
        let def = definition();
        let resolved = resolve_colors(&def.colors, def.color_scheme);
        let out = adapt_resolved(&def, &resolved);

        let card = out.component("Card").unwrap().styles.as_ref().unwrap();
        assert_eq!(card["root"]["backgroundColor"], resolved.surface.as_str());
        let button = out.component("Button").unwrap().styles.as_ref().unwrap();
        assert_eq!(button["root"]["backgroundColor"], resolved.primary_color());
    }

    // ==========================================================================
    // Override Tests
    // ==========================================================================

    #[test]
    fn test_explicit_default_props_win() {
        let out = adapt_theme(&with_components(json!({
            "Button": { "defaultProps": { "variant": "outline" } }
        })));
        let props = out.component("Button").unwrap().default_props.as_ref().unwrap();
        assert_eq!(props["variant"], "outline");
        // Generated keys not named explicitly survive
        assert_eq!(props["radius"], "md");
    }

    #[test]
    fn test_default_props_merge_deeply() {
        let out = adapt_theme(&with_components(json!({
            "Modal": { "defaultProps": { "overlayProps": { "blur": 8 } } }
        })));
        let props = out.component("Modal").unwrap().default_props.as_ref().unwrap();
        assert_eq!(props["overlayProps"]["blur"], 8);
        assert_eq!(props["overlayProps"]["backgroundOpacity"], 0.55);
        assert_eq!(props["centered"], true);
    }

    #[test]
    fn test_explicit_styles_replace_generated() {
        let out = adapt_theme(&with_components(json!({
            "Card": { "styles": { "root": { "boxShadow": "none" } } }
        })));
        let card = out.component("Card").unwrap();
        let styles = card.styles.as_ref().unwrap();
        assert_eq!(styles["root"], json!({ "boxShadow": "none" }));
        // defaultProps untouched when not overridden
        assert_eq!(card.default_props.as_ref().unwrap()["padding"], "lg");
    }

    #[test]
    fn test_unknown_component_added() {
        let out = adapt_theme(&with_components(json!({
            "Loader": { "defaultProps": { "type": "dots" }, "classNames": { "root": "wpsg-loader" } }
        })));
        let loader = out.component("Loader").unwrap();
        assert_eq!(loader.default_props.as_ref().unwrap()["type"], "dots");
        assert_eq!(loader.extra["classNames"]["root"], "wpsg-loader");
    }

    #[test]
    fn test_untouched_components_keep_generated_rules() {
        let def = definition();
        let plain = adapt_theme(&def);
        let overridden = adapt_theme(&with_components(json!({
            "Button": { "defaultProps": { "variant": "outline" } }
        })));
        assert_eq!(plain.component("Tabs"), overridden.component("Tabs"));
        assert_eq!(plain.component("Card"), overridden.component("Card"));
    }
}
