//! Theme data model
//!
//! A theme starts life as a [`ThemeExtension`]: a partial JSON document with
//! an id, a name, a color scheme and whatever sections the author chose to
//! override. After being merged onto the base defaults and validated it is
//! deserialized into a [`ThemeDefinition`], in which every section is
//! required.
//!
//! All serialized keys are camelCase to match the theme JSON files.

use color::ColorScheme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =============================================================================
// Colors
// =============================================================================

/// Primary color as authored: either a plain color or a base color with a
/// requested shade count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorShorthand {
    /// `"#228be6"`
    Plain(String),
    /// `{ "base": "#228be6", "shades": 10 }`
    Scale {
        /// Color the scale is generated from
        base: String,
        /// Requested shade count; the generated tuple always has ten entries
        shades: u32,
    },
}

impl ColorShorthand {
    /// The color the shade tuple is generated from
    pub fn base(&self) -> &str {
        match self {
            ColorShorthand::Plain(color) => color,
            ColorShorthand::Scale { base, .. } => base,
        }
    }
}

/// Which shade index acts as "the" primary color per scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryShade {
    /// Index used in light mode (0-9)
    pub light: u8,
    /// Index used in dark mode (0-9)
    pub dark: u8,
}

impl PrimaryShade {
    /// Shade index for a color scheme
    pub fn for_scheme(&self, scheme: ColorScheme) -> usize {
        match scheme {
            ColorScheme::Light => self.light as usize,
            ColorScheme::Dark => self.dark as usize,
        }
    }
}

impl Default for PrimaryShade {
    fn default() -> Self {
        Self { light: 6, dark: 8 }
    }
}

/// Color palette section of a theme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Page background
    pub background: String,
    /// Card and panel surface
    pub surface: String,
    /// Raised surface
    pub surface2: String,
    /// Highest surface (hover states, inputs)
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
    /// Brand color
    pub primary: ColorShorthand,
    /// Default primary shade index per scheme
    pub primary_shade: PrimaryShade,
    /// Warning state (defaults to amber)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Error state (defaults to red)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational state (defaults to the primary base)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Accent (defaults to the primary base)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Green accent (defaults to success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_green: Option<String>,
    /// Purple accent (defaults to violet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_purple: Option<String>,
    /// Explicit ten-entry dark tuple; derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<Vec<String>>,
}

// =============================================================================
// Scales
// =============================================================================

/// T-shirt sized scale shared by font sizes, spacing, radius, shadows and
/// breakpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    /// Extra small
    pub xs: String,
    /// Small
    pub sm: String,
    /// Medium
    pub md: String,
    /// Large
    pub lg: String,
    /// Extra large
    pub xl: String,
}

impl Scale {
    /// Keys of every scale, smallest first
    pub const KEYS: [&'static str; 5] = ["xs", "sm", "md", "lg", "xl"];

    /// Iterate `(key, value)` pairs, smallest first
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("xs", &self.xs),
            ("sm", &self.sm),
            ("md", &self.md),
            ("lg", &self.lg),
            ("xl", &self.xl),
        ]
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

// =============================================================================
// Typography
// =============================================================================

/// Font size and line height of one heading level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingSize {
    /// CSS font size
    pub font_size: String,
    /// CSS line height
    pub line_height: String,
}

/// Sizes for all six heading levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSizes {
    /// `<h1>`
    pub h1: HeadingSize,
    /// `<h2>`
    pub h2: HeadingSize,
    /// `<h3>`
    pub h3: HeadingSize,
    /// `<h4>`
    pub h4: HeadingSize,
    /// `<h5>`
    pub h5: HeadingSize,
    /// `<h6>`
    pub h6: HeadingSize,
}

impl HeadingSizes {
    /// Heading level keys in order
    pub const KEYS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
}

/// Heading typography
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headings {
    /// Heading font stack; body font when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Heading weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Per-level sizes
    pub sizes: HeadingSizes,
}

/// Typography section of a theme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Body font stack
    pub font_family: String,
    /// Monospace font stack
    pub font_family_mono: String,
    /// Body font size scale
    pub font_sizes: Scale,
    /// Body line height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    /// Heading typography
    pub headings: Headings,
}

// =============================================================================
// Components
// =============================================================================

/// Visual rules for one UI component
///
/// `defaultProps` and `styles` are free-form JSON objects; any other top-level
/// keys (`classNames`, `vars`, ...) are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRule {
    /// Props applied when the component is rendered without them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_props: Option<Map<String, Value>>,
    /// Per-part style objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Map<String, Value>>,
    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Component name → rules
pub type ComponentMap = BTreeMap<String, ComponentRule>;

// =============================================================================
// Definition
// =============================================================================

/// A fully merged and validated theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    /// Unique theme id
    pub id: String,
    /// Display name
    pub name: String,
    /// Light or dark
    pub color_scheme: ColorScheme,
    /// Color palette
    pub colors: ThemeColors,
    /// Fonts and sizes
    pub typography: Typography,
    /// Spacing scale
    pub spacing: Scale,
    /// Border radius scale
    pub radius: Scale,
    /// Box shadow scale
    pub shadows: Scale,
    /// Responsive breakpoints
    pub breakpoints: Scale,
    /// Explicit component overrides
    #[serde(default)]
    pub components: ComponentMap,
}

// =============================================================================
// Extension
// =============================================================================

/// A partial theme as authored in a theme file or submitted by an admin
///
/// Only `id`, `name` and `colorScheme` are mandatory; every other section is
/// a partial JSON object merged onto the base defaults.
///
/// # Example
///
/// ```rust
/// use color::ColorScheme;
/// use serde_json::json;
/// use theme::ThemeExtension;
///
/// let ext = ThemeExtension::new("ocean", "Ocean", ColorScheme::Dark)
///     .with_section("colors", json!({ "primary": "#1098ad" }));
///
/// let doc = ext.to_document();
/// assert_eq!(doc["colors"]["primary"], "#1098ad");
/// assert_eq!(doc["colorScheme"], "dark");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtension {
    /// Unique theme id
    pub id: String,
    /// Display name
    pub name: String,
    /// Light or dark
    pub color_scheme: ColorScheme,
    /// Partial sections (`colors`, `typography`, `components`, ...)
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl ThemeExtension {
    /// Create an extension with no section overrides
    pub fn new(id: impl Into<String>, name: impl Into<String>, color_scheme: ColorScheme) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color_scheme,
            sections: Map::new(),
        }
    }

    /// Add or replace a partial section
    pub fn with_section(mut self, key: impl Into<String>, value: Value) -> Self {
        self.sections.insert(key.into(), value);
        self
    }

    /// The JSON document form consumed by the registration pipeline
    pub fn to_document(&self) -> Value {
        let mut doc = self.sections.clone();
        doc.insert("id".to_string(), Value::String(self.id.clone()));
        doc.insert("name".to_string(), Value::String(self.name.clone()));
        doc.insert(
            "colorScheme".to_string(),
            Value::String(self.color_scheme.as_str().to_string()),
        );
        Value::Object(doc)
    }
}

// =============================================================================
// Registry records
// =============================================================================

/// Display metadata for a registered theme (feeds the theme picker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMeta {
    /// Theme id
    pub id: String,
    /// Display name
    pub name: String,
    /// Light or dark
    pub color_scheme: ColorScheme,
}

impl From<&ThemeDefinition> for ThemeMeta {
    fn from(def: &ThemeDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            color_scheme: def.color_scheme,
        }
    }
}
