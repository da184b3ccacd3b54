//! Palette resolution
//!
//! Expands the authored [`ThemeColors`] into [`ResolvedColors`]: the primary
//! shorthand becomes a ten-step tuple, the dark tuple is taken or derived,
//! and every optional semantic color receives its fallback.

use crate::types::{PrimaryShade, ThemeColors};
use color::{derive_dark_tuple, generate_color_scale, ColorScheme, ColorTuple, SCALE_LEN};
use serde::{Deserialize, Serialize};

/// Fallback for `warning`
pub const DEFAULT_WARNING: &str = "#f59e0b";
/// Fallback for `error`
pub const DEFAULT_ERROR: &str = "#ef4444";
/// Fallback for `accentPurple`
pub const DEFAULT_ACCENT_PURPLE: &str = "#a855f7";

/// Fully expanded palette of one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColors {
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
    /// Authored primary base color
    pub primary_base: String,
    /// Ten primary shades, lightest first
    pub primary: ColorTuple,
    /// Ten surface shades, lightest first
    pub dark: ColorTuple,
    /// Default primary shade per scheme
    pub primary_shade: PrimaryShade,
    /// Scheme the palette was resolved for
    pub color_scheme: ColorScheme,
}

impl ResolvedColors {
    /// The shade acting as "the" primary color for this palette's scheme
    pub fn primary_color(&self) -> &str {
        let index = self.primary_shade.for_scheme(self.color_scheme).min(SCALE_LEN - 1);
        &self.primary[index]
    }

    /// Primary shade at `index`, clamped to the tuple
    pub fn primary_at(&self, index: usize) -> &str {
        &self.primary[index.min(SCALE_LEN - 1)]
    }

    /// Dark shade at `index`, clamped to the tuple
    pub fn dark_at(&self, index: usize) -> &str {
        &self.dark[index.min(SCALE_LEN - 1)]
    }

    /// Whether this palette is for a dark scheme
    pub fn is_dark(&self) -> bool {
        self.color_scheme == ColorScheme::Dark
    }
}

/// Expand a theme's colors for `scheme`
///
/// Infallible for any palette that passed validation. An explicit `dark`
/// tuple is used only when it has exactly ten entries; otherwise one is
/// derived from `text`, `surface` and `background`.
pub fn resolve_colors(colors: &ThemeColors, scheme: ColorScheme) -> ResolvedColors {
    let primary_base = colors.primary.base().to_string();
    let primary = generate_color_scale(&primary_base, scheme);

    let dark = match explicit_dark(colors.dark.as_deref()) {
        Some(tuple) => tuple,
        None => derive_dark_tuple(&colors.text, &colors.surface, &colors.background),
    };

    let or = |value: &Option<String>, field: &str, fallback: &str| match value {
        Some(value) => value.clone(),
        None => {
            tracing::debug!("Color '{}' not set, falling back to {}", field, fallback);
            fallback.to_string()
        }
    };

    ResolvedColors {
        background: colors.background.clone(),
        surface: colors.surface.clone(),
        surface2: colors.surface2.clone(),
        surface3: colors.surface3.clone(),
        text: colors.text.clone(),
        text_muted: colors.text_muted.clone(),
        text_muted2: colors.text_muted2.clone(),
        border: colors.border.clone(),
        success: colors.success.clone(),
        warning: or(&colors.warning, "warning", DEFAULT_WARNING),
        error: or(&colors.error, "error", DEFAULT_ERROR),
        info: or(&colors.info, "info", &primary_base),
        accent: or(&colors.accent, "accent", &primary_base),
        accent_green: or(&colors.accent_green, "accentGreen", &colors.success),
        accent_purple: or(&colors.accent_purple, "accentPurple", DEFAULT_ACCENT_PURPLE),
        primary_base,
        primary,
        dark,
        primary_shade: colors.primary_shade,
        color_scheme: scheme,
    }
}

fn explicit_dark(dark: Option<&[String]>) -> Option<ColorTuple> {
    let dark = dark?;
    match <&[String; SCALE_LEN]>::try_from(dark) {
        Ok(tuple) => Some(tuple.clone()),
        Err(_) => {
            tracing::debug!("Ignoring dark tuple with {} entries; deriving instead", dark.len());
            None
        }
    }
}
