//! Shade tuple generation
//!
//! A theme only names a handful of colors; the UI needs ten ordered shades
//! per color family (index 0 lightest, index 9 darkest). This module derives
//! those tuples.

use crate::parse::parse_css_color;
use crate::space::{Hsl, Lab, Rgba};
use serde::{Deserialize, Serialize};

/// Number of shades in a color tuple
pub const SCALE_LEN: usize = 10;

/// Ten shades ordered from lightest (index 0) to darkest (index 9)
pub type ColorTuple = [String; SCALE_LEN];

/// Saturation multiplier applied to the two lightest and two darkest shades
const EXTREME_DESATURATION: f64 = 0.7;

/// Smallest L* distance between the ends of a derived dark tuple
const MIN_DARK_SPREAD: f64 = 2.0;

/// L* range spread across a dark tuple whose anchors share one lightness
const FLAT_DARK_SPREAD: f64 = 20.0;

// =============================================================================
// Color Scheme
// =============================================================================

/// Light or dark color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light surfaces, dark text
    Light,
    /// Dark surfaces, light text
    #[default]
    Dark,
}

impl ColorScheme {
    /// CSS keyword for this scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// HSL lightness range (percent) walked from shade 0 to shade 9
    pub fn lightness_range(&self) -> (f64, f64) {
        match self {
            ColorScheme::Light => (95.0, 15.0),
            ColorScheme::Dark => (85.0, 10.0),
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

// =============================================================================
// Generators
// =============================================================================

/// Generate a ten-step shade tuple from a single base color
///
/// Hue and saturation come from `base`; lightness is walked linearly across
/// the scheme's range. The two shades at each end are desaturated so very
/// light and very dark shades do not clip to neon.
///
/// An unparseable `base` is treated as achromatic, producing a gray ramp.
pub fn generate_color_scale(base: &str, scheme: ColorScheme) -> ColorTuple {
    let base_hsl = match parse_css_color(base) {
        Ok(color) => color.to_hsl(),
        Err(err) => {
            tracing::debug!("Generating gray scale for unparseable base color: {}", err);
            Hsl::new(0.0, 0.0, 50.0)
        }
    };

    let (start, end) = scheme.lightness_range();
    let last = (SCALE_LEN - 1) as f64;

    std::array::from_fn(|index| {
        let lightness = start + (end - start) * (index as f64 / last);
        let saturation = if index <= 1 || index >= SCALE_LEN - 2 {
            base_hsl.s * EXTREME_DESATURATION
        } else {
            base_hsl.s
        };
        Rgba::from_hsl(Hsl::new(base_hsl.h, saturation, lightness), 1.0).to_hex()
    })
}

/// Apply an alpha channel to a CSS color, returning `rgba(...)` notation
///
/// `alpha` is clamped to `[0, 1]`. Input that is not a CSS color is returned
/// unchanged.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    match parse_css_color(color) {
        Ok(parsed) => parsed.with_alpha(alpha).to_rgba_string(),
        Err(err) => {
            tracing::debug!("Cannot apply alpha to color: {}", err);
            color.to_string()
        }
    }
}

/// Derive the ten-step "dark" tuple from a theme's text, surface and
/// background colors
///
/// Samples a text → surface → background path in CIE L*a*b*, so steps are
/// perceptually even. The result is ordered lightest first regardless of
/// whether the theme is light or dark.
///
/// When the three anchors have (almost) the same lightness, the samples keep
/// their hue but are spread over a fixed L* band around that lightness, so
/// index 0 is always lighter than index 9.
pub fn derive_dark_tuple(text: &str, surface: &str, background: &str) -> ColorTuple {
    let text = lab_or(text, Rgba::WHITE);
    let surface = lab_or(surface, Rgba::rgb(128, 128, 128));
    let background = lab_or(background, Rgba::BLACK);

    let last = (SCALE_LEN - 1) as f64;
    let mut samples: [Lab; SCALE_LEN] = std::array::from_fn(|index| {
        let t = index as f64 / last;
        if t <= 0.5 {
            Lab::lerp(&text, &surface, t * 2.0)
        } else {
            Lab::lerp(&surface, &background, (t - 0.5) * 2.0)
        }
    });

    let first = samples[0].l;
    let end = samples[SCALE_LEN - 1].l;
    if (first - end).abs() < MIN_DARK_SPREAD {
        let top = ((first + end) / 2.0 + FLAT_DARK_SPREAD / 2.0).clamp(FLAT_DARK_SPREAD, 100.0);
        tracing::debug!("Dark tuple anchors share lightness {:.1}, spreading from L* {:.1}", first, top);
        for (index, sample) in samples.iter_mut().enumerate() {
            sample.l = top - FLAT_DARK_SPREAD * (index as f64 / last);
        }
    }

    let mut tuple: ColorTuple = samples.map(|lab| Rgba::from_lab(lab).to_hex());

    if samples[0].l < samples[SCALE_LEN - 1].l {
        tuple.reverse();
    }

    tuple
}

fn lab_or(color: &str, fallback: Rgba) -> Lab {
    match parse_css_color(color) {
        Ok(parsed) => parsed.to_lab(),
        Err(err) => {
            tracing::debug!("Using fallback for dark tuple anchor: {}", err);
            fallback.to_lab()
        }
    }
}
