//! Color utilities for the WP Super Gallery theme system
//!
//! This crate provides the color math behind runtime themes: parsing of CSS
//! color strings, conversions between sRGB, HSL and CIE L*a*b*, and the
//! generators that turn a single brand color into a full shade tuple.
//!
//! # Modules
//!
//! - [`parse`] - CSS color syntax (hex, `rgb()`, `hsl()`, named colors)
//! - [`space`] - Color types and color-space conversions
//! - [`scale`] - Shade generation, alpha blending and dark tuple derivation
//!
//! # Example
//!
//! ```rust
//! use color::{generate_color_scale, parse_css_color, with_alpha, ColorScheme};
//!
//! let shades = generate_color_scale("#228be6", ColorScheme::Light);
//! assert_eq!(shades.len(), 10);
//! assert!(parse_css_color(&shades[4]).is_ok());
//!
//! assert_eq!(with_alpha("#ffffff", 0.5), "rgba(255, 255, 255, 0.5)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod parse;
pub mod scale;
pub mod space;

// Re-export commonly used types
pub use parse::{is_valid_css_color, parse_css_color, ColorParseError};
pub use scale::{
    derive_dark_tuple, generate_color_scale, with_alpha, ColorScheme, ColorTuple, SCALE_LEN,
};
pub use space::{Hsl, Lab, Rgba};
