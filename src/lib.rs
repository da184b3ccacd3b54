//! WP Super Gallery runtime theme system
//!
//! Facade over the workspace crates:
//!
//! - [`color`] - CSS color parsing, color spaces and shade generation
//! - [`theme`] - Theme schema, validation, adaptation, CSS variables and the
//!   theme registry
//!
//! # Example
//!
//! ```rust
//! use wpsg::{RegistryConfig, ThemeRegistry};
//!
//! let registry = ThemeRegistry::new(RegistryConfig::default()).unwrap();
//! let entry = registry.get_theme("solarized-light");
//!
//! assert_eq!(entry.style_override.primary_color, "primary");
//! assert!(entry.css_vars.contains("--wpsg-color-scheme: light;"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use color;
pub use theme;

pub use color::{
    derive_dark_tuple, generate_color_scale, parse_css_color, with_alpha, ColorScheme, ColorTuple,
};
pub use theme::{
    adapt_theme, deep_merge, generate_css_variables, is_valid_theme, resolve_colors,
    validate_theme, RegistryConfig, ResolvedColors, StyleOverride, ThemeDefinition, ThemeEntry,
    ThemeError, ThemeExtension, ThemeMeta, ThemeRegistry, ValidationError,
};
