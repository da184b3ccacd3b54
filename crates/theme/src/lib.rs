//! Runtime theme system for WP Super Gallery
//!
//! Themes are authored as partial JSON documents ([`ThemeExtension`]) and
//! registered through a fixed pipeline:
//!
//! 1. [`deep_merge`] the extension onto the base defaults
//! 2. [`validate_theme`] the merged document into a [`ThemeDefinition`]
//! 3. [`resolve_colors`] into a [`ResolvedColors`] palette
//! 4. [`adapt_resolved`] into a [`StyleOverride`] for the component library
//! 5. [`generate_css_variables`] for the shadow-root style block
//!
//! [`ThemeRegistry`] runs the pipeline for every bundled theme once at
//! startup and serves the precomputed [`ThemeEntry`] values afterwards.
//!
//! # Modules
//!
//! - [`types`] - Theme data model
//! - [`merge`] - Recursive JSON merge
//! - [`validation`] - Schema validation
//! - [`resolve`] - Palette resolution
//! - [`adapter`] - Style override generation
//! - [`css`] - CSS custom properties
//! - [`registry`] - Theme registry
//! - [`bundled`] - Themes shipped with the crate
//! - [`config`] - Registry configuration
//! - [`loader`] - Theme file loading
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod bundled;
pub mod config;
pub mod css;
pub mod error;
pub mod loader;
pub mod merge;
pub mod registry;
pub mod resolve;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use adapter::{adapt_resolved, adapt_theme, PaletteTokens, StyleOverride, PRIMARY_COLOR};
pub use bundled::DEFAULT_THEME_ID;
pub use config::RegistryConfig;
pub use css::{generate_css_variables, CSS_VAR_PREFIX};
pub use error::{IssueKind, Result, ThemeError, ValidationError, ValidationIssue};
pub use loader::{load_theme_dir, load_theme_file};
pub use merge::deep_merge;
pub use registry::{build_entry, ThemeEntry, ThemeRegistry};
pub use resolve::{resolve_colors, ResolvedColors};
pub use types::{
    ColorShorthand, ComponentMap, ComponentRule, HeadingSize, HeadingSizes, Headings,
    PrimaryShade, Scale, ThemeColors, ThemeDefinition, ThemeExtension, ThemeMeta, Typography,
};
pub use validation::{is_valid_theme, validate_theme};
