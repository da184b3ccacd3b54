//! Registry configuration
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.

use crate::bundled::DEFAULT_THEME_ID;
use crate::css::DEFAULT_SELECTOR;
use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for building a [`ThemeRegistry`](crate::ThemeRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Theme returned for unknown ids; must register at startup
    #[serde(default = "default_theme_id")]
    pub default_theme_id: String,

    /// Selector the CSS variable block is scoped to
    #[serde(default = "default_css_selector")]
    pub css_selector: String,

    /// Extra directories of `*.json` extension documents, registered after
    /// the bundled themes
    #[serde(default)]
    pub theme_dirs: Vec<PathBuf>,
}

fn default_theme_id() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_css_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_theme_id: default_theme_id(),
            css_selector: default_css_selector(),
            theme_dirs: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ThemeError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents).map_err(|e| match e {
            ThemeError::Config(msg) => ThemeError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Add a theme directory
    pub fn with_theme_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.theme_dirs.push(dir.into());
        self
    }

    /// Set the default theme id
    pub fn with_default_theme(mut self, id: impl Into<String>) -> Self {
        self.default_theme_id = id.into();
        self
    }

    fn check(&self) -> Result<()> {
        if self.default_theme_id.trim().is_empty() {
            return Err(ThemeError::Config("defaultThemeId must not be empty".to_string()));
        }
        if self.css_selector.trim().is_empty() {
            return Err(ThemeError::Config("cssSelector must not be empty".to_string()));
        }
        Ok(())
    }
}
