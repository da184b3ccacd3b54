//! Theme file loading
//!
//! Reads extension documents from a directory. A file that fails to parse is
//! skipped with a warning.

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read every `*.json` file in `dir`, sorted by file name
///
/// Files that cannot be read or parsed are logged and skipped. Failing to
/// list the directory itself is an error.
pub fn load_theme_dir(dir: impl AsRef<Path>) -> Result<Vec<Value>> {
    let dir = dir.as_ref();

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        match load_theme_file(&path) {
            Ok(doc) => documents.push(doc),
            Err(e) => tracing::warn!("Skipping theme file {}: {}", path.display(), e),
        }
    }

    tracing::debug!("Loaded {} theme document(s) from {}", documents.len(), dir.display());
    Ok(documents)
}

/// Read and parse a single theme document
pub fn load_theme_file(path: impl AsRef<Path>) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
