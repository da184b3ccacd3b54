//! Theme error types
//!
//! [`ValidationError`] is the aggregate produced by schema validation: it is
//! never partial, every violated field is listed. [`ThemeError`] wraps it
//! together with the registry's own failure modes.

use std::fmt;
use thiserror::Error;

/// Why a single field failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueKind {
    /// Required field absent (or `null`)
    #[error("is required")]
    Missing,

    /// Expected a JSON object
    #[error("must be an object")]
    NotAnObject,

    /// Expected a string
    #[error("must be a string")]
    NotAString,

    /// String present but empty or whitespace
    #[error("must not be empty")]
    EmptyString,

    /// Expected a JSON array
    #[error("must be an array")]
    NotAnArray,

    /// Contains a character that would end the CSS declaration or rule block
    #[error("must not contain '{{', '}}', ';', '<' or '>': '{0}'")]
    UnsafeCssValue(String),

    /// Expected an integer
    #[error("must be an integer")]
    NotAnInteger,

    /// Not parseable as a CSS color
    #[error("is not a valid CSS color: '{0}'")]
    InvalidColor(String),

    /// Not `light` or `dark`
    #[error("must be \"light\" or \"dark\", got {0}")]
    InvalidColorScheme(String),

    /// Integer outside its allowed range
    #[error("must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Offending value
        value: i64,
        /// Inclusive minimum
        min: i64,
        /// Inclusive maximum
        max: i64,
    },

    /// Array with the wrong number of entries
    #[error("must have exactly {expected} entries, got {actual}")]
    WrongLength {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Neither a color string nor a `{ base, shades }` object
    #[error("must be a color string or an object with 'base' and 'shades'")]
    InvalidShorthand,

    /// Structurally checked but still not convertible to a definition
    #[error("is malformed: {0}")]
    Malformed(String),
}

/// One violated field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Dotted field path, e.g. `colors.primaryShade.light`
    pub path: String,
    /// What is wrong with it
    pub kind: IssueKind,
}

impl ValidationIssue {
    /// Create an issue
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Every schema violation found in one theme document
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Id of the offending theme (`<unknown>` when the id itself is invalid)
    pub theme_id: String,
    /// All violations, in document order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Whether any issue concerns `path` or one of its children
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| {
            issue.path == path
                || issue
                    .path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
        })
    }

    /// Field paths of every issue
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Theme '{}' failed validation with {} issue(s):",
            self.theme_id,
            self.issues.len()
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Errors produced by the theme pipeline and registry
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Theme document failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No theme registered under this id
    #[error("Theme not found: {0}")]
    NotFound(String),

    /// The designated default theme did not register
    #[error("Default theme '{0}' is not registered")]
    MissingDefaultTheme(String),

    /// Theme document could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme file or directory could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry configuration is malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationError {
        ValidationError {
            theme_id: "ocean".to_string(),
            issues: vec![
                ValidationIssue::new("colors.background", IssueKind::InvalidColor("zzz".into())),
                ValidationIssue::new(
                    "colors.primaryShade.light",
                    IssueKind::OutOfRange { value: 12, min: 0, max: 9 },
                ),
            ],
        }
    }

    #[test]
    fn test_validation_error_lists_every_issue() {
        let message = sample().to_string();
        assert!(message.contains("'ocean'"));
        assert!(message.contains("2 issue(s)"));
        assert!(message.contains("colors.background: is not a valid CSS color: 'zzz'"));
        assert!(message.contains("colors.primaryShade.light: must be between 0 and 9, got 12"));
    }

    #[test]
    fn test_has_issue_at_matches_children() {
        let err = sample();
        assert!(err.has_issue_at("colors"));
        assert!(err.has_issue_at("colors.primaryShade"));
        assert!(err.has_issue_at("colors.background"));
        assert!(!err.has_issue_at("colors.back"));
        assert!(!err.has_issue_at("typography"));
    }

    #[test]
    fn test_theme_error_wraps_validation_transparently() {
        let err: ThemeError = sample().into();
        assert!(err.to_string().starts_with("Theme 'ocean' failed validation"));
        assert!(matches!(err, ThemeError::Validation(_)));
    }
}
