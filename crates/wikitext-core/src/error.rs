//! Error types for document writes, search compilation and theme loading.

use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by document write paths.
pub enum DocumentError {
    #[error("range {start}..{end} is outside the document (length {len})")]
    /// A range argument does not fit the current document.
    RangeOutOfBounds {
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
        /// Document length in characters.
        len: usize,
    },
}

impl DocumentError {
    pub(crate) fn out_of_bounds(range: &Range<usize>, len: usize) -> Self {
        Self::RangeOutOfBounds {
            start: range.start,
            end: range.end,
            len,
        }
    }
}

#[derive(Debug, Error)]
/// Errors produced while compiling user search text.
pub enum SearchError {
    #[error("invalid search pattern '{query}': {source}")]
    /// The search text is not a valid regex.
    InvalidPattern {
        /// The search text as typed.
        query: String,
        /// The compiler error.
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
/// Errors produced while loading a theme.
pub enum ThemeError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    /// A color string could not be parsed.
    InvalidColor(String),

    #[error("invalid text size {0}: must be a positive, finite number")]
    /// A base text size was zero, negative or not finite.
    InvalidTextSize(f32),
}
