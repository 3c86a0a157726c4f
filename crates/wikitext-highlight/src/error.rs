//! Highlighting errors.

use thiserror::Error;
use wikitext_core::{DocumentError, ThemeError};

use crate::formatter::FormatterKind;

#[derive(Debug, Error)]
/// Errors produced by the highlighting layer.
pub enum HighlightError {
    #[error("pattern for {kind:?} formatter failed to compile: {source}")]
    /// A built-in formatter pattern failed to compile.
    Pattern {
        /// The formatter that owns the pattern.
        kind: FormatterKind,
        /// The compiler error.
        source: regex::Error,
    },

    #[error(transparent)]
    /// A document write was rejected.
    Document(#[from] DocumentError),

    #[error(transparent)]
    /// Theme or font configuration was invalid.
    Theme(#[from] ThemeError),

    #[error("YAML parse error: {0}")]
    /// Editor configuration YAML could not be parsed.
    Yaml(#[from] serde_yaml::Error),
}
