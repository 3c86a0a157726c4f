use wikitext_core::{Span, TagFamily};

use crate::formatter::{Formatter, FormatterKind};

/// Resets every delimiter color over the range.
///
/// It owns the color families but emits nothing; the formatters after it re-add the colors
/// their markup still needs.
#[derive(Debug, Clone, Default)]
pub struct BaseFormatter;

impl Formatter for BaseFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Base
    }

    fn families(&self) -> &'static [TagFamily] {
        &TagFamily::COLORS
    }

    fn classify(&self, _text: &str, _origin: usize) -> Vec<Span> {
        Vec::new()
    }
}
