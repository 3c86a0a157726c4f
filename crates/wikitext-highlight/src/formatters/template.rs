use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

const PURPLE: Tag = Tag::Color(ColorFamily::Purple);

/// Classifies `{{...}}` templates.
///
/// Single-line templates may nest one level (`{{a|{{b}}}}`). Multi-line templates are
/// recognised line by line: an opening line ending in `{{...`, parameter lines starting with
/// `|`, and a closing line starting with `...}}`.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    horizontal: Regex,
    vertical: [Regex; 3],
}

impl TemplateFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        let kind = FormatterKind::Template;
        Ok(Self {
            horizontal: compile(
                kind,
                r"\{\{[^{}\r\n]*(?:\{\{[^{}\r\n]*\}\}[^{}\r\n]*)*\}\}",
            )?,
            vertical: [
                compile(kind, r"\{\{[^{}\r\n]*$")?,
                compile(kind, r"^[ \t]*\|.*$")?,
                compile(kind, r"^[^{}\r\n]*\}\}")?,
            ],
        })
    }
}

impl Formatter for TemplateFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Template
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Template]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let mut sink = SpanSink::new(text, origin);

        // Horizontal spans come last so they win where both forms match.
        for regex in &self.vertical {
            for m in regex.find_iter(text) {
                sink.push_all(m.range(), &[PURPLE, Tag::TemplateVertical]);
            }
        }
        for m in self.horizontal.find_iter(text) {
            sink.push_all(m.range(), &[PURPLE, Tag::TemplateHorizontal]);
        }

        sink.finish()
    }
}
