use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

/// Classifies single-line `<!-- ... -->` comments.
#[derive(Debug, Clone)]
pub struct CommentFormatter {
    regex: Regex,
}

impl CommentFormatter {
    /// Compile the formatter's pattern.
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            regex: compile(FormatterKind::Comment, r"(<!--)(.*?)(-->)")?,
        })
    }
}

impl Formatter for CommentFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Comment
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Comment]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let gray = Tag::Color(ColorFamily::Gray);
        let mut sink = SpanSink::new(text, origin);
        for caps in self.regex.captures_iter(text) {
            let (Some(open), Some(content), Some(close)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            sink.push(open.range(), gray);
            sink.push_all(content.range(), &[gray, Tag::CommentContent]);
            sink.push(close.range(), gray);
        }
        sink.finish()
    }
}
