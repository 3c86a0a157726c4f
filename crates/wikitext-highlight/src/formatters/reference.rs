use std::ops::Range;

use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

const GREEN: Tag = Tag::Color(ColorFamily::Green);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefToken {
    Open,
    SelfClosing,
    Close,
}

/// Classifies `<ref>` footnotes.
///
/// An opening tag pairs with the next `</ref>` on the same line; the pair gets green delimiters
/// and `Reference` content. Self-closing `<ref .../>` tags and unpaired openers or closers are
/// colored but carry no content tag.
#[derive(Debug, Clone)]
pub struct ReferenceFormatter {
    token: Regex,
}

impl ReferenceFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            token: compile(
                FormatterKind::Reference,
                r"(?i)<ref(?:\s[^>\r\n]*)?\s*/?>|</ref>",
            )?,
        })
    }

    fn tokens(&self, line: &str, offset: usize) -> Vec<(RefToken, Range<usize>)> {
        self.token
            .find_iter(line)
            .map(|m| {
                let s = m.as_str();
                let token = if s.starts_with("</") {
                    RefToken::Close
                } else if s.ends_with("/>") {
                    RefToken::SelfClosing
                } else {
                    RefToken::Open
                };
                (token, offset + m.start()..offset + m.end())
            })
            .collect()
    }
}

impl Formatter for ReferenceFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Reference
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Reference]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let mut sink = SpanSink::new(text, origin);
        let mut line_start = 0;

        for line in text.split_inclusive('\n') {
            let mut open: Option<Range<usize>> = None;
            for (token, range) in self.tokens(line, line_start) {
                match token {
                    RefToken::SelfClosing => sink.push(range, GREEN),
                    RefToken::Open => {
                        if let Some(stray) = open.replace(range) {
                            sink.push(stray, GREEN);
                        }
                    }
                    RefToken::Close => {
                        if let Some(opening) = open.take() {
                            sink.push(opening.start..opening.end, GREEN);
                            sink.push(opening.end..range.start, Tag::Reference);
                        }
                        sink.push(range, GREEN);
                    }
                }
            }
            if let Some(stray) = open {
                sink.push(stray, GREEN);
            }
            line_start += line.len();
        }

        sink.finish()
    }
}
