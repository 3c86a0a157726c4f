//! Internal links.
//!
//! `[[Target]]` and `[[Target|label]]` are matched by one pattern. A link whose label embeds
//! another link (`[[File:x.png|thumb|see [[Y]]]]`) cannot be, so candidate openings are located
//! with a pre-filter and each is resolved by a single forward bracket scan that stops at the end
//! of the line.

use std::ops::Range;

use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

const BLUE: Tag = Tag::Color(ColorFamily::Blue);

/// Classifies simple and nested `[[...]]` links.
#[derive(Debug, Clone)]
pub struct LinkFormatter {
    simple: Regex,
    nested_seed: Regex,
}

impl LinkFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        let kind = FormatterKind::Link;
        Ok(Self {
            simple: compile(kind, r"(\[{2})([^\[\]\r\n]*)(\]{2})")?,
            nested_seed: compile(kind, r"\[{2}[^\[\]\r\n]*\[{2}")?,
        })
    }

    /// Scan forward from `seed` and return the outermost balanced span, if it nests.
    ///
    /// The scan gives up on a closing marker with nothing open and at a newline.
    fn scan_nested(bytes: &[u8], seed: usize) -> Option<Range<usize>> {
        let mut stack: Vec<usize> = Vec::new();
        let mut max_depth = 0;
        let mut i = seed;

        while i + 1 < bytes.len() {
            match (bytes[i], bytes[i + 1]) {
                (b'\n', _) => return None,
                (b'[', b'[') => {
                    stack.push(i);
                    max_depth = max_depth.max(stack.len());
                    i += 2;
                }
                (b']', b']') => {
                    let start = stack.pop()?;
                    if stack.is_empty() {
                        return (max_depth >= 2).then_some(start..i + 2);
                    }
                    i += 2;
                }
                _ => i += 1,
            }
        }

        None
    }

    fn nested_spans(&self, text: &str) -> Vec<Range<usize>> {
        let bytes = text.as_bytes();
        let mut spans: Vec<Range<usize>> = Vec::new();
        for seed in self.nested_seed.find_iter(text) {
            if let Some(span) = Self::scan_nested(bytes, seed.start())
                && !spans.contains(&span)
            {
                spans.push(span);
            }
        }
        spans
    }
}

impl Formatter for LinkFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Link
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Link]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let mut sink = SpanSink::new(text, origin);

        for m in self.simple.find_iter(text) {
            sink.push_all(m.range(), &[BLUE, Tag::SimpleLink]);
        }
        // Applied after simple links so the outer span overwrites any inner `SimpleLink`.
        let nested = self.nested_spans(text);
        for range in &nested {
            sink.push_all(range.clone(), &[BLUE, Tag::LinkWithNestedLink]);
        }

        let spans = sink.finish();
        tracing::trace!(nested = nested.len(), spans = spans.len(), "links classified");
        spans
    }
}
