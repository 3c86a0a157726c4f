//! The formatter interface.
//!
//! A [`Formatter`] is a pure classifier: given the text of a line-aligned range and the range's
//! document offset, it returns the spans it wants on that range. It never touches the document;
//! the [`FormatterPipeline`](crate::FormatterPipeline) clears the formatter's own
//! [`families`](Formatter::families) over the range and then applies the returned spans in order,
//! so a later span overwrites an earlier one of the same family.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use wikitext_core::{CharIndex, Span, Tag, TagFamily};

use crate::error::HighlightError;

/// Identifies a formatter in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    /// Resets delimiter colors.
    Base,
    /// `{{...}}`
    Template,
    /// `''`, `'''`, `'''''`
    Emphasis,
    /// `<ref>...</ref>`
    Reference,
    /// `*` and `#` lists.
    List,
    /// `== ... ==` through `====== ... ======`
    Heading,
    /// `<s>...</s>`
    Strikethrough,
    /// `<sup>...</sup>`
    Superscript,
    /// `<sub>...</sub>`
    Subscript,
    /// `<u>...</u>`
    Underline,
    /// `[[...]]`
    Link,
    /// `<!--...-->`
    Comment,
}

/// The order formatters run in, broadest first.
pub const PIPELINE_ORDER: [FormatterKind; 12] = [
    FormatterKind::Base,
    FormatterKind::Template,
    FormatterKind::Emphasis,
    FormatterKind::Reference,
    FormatterKind::List,
    FormatterKind::Heading,
    FormatterKind::Strikethrough,
    FormatterKind::Superscript,
    FormatterKind::Subscript,
    FormatterKind::Underline,
    FormatterKind::Link,
    FormatterKind::Comment,
];

/// A stateless markup classifier.
pub trait Formatter: fmt::Debug {
    /// Which formatter this is.
    fn kind(&self) -> FormatterKind;

    /// Families cleared over the range before this formatter's spans are applied.
    fn families(&self) -> &'static [TagFamily];

    /// Classify `text`, whose first character sits at document offset `origin`.
    ///
    /// `text` always starts at a line boundary and ends at one (or at the end of the document).
    fn classify(&self, text: &str, origin: usize) -> Vec<Span>;
}

/// Compile a built-in, line-anchored pattern.
pub(crate) fn compile(kind: FormatterKind, pattern: &str) -> Result<Regex, HighlightError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .crlf(true)
        .build()
        .map_err(|source| HighlightError::Pattern { kind, source })
}

/// Collects spans from byte ranges of one classified slice.
pub(crate) struct SpanSink {
    index: CharIndex,
    origin: usize,
    spans: Vec<Span>,
}

impl SpanSink {
    pub(crate) fn new(text: &str, origin: usize) -> Self {
        Self {
            index: CharIndex::new(text),
            origin,
            spans: Vec::new(),
        }
    }

    /// Tag a byte range of the slice. Empty ranges are skipped.
    pub(crate) fn push(&mut self, bytes: Range<usize>, tag: Tag) {
        if bytes.start >= bytes.end {
            return;
        }
        let chars = self.index.char_range(bytes);
        self.spans.push(Span::new(
            self.origin + chars.start,
            self.origin + chars.end,
            tag,
        ));
    }

    /// Tag a byte range with several tags.
    pub(crate) fn push_all(&mut self, bytes: Range<usize>, tags: &[Tag]) {
        for &tag in tags {
            self.push(bytes.clone(), tag);
        }
    }

    pub(crate) fn finish(self) -> Vec<Span> {
        self.spans
    }
}

/// Returns `true` if two byte ranges share at least one byte.
pub(crate) fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
