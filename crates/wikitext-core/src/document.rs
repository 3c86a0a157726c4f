//! Styled document storage.
//!
//! [`StyledDocument`] pairs a [`Rope`] with a [`SpanTree`]. Every formatter, the find engine and
//! the selection query talk to it through the [`TaggedText`] trait, which is also implemented by
//! [`SubRangeView`], a materialized copy of one sub-range (typically a paragraph) that a
//! paragraph-based rendering backend can tag in local coordinates.
//!
//! Range arguments are validated on every entry point. Read paths return empty results for
//! out-of-bounds ranges; write paths return [`DocumentError::RangeOutOfBounds`] and leave the
//! document untouched.

use std::ops::Range;

use ropey::Rope;

use crate::delta::TextDeltaEdit;
use crate::error::DocumentError;
use crate::intervals::{Span, SpanTree};
use crate::tags::{Tag, TagFamily};

/// The minimal text + tag interface shared by every backend.
pub trait TaggedText {
    /// Length in characters.
    fn len_chars(&self) -> usize;

    /// The whole text.
    fn text(&self) -> String;

    /// Text of `range`, or `None` if the range is out of bounds.
    fn slice(&self, range: Range<usize>) -> Option<String>;

    /// Replace `range` with `text`. Tags are shifted; tags inside the deleted range are dropped.
    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<TextDeltaEdit, DocumentError>;

    /// Tag `range`, replacing any other member of the tag's family there.
    fn add_tag(&mut self, range: Range<usize>, tag: Tag) -> Result<(), DocumentError>;

    /// Remove every tag belonging to one of `families` from `range`.
    fn remove_families(
        &mut self,
        range: Range<usize>,
        families: &[TagFamily],
    ) -> Result<(), DocumentError>;

    /// Tags covering `offset`. Empty when out of bounds.
    fn tags_at(&self, offset: usize) -> Vec<Tag>;

    /// Spans overlapping `range`, clipped to it. Empty when out of bounds.
    fn spans_in(&self, range: Range<usize>) -> Vec<Span>;

    /// Returns `true` if `tag` covers `offset`.
    fn has_tag(&self, offset: usize, tag: Tag) -> bool {
        self.tags_at(offset).contains(&tag)
    }

    /// Extend `range` to the full lines touching its start and end (trailing newline included).
    fn line_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return None;
        }

        let chars: Vec<char> = self.text().chars().collect();
        let mut start = range.start;
        while start > 0 && chars[start - 1] != '\n' {
            start -= 1;
        }
        let mut end = range.end;
        while end < len && chars[end] != '\n' {
            end += 1;
        }
        if end < len {
            end += 1;
        }
        Some(start..end)
    }
}

/// Mutable text buffer with semantic tags.
#[derive(Debug, Clone, Default)]
pub struct StyledDocument {
    rope: Rope,
    spans: SpanTree,
    version: u64,
    edit_depth: usize,
    pending_changes: bool,
}

impl StyledDocument {
    /// Create an untagged document.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Incremented once per top-level edit (or once per transaction).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` between [`begin_editing`](Self::begin_editing) and the matching
    /// [`end_editing`](Self::end_editing).
    pub fn is_editing(&self) -> bool {
        self.edit_depth > 0
    }

    /// Open a transaction. Transactions nest.
    pub fn begin_editing(&mut self) {
        self.edit_depth += 1;
    }

    /// Close a transaction; the outermost close publishes a new version.
    pub fn end_editing(&mut self) {
        if self.edit_depth == 0 {
            tracing::warn!("end_editing called without a matching begin_editing");
            return;
        }
        self.edit_depth -= 1;
        if self.edit_depth == 0 && self.pending_changes {
            self.pending_changes = false;
            self.version += 1;
        }
    }

    /// Run `f` inside a transaction.
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_editing();
        let result = f(self);
        self.end_editing();
        result
    }

    fn mark_changed(&mut self) {
        if self.edit_depth == 0 {
            self.version += 1;
        } else {
            self.pending_changes = true;
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), DocumentError> {
        let len = self.rope.len_chars();
        if range.start > range.end || range.end > len {
            tracing::warn!(?range, len, "rejecting out-of-bounds range");
            return Err(DocumentError::out_of_bounds(range, len));
        }
        Ok(())
    }

    fn in_bounds(&self, range: &Range<usize>) -> bool {
        range.start <= range.end && range.end <= self.rope.len_chars()
    }

    /// Borrow the underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Character at `offset`.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    /// All spans, in `(start, end, tag)` order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Remove every tag of `families` across the whole document.
    pub fn clear_families(&mut self, families: &[TagFamily]) {
        self.spans.retain_tags(|tag| !families.contains(&tag.family()));
    }

    /// The parts of `range` covered by `tag`, as sorted disjoint ranges.
    pub fn coverage(&self, range: Range<usize>, tag: Tag) -> Vec<Range<usize>> {
        if !self.in_bounds(&range) {
            return Vec::new();
        }
        self.spans.coverage(range.start, range.end, tag)
    }

    /// The line (with trailing newline) that holds `offset`.
    pub fn paragraph_range(&self, offset: usize) -> Option<Range<usize>> {
        self.line_range(offset..offset)
    }

    /// Copy `range` (text and clipped tags) into a standalone view with local coordinates.
    pub fn materialize(&self, range: Range<usize>) -> Option<SubRangeView> {
        let text = self.slice(range.clone())?;
        let origin = range.start;
        let spans = self
            .spans_in(range)
            .into_iter()
            .map(|span| span.shifted(-(origin as isize)));

        Some(SubRangeView {
            origin,
            doc: StyledDocument {
                rope: Rope::from_str(&text),
                spans: SpanTree::from_spans(spans),
                ..StyledDocument::default()
            },
        })
    }
}

impl TaggedText for StyledDocument {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn slice(&self, range: Range<usize>) -> Option<String> {
        self.in_bounds(&range)
            .then(|| self.rope.slice(range).to_string())
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<TextDeltaEdit, DocumentError> {
        self.check_range(&range)?;

        let deleted_text = self.rope.slice(range.clone()).to_string();
        let inserted_len = text.chars().count();

        if range.start < range.end {
            self.rope.remove(range.clone());
            self.spans.update_for_deletion(range.start, range.end);
        }
        if inserted_len > 0 {
            self.rope.insert(range.start, text);
            self.spans.update_for_insertion(range.start, inserted_len);
        }

        tracing::trace!(
            start = range.start,
            deleted = range.len(),
            inserted = inserted_len,
            "document replace"
        );
        self.mark_changed();

        Ok(TextDeltaEdit {
            start: range.start,
            deleted_text,
            inserted_text: text.to_string(),
        })
    }

    fn add_tag(&mut self, range: Range<usize>, tag: Tag) -> Result<(), DocumentError> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }
        let family = tag.family();
        self.spans
            .remove_where(range.start, range.end, |t| t != tag && t.family() == family);
        self.spans.insert(Span::from_range(range, tag));
        Ok(())
    }

    fn remove_families(
        &mut self,
        range: Range<usize>,
        families: &[TagFamily],
    ) -> Result<(), DocumentError> {
        self.check_range(&range)?;
        self.spans
            .remove_where(range.start, range.end, |t| families.contains(&t.family()));
        Ok(())
    }

    fn tags_at(&self, offset: usize) -> Vec<Tag> {
        self.spans.query_point(offset).into_iter().map(|s| s.tag).collect()
    }

    fn spans_in(&self, range: Range<usize>) -> Vec<Span> {
        if !self.in_bounds(&range) {
            return Vec::new();
        }
        self.spans
            .query_range(range.start, range.end)
            .into_iter()
            .map(|s| Span::new(s.start.max(range.start), s.end.min(range.end), s.tag))
            .collect()
    }

    fn line_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        if !self.in_bounds(&range) {
            return None;
        }
        // Only `\n` ends a line. Ropey also breaks at U+2028, NEL, VT and FF, which the
        // formatters treat as ordinary characters.
        let mut start = range.start;
        let mut before = self.rope.chars_at(start);
        while let Some(c) = before.prev() {
            if c == '\n' {
                break;
            }
            start -= 1;
        }

        let mut end = range.end;
        for c in self.rope.chars_at(end) {
            end += 1;
            if c == '\n' {
                break;
            }
        }
        Some(start..end)
    }
}

/// A materialized copy of one document sub-range, tagged in local coordinates.
///
/// Local offset `0` corresponds to document offset [`origin`](Self::origin).
#[derive(Debug, Clone)]
pub struct SubRangeView {
    origin: usize,
    doc: StyledDocument,
}

impl SubRangeView {
    /// Document offset of local offset `0`.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// The document range this view was materialized from.
    pub fn global_range(&self) -> Range<usize> {
        self.origin..self.origin + self.doc.len_chars()
    }

    /// Convert a local offset to a document offset.
    pub fn to_global(&self, local: usize) -> usize {
        self.origin + local
    }

    /// Convert a document offset to a local offset, if it falls inside the view.
    pub fn to_local(&self, global: usize) -> Option<usize> {
        let range = self.global_range();
        (range.start <= global && global <= range.end).then(|| global - self.origin)
    }

    /// The part of a document range that falls inside the view, in local coordinates.
    pub fn clip_to_local(&self, global: Range<usize>) -> Option<Range<usize>> {
        let view = self.global_range();
        let start = global.start.max(view.start);
        let end = global.end.min(view.end);
        (start < end).then(|| start - self.origin..end - self.origin)
    }

    /// Every span of the view, translated to document coordinates.
    pub fn global_spans(&self) -> Vec<Span> {
        self.doc
            .spans()
            .map(|span| span.shifted(self.origin as isize))
            .collect()
    }

    /// The view's local document.
    pub fn document(&self) -> &StyledDocument {
        &self.doc
    }
}

impl TaggedText for SubRangeView {
    fn len_chars(&self) -> usize {
        self.doc.len_chars()
    }

    fn text(&self) -> String {
        self.doc.text()
    }

    fn slice(&self, range: Range<usize>) -> Option<String> {
        self.doc.slice(range)
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<TextDeltaEdit, DocumentError> {
        self.doc.replace(range, text)
    }

    fn add_tag(&mut self, range: Range<usize>, tag: Tag) -> Result<(), DocumentError> {
        self.doc.add_tag(range, tag)
    }

    fn remove_families(
        &mut self,
        range: Range<usize>,
        families: &[TagFamily],
    ) -> Result<(), DocumentError> {
        self.doc.remove_families(range, families)
    }

    fn tags_at(&self, offset: usize) -> Vec<Tag> {
        self.doc.tags_at(offset)
    }

    fn spans_in(&self, range: Range<usize>) -> Vec<Span> {
        self.doc.spans_in(range)
    }

    fn line_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        self.doc.line_range(range)
    }
}
