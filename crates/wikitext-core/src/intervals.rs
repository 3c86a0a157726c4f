//! Tagged span storage.
//!
//! [`SpanTree`] keeps every [`Span`] of a document in one sorted vector with a prefix-max-end
//! table, so point and range queries only scan the spans that can possibly overlap.
//!
//! The store is kept in a canonical form: two spans carrying the same tag never overlap or touch.
//! Inserting a span merges it with its same-tag neighbours, and removing a tag from a range
//! splits any span that straddles the range boundary. As a result, clearing a range and
//! re-adding the same spans yields an identical store.

use std::ops::Range;

use crate::tags::Tag;

/// A tag attached to the half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start character offset.
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// The tag.
    pub tag: Tag,
}

impl Span {
    /// Create a span over `[start, end)`.
    pub fn new(start: usize, end: usize, tag: Tag) -> Self {
        Self { start, end, tag }
    }

    /// Create a span from a character range.
    pub fn from_range(range: Range<usize>, tag: Tag) -> Self {
        Self::new(range.start, range.end, tag)
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The span's character range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if span contains a specific position
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if two spans overlap
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same span moved by `delta` characters towards the end of the document.
    pub fn shifted(&self, delta: isize) -> Span {
        Span::new(
            self.start.saturating_add_signed(delta),
            self.end.saturating_add_signed(delta),
            self.tag,
        )
    }

    fn order_key(&self) -> (usize, usize, Tag) {
        (self.start, self.end, self.tag)
    }
}

/// Sorted span store.
///
/// Query complexity: O(log n + k), where k is the number of overlapping spans.
/// Insertion complexity: O(n) (requires maintaining sort order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanTree {
    /// Spans sorted by `(start, end, tag)`.
    spans: Vec<Span>,
    /// `prefix_max_end[i] = max(spans[0..=i].end)`
    prefix_max_end: Vec<usize>,
}

impl SpanTree {
    /// Create an empty span tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from arbitrary spans, merging same-tag overlaps.
    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        let mut tree = Self {
            spans: spans.into_iter().collect(),
            prefix_max_end: Vec::new(),
        };
        tree.normalize();
        tree
    }

    fn rebuild_prefix_max_end_from(&mut self, start_idx: usize) {
        if self.spans.is_empty() {
            self.prefix_max_end.clear();
            return;
        }

        if self.prefix_max_end.len() != self.spans.len() {
            self.prefix_max_end.resize(self.spans.len(), 0);
        }

        let mut max_end = if start_idx == 0 {
            0
        } else {
            self.prefix_max_end[start_idx - 1]
        };

        for (idx, span) in self.spans.iter().enumerate().skip(start_idx) {
            max_end = max_end.max(span.end);
            self.prefix_max_end[idx] = max_end;
        }
    }

    /// Indices of spans with `span.start <= end && span.end >= start` (touching counts).
    fn touching_indices(&self, start: usize, end: usize) -> Vec<usize> {
        if self.spans.is_empty() {
            return Vec::new();
        }

        let search_end = self.spans.partition_point(|s| s.start <= end);
        let mut scan_start = self.spans.partition_point(|s| s.start < start).min(search_end);
        while scan_start > 0 && self.prefix_max_end[scan_start - 1] >= start {
            scan_start -= 1;
        }

        (scan_start..search_end)
            .filter(|&idx| self.spans[idx].end >= start)
            .collect()
    }

    fn insert_sorted(&mut self, span: Span) -> usize {
        let pos = self
            .spans
            .partition_point(|s| s.order_key() < span.order_key());
        self.spans.insert(pos, span);
        self.prefix_max_end.insert(pos, 0);
        pos
    }

    /// Insert a span, merging it with overlapping or adjacent spans of the same tag.
    ///
    /// Empty spans are ignored.
    pub fn insert(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }

        let mut merged = span;
        let same_tag: Vec<usize> = self
            .touching_indices(span.start, span.end)
            .into_iter()
            .filter(|&idx| self.spans[idx].tag == span.tag)
            .collect();

        let mut first_dirty = usize::MAX;
        for idx in same_tag.into_iter().rev() {
            let existing = self.spans.remove(idx);
            self.prefix_max_end.remove(idx);
            merged.start = merged.start.min(existing.start);
            merged.end = merged.end.max(existing.end);
            first_dirty = first_dirty.min(idx);
        }

        let pos = self.insert_sorted(merged);
        self.rebuild_prefix_max_end_from(first_dirty.min(pos));
    }

    /// Remove every tag matching `predicate` from `[start, end)`.
    ///
    /// Spans that straddle the boundary are split; the parts outside the range survive.
    /// Returns the number of spans touched.
    pub fn remove_where(
        &mut self,
        start: usize,
        end: usize,
        predicate: impl Fn(Tag) -> bool,
    ) -> usize {
        if start >= end {
            return 0;
        }

        let hits: Vec<usize> = self
            .touching_indices(start, end)
            .into_iter()
            .filter(|&idx| {
                let span = &self.spans[idx];
                span.start < end && span.end > start && predicate(span.tag)
            })
            .collect();

        if hits.is_empty() {
            return 0;
        }

        let mut remainders = Vec::new();
        for &idx in hits.iter().rev() {
            let span = self.spans.remove(idx);
            self.prefix_max_end.remove(idx);
            if span.start < start {
                remainders.push(Span::new(span.start, start, span.tag));
            }
            if span.end > end {
                remainders.push(Span::new(end, span.end, span.tag));
            }
        }

        let mut first_dirty = hits[0];
        for span in remainders {
            first_dirty = first_dirty.min(self.insert_sorted(span));
        }
        self.rebuild_prefix_max_end_from(first_dirty.min(self.spans.len()));
        hits.len()
    }

    /// Remove every span whose tag matches `predicate`, regardless of position.
    pub fn retain_tags(&mut self, keep: impl Fn(Tag) -> bool) {
        self.spans.retain(|s| keep(s.tag));
        self.prefix_max_end.truncate(self.spans.len());
        self.rebuild_prefix_max_end_from(0);
    }

    /// Query all spans containing a specific position
    pub fn query_point(&self, pos: usize) -> Vec<&Span> {
        if self.spans.is_empty() {
            return Vec::new();
        }

        let mut result = Vec::new();

        // All spans with start <= pos are before idx.
        let idx = self.spans.partition_point(|s| s.start <= pos);
        for i in (0..idx).rev() {
            // If maximum end of `spans[0..=i]` is <= pos, earlier spans cannot contain pos.
            if self.prefix_max_end[i] <= pos {
                break;
            }

            let span = &self.spans[i];
            if span.contains(pos) {
                result.push(span);
            }
        }

        result.reverse();
        result
    }

    /// Query all spans overlapping with specified range
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&Span> {
        if self.spans.is_empty() || start >= end {
            return Vec::new();
        }

        let search_end = self.spans.partition_point(|s| s.start < end);
        if search_end == 0 {
            return Vec::new();
        }

        // Expand backward until `prefix_max_end` indicates earlier spans cannot cross start.
        let mut scan_start = self.spans.partition_point(|s| s.start < start).min(search_end);
        while scan_start > 0 && self.prefix_max_end[scan_start - 1] > start {
            scan_start -= 1;
        }

        self.spans[scan_start..search_end]
            .iter()
            .filter(|s| s.start < end && s.end > start)
            .collect()
    }

    /// The parts of `[start, end)` covered by `tag`, as sorted disjoint ranges.
    pub fn coverage(&self, start: usize, end: usize, tag: Tag) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = self
            .query_range(start, end)
            .into_iter()
            .filter(|s| s.tag == tag)
            .map(|s| s.start.max(start)..s.end.min(end))
            .collect();
        ranges.sort_by_key(|r| r.start);
        ranges
    }

    /// Iterate spans in `(start, end, tag)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Clear all spans
    pub fn clear(&mut self) {
        self.spans.clear();
        self.prefix_max_end.clear();
    }

    /// Get number of spans
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Update offsets when `delta` characters are inserted at `pos`.
    ///
    /// Spans starting at or after `pos` move; spans strictly containing `pos` grow.
    pub fn update_for_insertion(&mut self, pos: usize, delta: usize) {
        if delta == 0 {
            return;
        }
        for span in &mut self.spans {
            if span.start >= pos {
                span.start += delta;
                span.end += delta;
            } else if span.end > pos {
                span.end += delta;
            }
        }
        self.normalize();
    }

    /// Update offsets when `[start, end)` is deleted.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let delta = end - start;

        for span in &mut self.spans {
            if span.end <= start {
                continue;
            } else if span.start >= end {
                span.start -= delta;
                span.end -= delta;
            } else if span.start >= start && span.end <= end {
                // Fully deleted; dropped by `normalize`.
                span.end = span.start;
            } else if span.start < start && span.end > end {
                span.end -= delta;
            } else if span.start < start {
                span.end = start;
            } else {
                span.start = start;
                span.end -= delta;
            }
        }

        self.normalize();
    }

    /// Drop empty spans, merge same-tag overlaps and restore sort order.
    fn normalize(&mut self) {
        self.spans.retain(|s| !s.is_empty());
        self.spans.sort_by_key(|s| (s.tag, s.start, s.end));

        let mut merged: Vec<Span> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            match merged.last_mut() {
                Some(last) if last.tag == span.tag && span.start <= last.end => {
                    last.end = last.end.max(span.end);
                }
                _ => merged.push(span),
            }
        }

        merged.sort_by_key(Span::order_key);
        self.spans = merged;
        self.prefix_max_end.clear();
        self.rebuild_prefix_max_end_from(0);
    }
}
