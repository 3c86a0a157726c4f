//! Structured text change records.
//!
//! Every successful [`StyledDocument::replace`](crate::StyledDocument::replace) returns a
//! [`TextDeltaEdit`]. Consumers (the formatter pipeline, the find engine, toolbar helpers) use it
//! to find the range that needs re-classification without diffing old/new text.

use std::ops::Range;

/// A single text edit expressed in character offsets.
///
/// `start` is a character offset in the document **at the time this edit is applied**; the
/// deleted range is defined by the length (in `char`s) of `deleted_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// The inserted text's range in the post-edit document.
    pub fn inserted_range(&self) -> Range<usize> {
        self.start..self.start + self.inserted_len()
    }

    /// Signed change in document length.
    pub fn len_delta(&self) -> isize {
        self.inserted_len() as isize - self.deleted_len() as isize
    }

    /// Map a pre-edit offset to the post-edit document.
    ///
    /// Offsets inside the deleted range collapse to the end of the inserted text.
    pub fn map_offset(&self, offset: usize) -> usize {
        if offset < self.start {
            offset
        } else if offset >= self.end() {
            offset.saturating_add_signed(self.len_delta())
        } else {
            self.start + self.inserted_len()
        }
    }

    /// Returns `true` if this edit changes nothing.
    pub fn is_noop(&self) -> bool {
        self.deleted_text == self.inserted_text
    }
}
