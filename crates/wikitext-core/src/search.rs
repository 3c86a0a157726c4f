//! Text search helpers.
//!
//! All public inputs/outputs are **character offsets** (not byte offsets). Find sessions compile
//! the user's search text as a case-insensitive regex by default, so `a.b` also matches `axb`;
//! [`SearchOptions::literal`] switches to escaped substring search.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;

/// Options that control how search text is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, regex metacharacters in the query are escaped.
    pub literal: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            literal: false,
        }
    }
}

/// A match expressed as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The match as a character range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Char/byte offset conversion table for one `&str`.
#[derive(Debug)]
pub struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    /// Build the table for `text`.
    pub fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    /// Number of characters in the indexed text.
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    /// Byte offset of a character offset (clamped to the end of the text).
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    /// Character offset of a byte offset (clamped to the end of the text).
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }

    /// Convert a byte range into a character range.
    pub fn char_range(&self, bytes: Range<usize>) -> Range<usize> {
        self.byte_to_char(bytes.start)..self.byte_to_char(bytes.end)
    }

    /// Convert a character range into a byte range.
    pub fn byte_range(&self, chars: Range<usize>) -> Range<usize> {
        self.char_to_byte(chars.start)..self.char_to_byte(chars.end)
    }
}

/// Compile user-supplied search text.
pub fn compile_find_pattern(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.literal {
        regex::escape(query)
    } else {
        query.to_string()
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()
        .map_err(|err| SearchError::InvalidPattern {
            query: query.to_string(),
            source: err,
        })
}

/// All non-empty, non-overlapping matches of `regex` in `text`, in document order.
pub fn find_all_matches(text: &str, regex: &Regex) -> Vec<SearchMatch> {
    let index = CharIndex::new(text);
    regex
        .find_iter(text)
        .map(|m| {
            let range = index.char_range(m.range());
            SearchMatch {
                start: range.start,
                end: range.end,
            }
        })
        .filter(|m| !m.is_empty())
        .collect()
}

/// Find all occurrences of `query` in `text`.
///
/// - Returns an empty list if `query` is empty.
/// - Match ranges are character offsets and are half-open (`[start, end)`).
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let regex = compile_find_pattern(query, options)?;
    Ok(find_all_matches(text, &regex))
}
