//! Toolbar selection state.
//!
//! [`selection_state`] answers "is this markup active here" for a caret or a selection.
//!
//! - A caret is inside a markup when the content tag covers the caret offset. Carets that sit
//!   against a closing delimiter (or at the end of a list line) also look one character back.
//! - A selection is inside a markup only when the markup covers every selected character.
//!   Mixed formatting reports `false`.

use std::ops::Range;

use crate::document::TaggedText;
use crate::tags::{ColorFamily, HeadingLevel, ListDepth, Tag};

/// Markup flags for a caret or selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Bold or bold-italic.
    pub is_bold: bool,
    /// Italic or bold-italic.
    pub is_italics: bool,
    /// Single-line template.
    pub is_horizontal_template: bool,
    /// Line of a multi-line template.
    pub is_vertical_template: bool,
    /// Reference content.
    pub is_horizontal_reference: bool,
    /// `*` list.
    pub is_bullet_single: bool,
    /// `**` list.
    pub is_bullet_multiple: bool,
    /// `#` list.
    pub is_number_single: bool,
    /// `##` list.
    pub is_number_multiple: bool,
    /// Heading level, if the range is inside one heading.
    pub heading: Option<HeadingLevel>,
    /// `<s>` content.
    pub is_strikethrough: bool,
    /// `<u>` content.
    pub is_underline: bool,
    /// `<sub>` content.
    pub is_subscript: bool,
    /// `<sup>` content.
    pub is_superscript: bool,
    /// Simple link.
    pub is_simple_link: bool,
    /// Link containing a nested link.
    pub is_link_with_nested_link: bool,
    /// Comment content.
    pub is_comment: bool,
}

impl SelectionState {
    /// Returns `true` if the range is inside a heading of any level.
    pub fn is_heading(&self) -> bool {
        self.heading.is_some()
    }
}

/// How a caret probe treats the character before the caret.
#[derive(Debug, Clone, Copy)]
enum CaretEdge {
    /// When the caret offset carries this delimiter color, also check the previous offset.
    AgainstDelimiter(ColorFamily),
    /// Always also check the previous offset.
    EndOfLine,
    /// The previous offset must carry the tag too (caret before an opening delimiter is outside).
    WithinSpan,
}

struct Probe<'a> {
    tags: &'a [Tag],
    edge: CaretEdge,
}

impl Probe<'_> {
    fn matches(&self, tags: &[Tag]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }

    fn eval<T: TaggedText + ?Sized>(&self, doc: &T, range: &Range<usize>) -> bool {
        if range.is_empty() {
            self.eval_caret(doc, range.start)
        } else {
            self.eval_selection(doc, range)
        }
    }

    fn eval_caret<T: TaggedText + ?Sized>(&self, doc: &T, offset: usize) -> bool {
        let here = doc.tags_at(offset);
        let previous = || {
            offset
                .checked_sub(1)
                .map(|prev| doc.tags_at(prev))
                .unwrap_or_default()
        };

        match self.edge {
            CaretEdge::AgainstDelimiter(color) => {
                if self.matches(&here) {
                    return true;
                }
                offset > 0 && here.contains(&Tag::Color(color)) && self.matches(&previous())
            }
            CaretEdge::EndOfLine => self.matches(&here) || self.matches(&previous()),
            CaretEdge::WithinSpan => {
                self.matches(&here) && (offset == 0 || self.matches(&previous()))
            }
        }
    }

    fn eval_selection<T: TaggedText + ?Sized>(&self, doc: &T, range: &Range<usize>) -> bool {
        let mut covered: Vec<Range<usize>> = doc
            .spans_in(range.clone())
            .into_iter()
            .filter(|span| self.tags.contains(&span.tag))
            .map(|span| span.range())
            .collect();
        covered.sort_by_key(|r| r.start);

        let mut reach = range.start;
        for r in covered {
            if r.start > reach {
                return false;
            }
            reach = reach.max(r.end);
        }
        reach >= range.end
    }
}

const BOLD: Probe<'static> = Probe {
    tags: &[Tag::Bold, Tag::BoldItalic],
    edge: CaretEdge::AgainstDelimiter(ColorFamily::Orange),
};
const ITALICS: Probe<'static> = Probe {
    tags: &[Tag::Italic, Tag::BoldItalic],
    edge: CaretEdge::AgainstDelimiter(ColorFamily::Orange),
};

fn green(tag: &'static [Tag]) -> Probe<'static> {
    Probe {
        tags: tag,
        edge: CaretEdge::AgainstDelimiter(ColorFamily::Green),
    }
}

fn list(tag: &'static [Tag]) -> Probe<'static> {
    Probe {
        tags: tag,
        edge: CaretEdge::EndOfLine,
    }
}

fn within(tag: &'static [Tag]) -> Probe<'static> {
    Probe {
        tags: tag,
        edge: CaretEdge::WithinSpan,
    }
}

/// Compute the toolbar flags for `range`. Out-of-bounds ranges report every flag off.
pub fn selection_state<T: TaggedText + ?Sized>(doc: &T, range: Range<usize>) -> SelectionState {
    if range.start > range.end || range.end > doc.len_chars() {
        tracing::debug!(?range, "selection state requested for out-of-bounds range");
        return SelectionState::default();
    }

    let heading = HeadingLevel::ALL.into_iter().find(|&level| {
        Probe {
            tags: &[Tag::Heading(level)],
            edge: CaretEdge::AgainstDelimiter(ColorFamily::Orange),
        }
        .eval(doc, &range)
    });

    SelectionState {
        is_bold: BOLD.eval(doc, &range),
        is_italics: ITALICS.eval(doc, &range),
        is_horizontal_template: within(&[Tag::TemplateHorizontal]).eval(doc, &range),
        is_vertical_template: within(&[Tag::TemplateVertical]).eval(doc, &range),
        is_horizontal_reference: green(&[Tag::Reference]).eval(doc, &range),
        is_bullet_single: list(&[Tag::BulletList(ListDepth::Single)]).eval(doc, &range),
        is_bullet_multiple: list(&[Tag::BulletList(ListDepth::Multiple)]).eval(doc, &range),
        is_number_single: list(&[Tag::NumberList(ListDepth::Single)]).eval(doc, &range),
        is_number_multiple: list(&[Tag::NumberList(ListDepth::Multiple)]).eval(doc, &range),
        heading,
        is_strikethrough: green(&[Tag::Strikethrough]).eval(doc, &range),
        is_underline: green(&[Tag::Underline]).eval(doc, &range),
        is_subscript: green(&[Tag::Subscript]).eval(doc, &range),
        is_superscript: green(&[Tag::Superscript]).eval(doc, &range),
        is_simple_link: within(&[Tag::SimpleLink]).eval(doc, &range),
        is_link_with_nested_link: within(&[Tag::LinkWithNestedLink]).eval(doc, &range),
        is_comment: Probe {
            tags: &[Tag::CommentContent],
            edge: CaretEdge::AgainstDelimiter(ColorFamily::Gray),
        }
        .eval(doc, &range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyledDocument;

    const ORANGE: Tag = Tag::Color(ColorFamily::Orange);

    fn bold_doc() -> StyledDocument {
        // "a '''bold''' c"
        let mut doc = StyledDocument::new("a '''bold''' c");
        doc.add_tag(2..5, ORANGE).unwrap();
        doc.add_tag(5..9, Tag::Bold).unwrap();
        doc.add_tag(9..12, ORANGE).unwrap();
        doc
    }

    #[test]
    fn test_caret_inside_and_against_closing_delimiter() {
        let doc = bold_doc();
        assert!(selection_state(&doc, 6..6).is_bold);
        assert!(selection_state(&doc, 9..9).is_bold);
        assert!(!selection_state(&doc, 12..12).is_bold);
        assert!(!selection_state(&doc, 0..0).is_bold);
    }

    #[test]
    fn test_selection_requires_full_coverage() {
        let doc = bold_doc();
        assert!(selection_state(&doc, 5..9).is_bold);
        assert!(selection_state(&doc, 6..8).is_bold);
        assert!(!selection_state(&doc, 5..10).is_bold);
        assert!(!selection_state(&doc, 0..14).is_bold);
    }

    #[test]
    fn test_bold_italic_counts_for_both() {
        let mut doc = StyledDocument::new("xyz");
        doc.add_tag(0..3, Tag::BoldItalic).unwrap();
        let state = selection_state(&doc, 0..3);
        assert!(state.is_bold);
        assert!(state.is_italics);
    }

    #[test]
    fn test_list_caret_at_end_of_line() {
        let mut doc = StyledDocument::new("* item\nnext");
        doc.add_tag(0..1, ORANGE).unwrap();
        doc.add_tag(1..6, Tag::BulletList(ListDepth::Single)).unwrap();
        assert!(selection_state(&doc, 6..6).is_bullet_single);
        assert!(!selection_state(&doc, 8..8).is_bullet_single);
    }

    #[test]
    fn test_link_caret_before_opening_is_outside() {
        let mut doc = StyledDocument::new("a [[b]]");
        doc.add_tag(2..7, Tag::SimpleLink).unwrap();
        assert!(!selection_state(&doc, 2..2).is_simple_link);
        assert!(selection_state(&doc, 4..4).is_simple_link);
        assert!(!selection_state(&doc, 7..7).is_simple_link);
    }

    #[test]
    fn test_heading_level() {
        let mut doc = StyledDocument::new("=== Title ===");
        doc.add_tag(3..10, Tag::Heading(HeadingLevel::Level2)).unwrap();
        let state = selection_state(&doc, 5..5);
        assert_eq!(state.heading, Some(HeadingLevel::Level2));
        assert!(state.is_heading());
    }

    #[test]
    fn test_out_of_bounds_reports_nothing() {
        let doc = bold_doc();
        assert_eq!(selection_state(&doc, 6..99), SelectionState::default());
    }
}
