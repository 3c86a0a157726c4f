//! Toolbar formatting toggles.
//!
//! A toggle edits raw delimiter characters only. Tags are not touched here; the edited lines are
//! re-classified by the next pipeline pass (see [`ToggleOutcome::affected_range`]).

use std::ops::Range;

use wikitext_core::{DocumentError, TaggedText, TextDeltaEdit};

/// Markup a toolbar button can add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    /// `'''...'''`
    Bold,
    /// `''...''`
    Italic,
    /// `{{...}}`
    Template,
    /// `<ref>...</ref>`, where the opening tag may carry attributes.
    Reference,
    /// `[[...]]`
    Link,
    /// `<s>...</s>`
    Strikethrough,
    /// `<u>...</u>`
    Underline,
    /// `<sub>...</sub>`
    Subscript,
    /// `<sup>...</sup>`
    Superscript,
    /// `<!--...-->`
    Comment,
}

impl Markup {
    /// Opening and closing delimiters. A `*` in the opening delimiter matches any attributes.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Markup::Bold => ("'''", "'''"),
            Markup::Italic => ("''", "''"),
            Markup::Template => ("{{", "}}"),
            Markup::Reference => ("<ref*>", "</ref>"),
            Markup::Link => ("[[", "]]"),
            Markup::Strikethrough => ("<s>", "</s>"),
            Markup::Underline => ("<u>", "</u>"),
            Markup::Subscript => ("<sub>", "</sub>"),
            Markup::Superscript => ("<sup>", "</sup>"),
            Markup::Comment => ("<!--", "-->"),
        }
    }
}

/// Whether the button is being switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Apply the markup.
    Add,
    /// Remove the markup.
    Remove,
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Selection after the edits.
    pub selection: Range<usize>,
    /// Edits in the order they were applied.
    pub edits: Vec<TextDeltaEdit>,
}

impl ToggleOutcome {
    /// The post-edit range covering every edit, or `None` if nothing changed.
    pub fn affected_range(&self) -> Option<Range<usize>> {
        self.edits.iter().fold(None, |acc: Option<Range<usize>>, edit| {
            let inserted = edit.inserted_range();
            Some(match acc {
                None => inserted,
                Some(r) => {
                    let start = edit.map_offset(r.start).min(inserted.start);
                    let end = edit.map_offset(r.end).max(inserted.end);
                    start..end
                }
            })
        })
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn text_at<T: TaggedText + ?Sized>(doc: &T, start: usize, needle: &str) -> bool {
    doc.slice(start..start + char_len(needle))
        .is_some_and(|s| s == needle)
}

fn text_before<T: TaggedText + ?Sized>(doc: &T, end: usize, needle: &str) -> bool {
    end.checked_sub(char_len(needle))
        .is_some_and(|start| text_at(doc, start, needle))
}

/// Resolve a wildcard opening delimiter (`<ref*>`) against the text before `offset`.
///
/// Scans back on the same line for the suffix, then for the prefix before it.
fn resolve_wildcard<T: TaggedText + ?Sized>(
    doc: &T,
    offset: usize,
    pattern: &str,
) -> Option<String> {
    let (prefix, suffix) = pattern.split_once('*')?;
    let prefix: Vec<char> = prefix.chars().collect();
    let suffix: Vec<char> = suffix.chars().collect();

    let line = doc.line_range(offset..offset)?;
    let text: Vec<char> = doc.slice(line.start..offset)?.chars().collect();

    let mut closing = None;
    for pos in (0..=text.len()).rev() {
        let before = &text[..pos];
        match closing {
            None if before.ends_with(&suffix) => closing = Some(pos),
            Some(close) if before.ends_with(&prefix) => {
                let resolved = &text[pos - prefix.len()..close];
                // A second `<` means the scan crossed another tag.
                if resolved.iter().skip(1).any(|&c| c == '<') {
                    return None;
                }
                return Some(resolved.iter().collect());
            }
            _ => {}
        }
    }
    None
}

struct Toggle<'a> {
    open: String,
    insert_open: String,
    close: &'a str,
    edits: Vec<TextDeltaEdit>,
}

impl Toggle<'_> {
    fn surrounded<T: TaggedText + ?Sized>(
        doc: &T,
        range: &Range<usize>,
        before: &str,
        after: &str,
    ) -> bool {
        text_before(doc, range.start, before) && text_at(doc, range.end, after)
    }

    /// Insert `after` at the end of `range` and `before` at its start.
    fn wrap<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        range: Range<usize>,
        before: &str,
        after: &str,
    ) -> Result<Range<usize>, DocumentError> {
        self.edits.push(doc.replace(range.end..range.end, after)?);
        self.edits.push(doc.replace(range.start..range.start, before)?);
        let shift = char_len(before);
        Ok(range.start + shift..range.end + shift)
    }

    /// Delete `before` and `after` around `range`. A lone-space placeholder goes with them.
    fn unwrap<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        range: Range<usize>,
        before: &str,
        after: &str,
    ) -> Result<Range<usize>, DocumentError> {
        let before_len = char_len(before);
        let after_len = char_len(after);
        let start = range.start - before_len;

        if doc.slice(range.clone()).as_deref() == Some(" ") {
            self.edits
                .push(doc.replace(start..range.end + after_len, "")?);
            return Ok(start..start);
        }

        self.edits
            .push(doc.replace(range.end..range.end + after_len, "")?);
        self.edits.push(doc.replace(start..range.start, "")?);
        Ok(start..range.end - before_len)
    }

    /// Grow a caret to the nearest delimiters around it on the same line.
    fn expand<T: TaggedText + ?Sized>(&self, doc: &T, caret: usize) -> Option<Range<usize>> {
        let line = doc.line_range(caret..caret)?;
        let (open, close) = (self.open.as_str(), self.close);
        let distinct = open != close;

        let mut start = None;
        for pos in (line.start..=caret).rev() {
            if text_before(doc, pos, open) {
                start = Some(pos);
                break;
            }
            if distinct && text_before(doc, pos, close) {
                return None;
            }
        }
        let start = start?;

        for pos in caret..line.end {
            if text_at(doc, pos, close) {
                return Some(start..pos);
            }
            if distinct && text_at(doc, pos, open) {
                return None;
            }
        }
        None
    }

    fn run<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        selection: Range<usize>,
        markup: Markup,
        action: ToggleAction,
    ) -> Result<Range<usize>, DocumentError> {
        let open = self.open.clone();
        let insert_open = self.insert_open.clone();
        let close = self.close;
        let surrounded = Self::surrounded(doc, &selection, &open, close);

        match (selection.is_empty(), action) {
            (true, ToggleAction::Add) if surrounded => self.unwrap(doc, selection, &open, close),
            (true, ToggleAction::Add) => {
                let placeholder = format!("{insert_open} {close}");
                self.edits
                    .push(doc.replace(selection.start..selection.start, &placeholder)?);
                let start = selection.start + char_len(&insert_open);
                Ok(start..start + 1)
            }
            (true, ToggleAction::Remove) => match self.expand(doc, selection.start) {
                Some(range) if Self::surrounded(doc, &range, &open, close) => {
                    self.unwrap(doc, range, &open, close)
                }
                _ => Ok(selection),
            },
            (false, ToggleAction::Remove) if surrounded => {
                self.unwrap(doc, selection, &open, close)
            }
            (false, ToggleAction::Remove) => self.wrap(doc, selection, close, &insert_open),
            (false, ToggleAction::Add) => {
                let inside_bold_italic = markup == Markup::Italic
                    && Self::surrounded(doc, &selection, "''", "''")
                    && Self::surrounded(doc, &selection, "'''", "'''");
                if !inside_bold_italic && Self::surrounded(doc, &selection, close, &open) {
                    self.unwrap(doc, selection, close, &open)
                } else {
                    self.wrap(doc, selection, &insert_open, close)
                }
            }
        }
    }
}

/// Add or remove `markup` at `selection` by editing delimiter characters.
///
/// - Caret + add: removes surrounding markup, otherwise inserts `open + " " + close` and selects
///   the space.
/// - Caret + remove: grows the caret to the nearest delimiters on its line and removes them.
/// - Selection + remove: removes surrounding markup, otherwise splits it by inserting
///   `close ... open` around the selection.
/// - Selection + add: rejoins a split, otherwise wraps the selection.
///
/// An out-of-bounds selection is rejected before anything is changed.
pub fn toggle_formatting<T: TaggedText + ?Sized>(
    doc: &mut T,
    selection: Range<usize>,
    markup: Markup,
    action: ToggleAction,
) -> Result<ToggleOutcome, DocumentError> {
    let len = doc.len_chars();
    if selection.start > selection.end || selection.end > len {
        return Err(DocumentError::RangeOutOfBounds {
            start: selection.start,
            end: selection.end,
            len,
        });
    }

    let (open_pattern, close) = markup.delimiters();
    let insert_open = open_pattern.replace('*', "");
    let open = if open_pattern.contains('*') {
        resolve_wildcard(doc, selection.start, open_pattern).unwrap_or_else(|| insert_open.clone())
    } else {
        insert_open.clone()
    };

    let mut toggle = Toggle {
        open,
        insert_open,
        close,
        edits: Vec::new(),
    };
    let selection = toggle.run(doc, selection, markup, action)?;
    tracing::debug!(?markup, ?action, edits = toggle.edits.len(), "toggled formatting");

    Ok(ToggleOutcome {
        selection,
        edits: toggle.edits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikitext_core::StyledDocument;

    #[test]
    fn test_resolve_wildcard_with_attributes() {
        let doc = StyledDocument::new("One <ref name=\"testing\">Two</ref>");
        assert_eq!(
            resolve_wildcard(&doc, 24, "<ref*>").as_deref(),
            Some("<ref name=\"testing\">")
        );
        assert_eq!(resolve_wildcard(&doc, 3, "<ref*>"), None);
    }

    #[test]
    fn test_resolve_wildcard_rejects_crossed_tags() {
        let doc = StyledDocument::new("<ref>a</ref> b");
        assert_eq!(resolve_wildcard(&doc, 14, "<ref*>"), None);
    }

    #[test]
    fn test_affected_range_spans_every_edit() {
        let mut doc = StyledDocument::new("One Two Three");
        let outcome = toggle_formatting(&mut doc, 4..7, Markup::Link, ToggleAction::Add).unwrap();
        assert_eq!(doc.text(), "One [[Two]] Three");
        assert_eq!(outcome.affected_range(), Some(4..11));
    }

    #[test]
    fn test_out_of_bounds_selection_is_rejected() {
        let mut doc = StyledDocument::new("abc");
        assert!(toggle_formatting(&mut doc, 2..9, Markup::Bold, ToggleAction::Add).is_err());
        assert_eq!(doc.text(), "abc");
    }
}
