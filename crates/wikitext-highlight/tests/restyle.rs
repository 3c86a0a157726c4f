//! Appearance changes re-resolve attributes from existing tags and never re-classify.

use pretty_assertions::assert_eq;
use wikitext_core::{FontWeight, Span, TaggedText, Theme, VisualAttributes};
use wikitext_highlight::{EditingSession, EditorConfig};

const TEXT: &str = "== Cats ==\n'''Cats''' are [[mammal]]s.";

fn sorted_spans(session: &EditingSession) -> Vec<Span> {
    let mut spans: Vec<Span> = session.document().spans().copied().collect();
    spans.sort_by_key(|s| (s.start, s.end, s.tag));
    spans
}

fn attributes_at(session: &EditingSession, offset: usize) -> VisualAttributes {
    session.style_runs(offset..offset + 1)[0].attributes
}

#[test]
fn test_appearance_changes_leave_tags_untouched() {
    let mut session = EditingSession::new(TEXT, EditorConfig::default()).unwrap();
    let tags = sorted_spans(&session);
    let version = session.version();

    let light = Theme::light();
    assert_eq!(attributes_at(&session, 0).foreground, light.colors.orange);
    assert_eq!(attributes_at(&session, 14).font.weight, FontWeight::Bold);

    let dark = Theme::dark();
    session.set_theme(dark.clone());
    assert_eq!(sorted_spans(&session), tags);
    assert_eq!(attributes_at(&session, 0).foreground, dark.colors.orange);
    assert_eq!(attributes_at(&session, 22).foreground, dark.colors.text);

    session.set_text_size(20.0).unwrap();
    assert_eq!(sorted_spans(&session), tags);
    assert_eq!(attributes_at(&session, 22).font.size, 20.0);
    assert_eq!(attributes_at(&session, 14).font.size, 20.0);

    session.set_syntax_highlighting(false);
    assert_eq!(sorted_spans(&session), tags);
    let delimiter = attributes_at(&session, 0);
    assert_eq!(delimiter.foreground, dark.colors.text);
    assert_eq!(attributes_at(&session, 14).font.weight, FontWeight::Regular);

    assert_eq!(session.version(), version);
    let len = session.document().len_chars();
    assert_eq!(session.resolver().runs(), session.style_runs(0..len).as_slice());
}

#[test]
fn test_highlighting_back_on_restores_markup_colors() {
    let mut session = EditingSession::new(TEXT, EditorConfig::default()).unwrap();
    let before = session.style_runs(0..TEXT.chars().count());

    session.set_syntax_highlighting(false);
    assert_eq!(session.resolver().runs().len(), 1);

    session.set_syntax_highlighting(true);
    assert_eq!(session.style_runs(0..TEXT.chars().count()), before);
}
