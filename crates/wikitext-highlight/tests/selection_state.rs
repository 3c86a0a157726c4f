use wikitext_core::HeadingLevel;
use wikitext_highlight::{EditingSession, EditorConfig};

fn session(text: &str) -> EditingSession {
    EditingSession::new(text, EditorConfig::default()).unwrap()
}

#[test]
fn test_partial_coverage_reports_off() {
    let session = session("'''bold''' plain");
    assert!(session.selection_state(3..7).is_bold);
    assert!(session.selection_state(4..6).is_bold);
    assert!(!session.selection_state(0..16).is_bold);
    assert!(!session.selection_state(3..12).is_bold);
}

#[test]
fn test_caret_after_closing_delimiter() {
    let session = session("a '''b''' c");
    assert!(session.selection_state(6..6).is_bold);
    assert!(!session.selection_state(9..9).is_bold);
    assert!(!session.selection_state(2..2).is_bold);
}

#[test]
fn test_bold_italic_sets_both_flags() {
    let session = session("'''''x''''' y");
    let state = session.selection_state(5..6);
    assert!(state.is_bold);
    assert!(state.is_italics);
    assert!(!session.selection_state(12..12).is_italics);
}

#[test]
fn test_links() {
    let session = session("[[a]] [[File:x|see [[b]]]]");
    let state = session.selection_state(2..3);
    assert!(state.is_simple_link);
    assert!(!state.is_link_with_nested_link);

    let state = session.selection_state(10..10);
    assert!(state.is_link_with_nested_link);
    assert!(!state.is_simple_link);
    assert!(session.selection_state(21..22).is_link_with_nested_link);
}

#[test]
fn test_headings_and_lists() {
    let session = session("=== Title ===\n** item");
    assert_eq!(
        session.selection_state(5..5).heading,
        Some(HeadingLevel::Level2)
    );
    assert!(session.selection_state(21..21).is_bullet_multiple);
    assert!(!session.selection_state(21..21).is_bullet_single);
}

#[test]
fn test_templates_references_and_inline_tags() {
    let session = session("{{a}} <ref>b</ref> <s>c</s> <u>d</u> <sub>e</sub> <sup>f</sup> <!--g-->");
    assert!(session.selection_state(2..2).is_horizontal_template);
    assert!(session.selection_state(11..12).is_horizontal_reference);
    assert!(session.selection_state(22..23).is_strikethrough);
    assert!(session.selection_state(31..32).is_underline);
    assert!(session.selection_state(42..43).is_subscript);
    assert!(session.selection_state(55..56).is_superscript);
    assert!(session.selection_state(67..68).is_comment);
}

#[test]
fn test_stale_range_reports_nothing() {
    let session = session("'''a'''");
    assert_eq!(session.selection_state(2..50), Default::default());
}
