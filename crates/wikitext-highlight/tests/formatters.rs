use std::ops::Range;

use pretty_assertions::assert_eq;
use wikitext_core::{ColorFamily, HeadingLevel, ListDepth, StyledDocument, Tag, TaggedText};
use wikitext_highlight::FormatterPipeline;

const ORANGE: Tag = Tag::Color(ColorFamily::Orange);
const GREEN: Tag = Tag::Color(ColorFamily::Green);
const BLUE: Tag = Tag::Color(ColorFamily::Blue);
const PURPLE: Tag = Tag::Color(ColorFamily::Purple);
const GRAY: Tag = Tag::Color(ColorFamily::Gray);

fn highlighted(text: &str) -> StyledDocument {
    let mut doc = StyledDocument::new(text);
    FormatterPipeline::new()
        .unwrap()
        .highlight_all(&mut doc)
        .unwrap();
    doc
}

fn coverage(doc: &StyledDocument, tag: Tag) -> Vec<Range<usize>> {
    doc.coverage(0..doc.len_chars(), tag)
}

#[test]
fn test_bold() {
    let doc = highlighted("Testing. '''Bold'''. Testing");
    assert_eq!(coverage(&doc, Tag::Bold), vec![12..16]);
    assert_eq!(coverage(&doc, ORANGE), vec![9..12, 16..19]);
}

#[test]
fn test_italic() {
    let doc = highlighted("Testing. ''Italic''. Testing");
    assert_eq!(coverage(&doc, Tag::Italic), vec![11..17]);
    assert_eq!(coverage(&doc, ORANGE), vec![9..11, 17..19]);
}

#[test]
fn test_bold_italic_run_is_one_span() {
    let doc = highlighted("'''''x'''''");
    assert_eq!(coverage(&doc, Tag::BoldItalic), vec![5..6]);
    assert!(coverage(&doc, Tag::Bold).is_empty());
    assert!(coverage(&doc, Tag::Italic).is_empty());
}

#[test]
fn test_italic_inside_bold_becomes_bold_italic() {
    let doc = highlighted("one '''two ''three'' four ''five'' six''' seven");
    assert_eq!(coverage(&doc, Tag::Bold), vec![7..13, 18..28, 32..38]);
    assert_eq!(coverage(&doc, Tag::BoldItalic), vec![13..18, 28..32]);
    assert!(coverage(&doc, Tag::Italic).is_empty());
}

#[test]
fn test_bold_inside_italic_becomes_bold_italic() {
    let doc = highlighted("''a '''b''' c''");
    assert_eq!(coverage(&doc, Tag::Italic), vec![2..7, 8..13]);
    assert_eq!(coverage(&doc, Tag::BoldItalic), vec![7..8]);
}

#[test]
fn test_headings() {
    let doc = highlighted("== Heading ==\n====== Heading 5 ======\n======= Too deep =======");
    assert_eq!(
        coverage(&doc, Tag::Heading(HeadingLevel::Level1)),
        vec![2..11]
    );
    assert_eq!(
        coverage(&doc, Tag::Heading(HeadingLevel::Level5)),
        vec![20..31]
    );
    assert_eq!(coverage(&doc, ORANGE), vec![0..2, 11..13, 14..20, 31..37]);
}

#[test]
fn test_lists() {
    let doc = highlighted("* a\n** b\n# c\n### d");
    assert_eq!(
        coverage(&doc, Tag::BulletList(ListDepth::Single)),
        vec![1..3]
    );
    assert_eq!(
        coverage(&doc, Tag::BulletList(ListDepth::Multiple)),
        vec![6..8]
    );
    assert_eq!(
        coverage(&doc, Tag::NumberList(ListDepth::Single)),
        vec![10..12]
    );
    assert_eq!(
        coverage(&doc, Tag::NumberList(ListDepth::Multiple)),
        vec![16..18]
    );
}

#[test]
fn test_horizontal_template() {
    let doc = highlighted("Testing simple {{Currentdate}} template example.");
    assert_eq!(coverage(&doc, Tag::TemplateHorizontal), vec![15..30]);
    assert_eq!(coverage(&doc, PURPLE), vec![15..30]);
}

#[test]
fn test_horizontal_template_with_one_nested_level() {
    let doc = highlighted("a {{Cite|date={{Currentdate}}}} b");
    assert_eq!(coverage(&doc, Tag::TemplateHorizontal), vec![2..31]);
}

#[test]
fn test_vertical_template() {
    let doc = highlighted("{{Infobox\n| name = x\n}}");
    assert_eq!(
        coverage(&doc, Tag::TemplateVertical),
        vec![0..9, 10..20, 21..23]
    );
    assert!(coverage(&doc, Tag::TemplateHorizontal).is_empty());
}

#[test]
fn test_reference_pair() {
    let doc = highlighted("Testing.<ref>{{Cite}}</ref> Testing");
    assert_eq!(coverage(&doc, Tag::Reference), vec![13..21]);
    assert_eq!(coverage(&doc, GREEN), vec![8..13, 21..27]);
    assert_eq!(coverage(&doc, Tag::TemplateHorizontal), vec![13..21]);
}

#[test]
fn test_unpaired_reference_tags_are_delimiters_only() {
    let doc = highlighted("}}</ref>");
    assert_eq!(coverage(&doc, GREEN), vec![2..8]);
    assert!(coverage(&doc, Tag::Reference).is_empty());

    let doc = highlighted("Testing.<ref name=\"test\" />");
    assert_eq!(coverage(&doc, GREEN), vec![8..27]);
    assert!(coverage(&doc, Tag::Reference).is_empty());

    let doc = highlighted("Testing.<ref>");
    assert_eq!(coverage(&doc, GREEN), vec![8..13]);
}

#[test]
fn test_strikethrough() {
    let doc = highlighted("Testing. <s>Strikethrough.</s> Testing");
    assert_eq!(coverage(&doc, Tag::Strikethrough), vec![12..26]);
    assert_eq!(coverage(&doc, GREEN), vec![9..12, 26..30]);
}

#[test]
fn test_underline_subscript_superscript() {
    let doc = highlighted("<u>a</u> H<sub>2</sub>O x<sup>2</sup>");
    assert_eq!(coverage(&doc, Tag::Underline), vec![3..4]);
    assert_eq!(coverage(&doc, Tag::Subscript), vec![15..16]);
    assert_eq!(coverage(&doc, Tag::Superscript), vec![30..31]);
}

#[test]
fn test_simple_links() {
    let doc = highlighted("See [[Cat]] and [[Dog|dogs]].");
    assert_eq!(coverage(&doc, Tag::SimpleLink), vec![4..11, 16..28]);
    assert_eq!(coverage(&doc, BLUE), vec![4..11, 16..28]);
}

#[test]
fn test_nested_link_is_one_span() {
    let doc = highlighted("[[File:x.png|thumb|caption with [[Y]]]]");
    assert_eq!(coverage(&doc, Tag::LinkWithNestedLink), vec![0..39]);
    assert!(coverage(&doc, Tag::SimpleLink).is_empty());
    assert_eq!(coverage(&doc, BLUE), vec![0..39]);
}

#[test]
fn test_unbalanced_links_stay_plain() {
    let doc = highlighted("[[File:x.png|see [[Y]] and more\n]] [[");
    assert_eq!(coverage(&doc, Tag::SimpleLink), vec![17..22]);
    assert!(coverage(&doc, Tag::LinkWithNestedLink).is_empty());
}

#[test]
fn test_comment() {
    let doc = highlighted("a <!-- note --> b");
    assert_eq!(coverage(&doc, Tag::CommentContent), vec![6..12]);
    assert_eq!(coverage(&doc, GRAY), vec![2..15]);
}

#[test]
fn test_offsets_are_chars() {
    let doc = highlighted("é😀 '''b'''");
    assert_eq!(coverage(&doc, Tag::Bold), vec![6..7]);
}
