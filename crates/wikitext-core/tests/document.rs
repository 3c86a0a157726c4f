use std::ops::Range;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wikitext_core::{
    ColorFamily, DocumentError, HeadingLevel, StyledDocument, Tag, TagFamily, TaggedText, Theme,
    ThemeError, ThemeFonts,
};

/// Per-character tag model: `true` where `Tag::Bold` applies.
fn model_coverage(model: &[bool]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (i, &bold) in model.iter().enumerate() {
        if !bold {
            continue;
        }
        match ranges.last_mut() {
            Some(last) if last.end == i => last.end = i + 1,
            _ => ranges.push(i..i + 1),
        }
    }
    ranges
}

#[test]
fn test_random_edits_keep_tags_on_their_text() {
    let mut doc = StyledDocument::new(&"abcdefghij".repeat(20));
    let mut model = vec![false; doc.len_chars()];
    for start in (0..200).step_by(25) {
        doc.add_tag(start..start + 7, Tag::Bold).unwrap();
        model[start..start + 7].fill(true);
    }

    let mut rng = StdRng::seed_from_u64(0xd0c);
    for _ in 0..500 {
        let len = doc.len_chars();
        if rng.gen_bool(0.5) || len < 4 {
            let pos = rng.gen_range(0..=len);
            let text = match rng.gen_range(0..3) {
                0 => "x",
                1 => "你好",
                _ => "\n",
            };
            doc.replace(pos..pos, text).unwrap();

            // Text inserted strictly inside a span joins it.
            let inside = pos > 0 && pos < model.len() && model[pos - 1] && model[pos];
            let inserted = text.chars().count();
            model.splice(pos..pos, std::iter::repeat_n(inside, inserted));
        } else {
            let start = rng.gen_range(0..len - 1);
            let end = (start + rng.gen_range(1..4)).min(len);
            doc.replace(start..end, "").unwrap();
            model.drain(start..end);
        }

        assert_eq!(doc.len_chars(), model.len());
        assert_eq!(
            doc.coverage(0..doc.len_chars(), Tag::Bold),
            model_coverage(&model)
        );
    }
}

#[test]
fn test_family_overwrite_and_independent_families() {
    let mut doc = StyledDocument::new("== Title ==");
    doc.add_tag(0..11, Tag::Heading(HeadingLevel::Level1))
        .unwrap();
    doc.add_tag(0..2, Tag::Color(ColorFamily::Orange)).unwrap();
    doc.add_tag(3..8, Tag::Bold).unwrap();
    doc.add_tag(3..8, Tag::Heading(HeadingLevel::Level3))
        .unwrap();

    let mut tags = doc.tags_at(4);
    tags.sort();
    assert_eq!(tags, vec![Tag::Bold, Tag::Heading(HeadingLevel::Level3)]);
    assert!(!doc.has_tag(4, Tag::Heading(HeadingLevel::Level1)));
    assert!(doc.has_tag(1, Tag::Heading(HeadingLevel::Level1)));
    assert!(doc.has_tag(1, Tag::Color(ColorFamily::Orange)));
    assert_eq!(
        doc.coverage(0..11, Tag::Heading(HeadingLevel::Level1)),
        vec![0..3, 8..11]
    );
}

#[test]
fn test_remove_families_leaves_others() {
    let mut doc = StyledDocument::new("abcdef");
    doc.add_tag(0..6, Tag::Bold).unwrap();
    doc.add_tag(0..6, Tag::Match).unwrap();
    doc.remove_families(2..4, &[TagFamily::Emphasis]).unwrap();

    assert_eq!(doc.coverage(0..6, Tag::Bold), vec![0..2, 4..6]);
    assert_eq!(doc.coverage(0..6, Tag::Match), vec![0..6]);

    doc.clear_families(&[TagFamily::Find]);
    assert!(doc.coverage(0..6, Tag::Match).is_empty());
}

#[test]
fn test_stale_ranges_are_rejected_everywhere() {
    let mut doc = StyledDocument::new("abc");
    let version = doc.version();

    assert_eq!(
        doc.replace(1..9, "x"),
        Err(DocumentError::RangeOutOfBounds {
            start: 1,
            end: 9,
            len: 3
        })
    );
    assert!(doc.add_tag(2..4, Tag::Bold).is_err());
    assert!(doc.remove_families(0..4, &[TagFamily::Emphasis]).is_err());
    assert!(doc.spans_in(0..4).is_empty());
    assert_eq!(doc.slice(2..4), None);
    assert_eq!(doc.text(), "abc");
    assert_eq!(doc.version(), version);
}

#[test]
fn test_nested_transactions_publish_once() {
    let mut doc = StyledDocument::new("abc");
    let version = doc.version();
    doc.transaction(|doc| {
        doc.replace(0..0, "x").unwrap();
        doc.transaction(|doc| {
            doc.replace(0..0, "y").unwrap();
        });
        assert!(doc.is_editing());
        assert_eq!(doc.version(), version);
    });
    assert_eq!(doc.version(), version + 1);
    assert_eq!(doc.text(), "yxabc");
}

#[test]
fn test_materialized_view_round_trips_coordinates() {
    let mut doc = StyledDocument::new("first\nsecond '''x'''\nthird");
    doc.add_tag(16..17, Tag::Bold).unwrap();

    let range = doc.paragraph_range(10).unwrap();
    assert_eq!(range, 6..21);
    let view = doc.materialize(range).unwrap();
    assert_eq!(view.text(), "second '''x'''\n");
    assert_eq!(view.to_local(16), Some(10));
    assert_eq!(view.to_global(10), 16);
    assert_eq!(view.clip_to_local(0..8), Some(0..2));
    assert_eq!(view.clip_to_local(0..3), None);
    assert!(view.has_tag(10, Tag::Bold));
    assert_eq!(view.global_spans(), doc.spans_in(6..21));
}

#[test]
fn test_theme_yaml_round_trip() {
    let theme = Theme::dark();
    let yaml = theme.to_yaml_string().unwrap();
    assert!(yaml.contains("name: dark"));
    assert_eq!(Theme::from_yaml_str(&yaml).unwrap(), theme);
}

#[test]
fn test_theme_yaml_rejects_bad_color() {
    let yaml = Theme::light()
        .to_yaml_string()
        .unwrap()
        .replace("AC6600", "AC66");
    let err = Theme::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ThemeError::Yaml(_)));
}

#[test]
fn test_fonts_scale_with_text_size() {
    let fonts = ThemeFonts::for_text_size(32.0).unwrap();
    assert_eq!(fonts.base.size, 32.0);
    assert_eq!(fonts.heading(HeadingLevel::Level1).size, 56.0);
    assert_eq!(fonts.heading(HeadingLevel::Level5).size, 40.0);
    assert!(matches!(
        ThemeFonts::for_text_size(f32::NAN),
        Err(ThemeError::InvalidTextSize(_))
    ));
}
