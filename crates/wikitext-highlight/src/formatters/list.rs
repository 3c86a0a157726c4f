use std::ops::Range;

use regex::Regex;
use wikitext_core::{ColorFamily, ListDepth, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile, intersects};

/// One marker family (`*` or `#`).
#[derive(Debug, Clone)]
struct ListPatterns {
    multiple: Regex,
    single: Regex,
    tag: fn(ListDepth) -> Tag,
}

impl ListPatterns {
    fn new(marker: char, tag: fn(ListDepth) -> Tag) -> Result<Self, HighlightError> {
        let marker = regex::escape(&marker.to_string());
        Ok(Self {
            multiple: compile(FormatterKind::List, &format!(r"^({marker}{{2,}})(.*)$"))?,
            single: compile(FormatterKind::List, &format!(r"^({marker})(.*)$"))?,
            tag,
        })
    }

    fn classify(&self, text: &str, sink: &mut SpanSink) {
        let mut claimed: Vec<Range<usize>> = Vec::new();

        for caps in self.multiple.captures_iter(text) {
            let (Some(full), Some(markers), Some(content)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            sink.push(markers.range(), Tag::Color(ColorFamily::Orange));
            sink.push(content.range(), (self.tag)(ListDepth::Multiple));
            claimed.push(full.range());
        }

        for caps in self.single.captures_iter(text) {
            let (Some(full), Some(marker), Some(content)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if claimed.iter().any(|c| intersects(c, &full.range())) {
                continue;
            }
            sink.push(marker.range(), Tag::Color(ColorFamily::Orange));
            sink.push(content.range(), (self.tag)(ListDepth::Single));
        }
    }
}

/// Classifies `*` bullet and `#` numbered list lines.
///
/// Multi-marker lines are matched first; single-marker matches that overlap them are dropped.
#[derive(Debug, Clone)]
pub struct ListFormatter {
    bullet: ListPatterns,
    number: ListPatterns,
}

impl ListFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            bullet: ListPatterns::new('*', Tag::BulletList)?,
            number: ListPatterns::new('#', Tag::NumberList)?,
        })
    }
}

impl Formatter for ListFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::List
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::BulletList, TagFamily::NumberList]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let mut sink = SpanSink::new(text, origin);
        self.bullet.classify(text, &mut sink);
        self.number.classify(text, &mut sink);
        sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_claims_before_single() {
        let formatter = ListFormatter::new().unwrap();
        let spans: Vec<_> = formatter
            .classify("* one\n** two\n# three", 0)
            .into_iter()
            .map(|s| (s.start, s.end, s.tag))
            .collect();

        let orange = Tag::Color(ColorFamily::Orange);
        assert_eq!(
            spans,
            vec![
                (6, 8, orange),
                (8, 12, Tag::BulletList(ListDepth::Multiple)),
                (0, 1, orange),
                (1, 5, Tag::BulletList(ListDepth::Single)),
                (13, 14, orange),
                (14, 20, Tag::NumberList(ListDepth::Single)),
            ]
        );
    }
}
