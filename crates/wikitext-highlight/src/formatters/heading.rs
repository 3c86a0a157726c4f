use regex::Regex;
use wikitext_core::{ColorFamily, HeadingLevel, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

/// Classifies `== Heading ==` lines, one pattern per level.
#[derive(Debug, Clone)]
pub struct HeadingFormatter {
    levels: Vec<(HeadingLevel, Regex)>,
}

impl HeadingFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        let levels = HeadingLevel::ALL
            .into_iter()
            .map(|level| {
                let n = level.delimiter_len();
                let pattern = format!(r"^(={{{n}}})([^=\r\n]*)(={{{n}}})$");
                compile(FormatterKind::Heading, &pattern).map(|regex| (level, regex))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { levels })
    }
}

impl Formatter for HeadingFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Heading
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Heading]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let mut sink = SpanSink::new(text, origin);
        for (level, regex) in &self.levels {
            for caps in regex.captures_iter(text) {
                let (Some(open), Some(content), Some(close)) =
                    (caps.get(1), caps.get(2), caps.get(3))
                else {
                    continue;
                };
                sink.push(open.range(), Tag::Color(ColorFamily::Orange));
                sink.push(content.range(), Tag::Heading(*level));
                sink.push(close.range(), Tag::Color(ColorFamily::Orange));
            }
        }
        sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_exclusive() {
        let formatter = HeadingFormatter::new().unwrap();
        let spans = formatter.classify("== A ==\n=== B ===\n==== C ===", 0);
        let headings: Vec<_> = spans
            .iter()
            .filter(|s| matches!(s.tag, Tag::Heading(_)))
            .map(|s| (s.start, s.end, s.tag))
            .collect();
        assert_eq!(
            headings,
            vec![
                (2, 5, Tag::Heading(HeadingLevel::Level1)),
                (11, 14, Tag::Heading(HeadingLevel::Level2)),
            ]
        );
    }
}
