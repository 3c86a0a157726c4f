//! Bold / italic resolution.
//!
//! Runs of five apostrophes claim their range first. Three-runs and two-runs that intersect a
//! claimed five-run are dropped. When a surviving bold run strictly contains a surviving italic
//! run (or the other way around), the overlap of their contents becomes `BoldItalic`; the rest
//! keeps its single tag.

use std::ops::Range;

use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile, intersects};

const ORANGE: Tag = Tag::Color(ColorFamily::Orange);

/// One delimited run, in byte offsets of the classified slice.
#[derive(Debug, Clone)]
struct Run {
    full: Range<usize>,
    content: Range<usize>,
}

impl Run {
    fn opening(&self) -> Range<usize> {
        self.full.start..self.content.start
    }

    fn closing(&self) -> Range<usize> {
        self.content.end..self.full.end
    }

    fn strictly_contains(&self, other: &Run) -> bool {
        self.full.start < other.full.start && self.full.end > other.full.end
    }
}

/// Classifies `''`, `'''` and `'''''` emphasis.
#[derive(Debug, Clone)]
pub struct EmphasisFormatter {
    bold_italic: Regex,
    bold: Regex,
}

impl EmphasisFormatter {
    /// Compile the formatter's patterns.
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            bold_italic: compile(FormatterKind::Emphasis, r"('{5})(.*?)('{5})")?,
            bold: compile(FormatterKind::Emphasis, r"('{3})(.*?)('{3})")?,
        })
    }

    fn runs(regex: &Regex, text: &str) -> Vec<Run> {
        regex
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?.range();
                let content = caps.get(2)?.range();
                Some(Run { full, content })
            })
            .collect()
    }

    /// Pair apostrophe runs of exactly two characters, left to right, within each line.
    fn italic_runs(text: &str) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut line_start = 0;

        for line in text.split_inclusive('\n') {
            let bytes = line.as_bytes();
            let mut pending: Option<usize> = None;
            let mut i = 0;
            while i < bytes.len() {
                if bytes[i] != b'\'' {
                    i += 1;
                    continue;
                }
                let run_start = i;
                while i < bytes.len() && bytes[i] == b'\'' {
                    i += 1;
                }
                if i - run_start != 2 {
                    continue;
                }

                let start = line_start + run_start;
                match pending.take() {
                    None => pending = Some(start),
                    Some(open) => runs.push(Run {
                        full: open..start + 2,
                        content: open + 2..start,
                    }),
                }
            }
            line_start += line.len();
        }

        runs
    }
}

impl Formatter for EmphasisFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Emphasis
    }

    fn families(&self) -> &'static [TagFamily] {
        &[TagFamily::Emphasis]
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let bold_italics = Self::runs(&self.bold_italic, text);
        let claimed = |run: &Run| bold_italics.iter().any(|bi| intersects(&bi.full, &run.full));

        let bolds: Vec<Run> = Self::runs(&self.bold, text)
            .into_iter()
            .filter(|run| !claimed(run))
            .collect();
        let italics: Vec<Run> = Self::italic_runs(text)
            .into_iter()
            .filter(|run| !claimed(run))
            .collect();

        let mut sink = SpanSink::new(text, origin);
        for run in bold_italics.iter().chain(&bolds).chain(&italics) {
            sink.push(run.opening(), ORANGE);
            sink.push(run.closing(), ORANGE);
        }
        for run in &bolds {
            sink.push(run.content.clone(), Tag::Bold);
        }
        for run in &italics {
            sink.push(run.content.clone(), Tag::Italic);
        }
        for run in &bold_italics {
            sink.push(run.content.clone(), Tag::BoldItalic);
        }

        for italic in &italics {
            for bold in &bolds {
                if !(bold.strictly_contains(italic) || italic.strictly_contains(bold)) {
                    continue;
                }
                let start = italic.content.start.max(bold.content.start);
                let end = italic.content.end.min(bold.content.end);
                sink.push(start..end, Tag::BoldItalic);
            }
        }

        let spans = sink.finish();
        tracing::trace!(spans = spans.len(), "emphasis classified");
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<(usize, usize, Tag)> {
        let formatter = EmphasisFormatter::new().unwrap();
        formatter
            .classify(text, 0)
            .into_iter()
            .map(|s| (s.start, s.end, s.tag))
            .collect()
    }

    #[test]
    fn test_italic_runs_pair_per_line() {
        let runs = EmphasisFormatter::italic_runs("''a'' '''b''' ''c\n''d''");
        let fulls: Vec<_> = runs.iter().map(|r| r.full.clone()).collect();
        assert_eq!(fulls, vec![0..5, 18..23]);
    }

    #[test]
    fn test_bold() {
        let spans = classify("a '''b''' c");
        assert!(spans.contains(&(2, 5, ORANGE)));
        assert!(spans.contains(&(5, 6, Tag::Bold)));
        assert!(spans.contains(&(6, 9, ORANGE)));
    }

    #[test]
    fn test_bold_italic_claims_inner_runs() {
        let spans = classify("'''''x'''''");
        let content: Vec<_> = spans.iter().filter(|s| s.2 != ORANGE).collect();
        assert_eq!(content, vec![&(5, 6, Tag::BoldItalic)]);
    }
}
