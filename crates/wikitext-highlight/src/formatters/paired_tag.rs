use regex::Regex;
use wikitext_core::{ColorFamily, Span, Tag, TagFamily};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, SpanSink, compile};

/// Classifies a single-line `<name>...</name>` HTML-style pair.
///
/// Delimiters are tagged green; the enclosed text gets the pair's content tag.
#[derive(Debug, Clone)]
pub struct PairedTagFormatter {
    kind: FormatterKind,
    content: Tag,
    family: &'static [TagFamily],
    regex: Regex,
}

impl PairedTagFormatter {
    fn new(
        kind: FormatterKind,
        name: &str,
        content: Tag,
        family: &'static [TagFamily],
    ) -> Result<Self, HighlightError> {
        let pattern = format!(r"(?i)(<{name}>)(.*?)(</{name}>)");
        Ok(Self {
            kind,
            content,
            family,
            regex: compile(kind, &pattern)?,
        })
    }

    /// `<s>...</s>`
    pub fn strikethrough() -> Result<Self, HighlightError> {
        Self::new(
            FormatterKind::Strikethrough,
            "s",
            Tag::Strikethrough,
            &[TagFamily::Strikethrough],
        )
    }

    /// `<u>...</u>`
    pub fn underline() -> Result<Self, HighlightError> {
        Self::new(
            FormatterKind::Underline,
            "u",
            Tag::Underline,
            &[TagFamily::Underline],
        )
    }

    /// `<sub>...</sub>`
    pub fn subscript() -> Result<Self, HighlightError> {
        Self::new(
            FormatterKind::Subscript,
            "sub",
            Tag::Subscript,
            &[TagFamily::Subscript],
        )
    }

    /// `<sup>...</sup>`
    pub fn superscript() -> Result<Self, HighlightError> {
        Self::new(
            FormatterKind::Superscript,
            "sup",
            Tag::Superscript,
            &[TagFamily::Superscript],
        )
    }
}

impl Formatter for PairedTagFormatter {
    fn kind(&self) -> FormatterKind {
        self.kind
    }

    fn families(&self) -> &'static [TagFamily] {
        self.family
    }

    fn classify(&self, text: &str, origin: usize) -> Vec<Span> {
        let green = Tag::Color(ColorFamily::Green);
        let mut sink = SpanSink::new(text, origin);
        for caps in self.regex.captures_iter(text) {
            let (Some(open), Some(content), Some(close)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            sink.push(open.range(), green);
            sink.push(content.range(), self.content);
            sink.push(close.range(), green);
        }
        sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_is_not_strikethrough() {
        let strike = PairedTagFormatter::strikethrough().unwrap();
        assert!(strike.classify("H<sub>2</sub>O", 0).is_empty());

        let sub = PairedTagFormatter::subscript().unwrap();
        let spans = sub.classify("H<sub>2</sub>O", 0);
        assert!(spans.contains(&Span::new(6, 7, Tag::Subscript)));
    }
}
