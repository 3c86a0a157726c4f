//! The ordered formatter pipeline.
//!
//! [`FormatterPipeline::highlight`] extends an edited range to whole lines and runs every
//! formatter over that extended range only. For each formatter it clears the formatter's own
//! families over the range and applies the spans it returns, so re-running the pipeline over
//! unchanged text leaves the tag set unchanged and never touches another formatter's tags or the
//! find overlay.

use std::ops::Range;

use wikitext_core::{DocumentError, TaggedText};

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind, PIPELINE_ORDER};
use crate::formatters;

/// Every built-in formatter, in [`PIPELINE_ORDER`].
#[derive(Debug)]
pub struct FormatterPipeline {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatterPipeline {
    /// Compile every built-in formatter.
    pub fn new() -> Result<Self, HighlightError> {
        let formatters = PIPELINE_ORDER
            .into_iter()
            .map(formatters::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { formatters })
    }

    /// Kinds in the order they run.
    pub fn kinds(&self) -> Vec<FormatterKind> {
        self.formatters.iter().map(|f| f.kind()).collect()
    }

    /// Re-classify the lines touched by `edited` and return the extended range.
    ///
    /// A stale range is rejected with [`DocumentError::RangeOutOfBounds`] before anything is
    /// changed.
    pub fn highlight<T: TaggedText + ?Sized>(
        &self,
        doc: &mut T,
        edited: Range<usize>,
    ) -> Result<Range<usize>, HighlightError> {
        let len = doc.len_chars();
        let Some(range) = doc.line_range(edited.clone()) else {
            tracing::warn!(?edited, len, "rejected stale highlight range");
            return Err(DocumentError::RangeOutOfBounds {
                start: edited.start,
                end: edited.end,
                len,
            }
            .into());
        };
        let Some(text) = doc.slice(range.clone()) else {
            return Ok(range.start..range.start);
        };

        for formatter in &self.formatters {
            let spans = formatter.classify(&text, range.start);
            tracing::trace!(kind = ?formatter.kind(), spans = spans.len(), "formatter pass");

            doc.remove_families(range.clone(), formatter.families())?;
            for span in spans {
                doc.add_tag(span.range(), span.tag)?;
            }
        }

        tracing::debug!(?edited, ?range, "highlighted");
        Ok(range)
    }

    /// Re-classify the whole document.
    pub fn highlight_all<T: TaggedText + ?Sized>(
        &self,
        doc: &mut T,
    ) -> Result<Range<usize>, HighlightError> {
        let len = doc.len_chars();
        self.highlight(doc, 0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikitext_core::{ColorFamily, StyledDocument, Tag};

    #[test]
    fn test_kinds_follow_pipeline_order() {
        let pipeline = FormatterPipeline::new().unwrap();
        assert_eq!(pipeline.kinds(), PIPELINE_ORDER.to_vec());
    }

    #[test]
    fn test_highlight_extends_to_lines() {
        let pipeline = FormatterPipeline::new().unwrap();
        let mut doc = StyledDocument::new("first\na '''b''' c\nlast");
        let range = pipeline.highlight(&mut doc, 9..9).unwrap();
        assert_eq!(range, 6..18);
        assert!(doc.has_tag(11, Tag::Bold));
        assert!(doc.has_tag(8, Tag::Color(ColorFamily::Orange)));
    }

    #[test]
    fn test_highlight_leaves_other_lines_alone() {
        let pipeline = FormatterPipeline::new().unwrap();
        let mut doc = StyledDocument::new("'''a'''\n'''b'''");
        pipeline.highlight(&mut doc, 0..0).unwrap();
        assert!(doc.has_tag(3, Tag::Bold));
        assert!(!doc.has_tag(11, Tag::Bold));
    }

    #[test]
    fn test_stale_range_is_rejected() {
        let pipeline = FormatterPipeline::new().unwrap();
        let mut doc = StyledDocument::new("abc");
        let err = pipeline.highlight(&mut doc, 2..10).unwrap_err();
        assert!(matches!(
            err,
            HighlightError::Document(DocumentError::RangeOutOfBounds { .. })
        ));
    }
}
