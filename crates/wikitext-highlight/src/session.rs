//! The editing session.
//!
//! [`EditingSession`] exclusively owns the [`StyledDocument`] and runs every mutation as one
//! transaction: replace the text, re-classify the touched lines, then resynchronize the find
//! session. Readers never see text without its tags.

use std::ops::Range;

use wikitext_core::{
    SelectionState, StyleResolver, StyleRun, StyledDocument, SubRangeView, TaggedText,
    TextDeltaEdit, Theme, ThemeFonts, selection_state,
};

use crate::config::EditorConfig;
use crate::error::HighlightError;
use crate::find::FindReplaceEngine;
use crate::pipeline::FormatterPipeline;
use crate::toggle::{Markup, ToggleAction, ToggleOutcome, toggle_formatting};

/// A document together with its pipeline, find engine and style resolver.
#[derive(Debug)]
pub struct EditingSession {
    doc: StyledDocument,
    pipeline: FormatterPipeline,
    find: FindReplaceEngine,
    resolver: StyleResolver,
    config: EditorConfig,
}

impl EditingSession {
    /// Load `text` and classify all of it once.
    pub fn new(text: &str, config: EditorConfig) -> Result<Self, HighlightError> {
        let fonts = config.fonts()?;
        let pipeline = FormatterPipeline::new()?;
        let mut doc = StyledDocument::new(text);
        pipeline.highlight_all(&mut doc)?;

        let mut resolver =
            StyleResolver::new(config.theme.clone(), fonts, config.syntax_highlighting);
        resolver.restyle(&doc);

        tracing::debug!(chars = doc.len_chars(), "editing session created");
        Ok(Self {
            doc,
            find: FindReplaceEngine::new(config.search_options()),
            pipeline,
            resolver,
            config,
        })
    }

    /// The document.
    pub fn document(&self) -> &StyledDocument {
        &self.doc
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.doc.text()
    }

    /// Document version; bumped once per edit transaction.
    pub fn version(&self) -> u64 {
        self.doc.version()
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The find engine (read-only; use the session's find methods to drive it).
    pub fn find_engine(&self) -> &FindReplaceEngine {
        &self.find
    }

    /// The style resolver. Its cached runs are refreshed after every session operation.
    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    /// Replace `range` with `text` and re-classify the touched lines.
    pub fn edit(
        &mut self,
        range: Range<usize>,
        text: &str,
    ) -> Result<TextDeltaEdit, HighlightError> {
        let (pipeline, find) = (&self.pipeline, &mut self.find);
        let result: Result<TextDeltaEdit, HighlightError> = self.doc.transaction(|doc| {
            let edit = doc.replace(range, text)?;
            pipeline.highlight(doc, edit.inserted_range())?;
            find.refresh_after_edit(doc, &edit)?;
            Ok(edit)
        });
        self.restyle();
        result
    }

    /// Start a find session for `query`. Returns the match count.
    pub fn start_find(&mut self, query: &str) -> Result<usize, HighlightError> {
        let result = self.find.start(&mut self.doc, query);
        self.restyle();
        result?;
        Ok(self.find.match_count())
    }

    /// Select the next match.
    pub fn find_next(&mut self, after: Option<usize>) -> Result<Option<usize>, HighlightError> {
        let result = self.find.next(&mut self.doc, after);
        self.restyle();
        Ok(result?)
    }

    /// Select the previous match.
    pub fn find_previous(&mut self) -> Result<Option<usize>, HighlightError> {
        let result = self.find.previous(&mut self.doc);
        self.restyle();
        Ok(result?)
    }

    /// Replace the selected match.
    pub fn replace_single(
        &mut self,
        replacement: &str,
    ) -> Result<Option<TextDeltaEdit>, HighlightError> {
        let (pipeline, find) = (&self.pipeline, &mut self.find);
        let result: Result<Option<TextDeltaEdit>, HighlightError> = self.doc.transaction(|doc| {
            let Some(edit) = find.replace_single(doc, replacement)? else {
                return Ok(None);
            };
            pipeline.highlight(doc, edit.inserted_range())?;
            Ok(Some(edit))
        });
        self.restyle();
        result
    }

    /// Replace every match. Returns the number of replacements.
    pub fn replace_all(&mut self, replacement: &str) -> Result<usize, HighlightError> {
        let (pipeline, find) = (&self.pipeline, &mut self.find);
        let result: Result<usize, HighlightError> = self.doc.transaction(|doc| {
            let edits = find.replace_all(doc, replacement)?;
            // Edits are applied left to right, so every inserted range is still valid here.
            let mut highlighted: Option<Range<usize>> = None;
            for edit in &edits {
                let inserted = edit.inserted_range();
                if highlighted
                    .as_ref()
                    .is_some_and(|r| r.start <= inserted.start && inserted.end < r.end)
                {
                    continue;
                }
                highlighted = Some(pipeline.highlight(doc, inserted)?);
            }
            Ok(edits.len())
        });
        self.restyle();
        result
    }

    /// End the find session and clear its tags.
    pub fn end_find(&mut self) -> Result<(), HighlightError> {
        let result = self.find.end(&mut self.doc);
        self.restyle();
        Ok(result?)
    }

    /// Toolbar flags for a caret or selection.
    pub fn selection_state(&self, range: Range<usize>) -> SelectionState {
        selection_state(&self.doc, range)
    }

    /// Add or remove markup at `selection`, then re-classify the edited lines.
    pub fn toggle(
        &mut self,
        selection: Range<usize>,
        markup: Markup,
        action: ToggleAction,
    ) -> Result<ToggleOutcome, HighlightError> {
        let (pipeline, find) = (&self.pipeline, &mut self.find);
        let result: Result<ToggleOutcome, HighlightError> = self.doc.transaction(|doc| {
            let outcome = toggle_formatting(doc, selection, markup, action)?;
            if let Some(range) = outcome.affected_range() {
                pipeline.highlight(doc, range)?;
            }
            for edit in &outcome.edits {
                find.refresh_after_edit(doc, edit)?;
            }
            Ok(outcome)
        });
        self.restyle();
        result
    }

    /// A view of the line holding `offset`, with find tags applied from the session.
    pub fn paragraph_view(&self, offset: usize) -> Result<Option<SubRangeView>, HighlightError> {
        let Some(mut view) = self
            .doc
            .paragraph_range(offset)
            .and_then(|range| self.doc.materialize(range))
        else {
            return Ok(None);
        };
        self.find.apply_to_view(&mut view)?;
        Ok(Some(view))
    }

    /// Re-classify a materialized view in its own coordinates and re-apply find tags.
    pub fn rehighlight_view(&self, view: &mut SubRangeView) -> Result<(), HighlightError> {
        self.pipeline.highlight_all(view)?;
        self.find.apply_to_view(view)?;
        Ok(())
    }

    /// Switch theme and restyle. Tags are untouched.
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme.clone();
        self.resolver.set_theme(theme);
        self.resolver.restyle(&self.doc);
    }

    /// Change the body text size and restyle.
    pub fn set_text_size(&mut self, size: f32) -> Result<(), HighlightError> {
        let fonts = ThemeFonts::for_text_size(size)?;
        self.config.text_size = size;
        self.resolver.set_fonts(fonts);
        self.resolver.restyle(&self.doc);
        Ok(())
    }

    /// Turn markup rendering on or off and restyle.
    pub fn set_syntax_highlighting(&mut self, enabled: bool) {
        self.config.syntax_highlighting = enabled;
        self.resolver.set_syntax_highlighting(enabled);
        self.resolver.restyle(&self.doc);
    }

    /// Recompute the resolver's cached runs for the whole document.
    pub fn restyle(&mut self) {
        self.resolver.restyle(&self.doc);
    }

    /// Visual runs for `range`, resolved from the current tags.
    pub fn style_runs(&self, range: Range<usize>) -> Vec<StyleRun> {
        self.resolver.resolve(&self.doc, range)
    }
}
