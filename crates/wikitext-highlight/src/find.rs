//! Find/replace sessions.
//!
//! A [`FindReplaceEngine`] is either idle or holds one [`FindSession`]. The session owns the
//! compiled search pattern, the ordered match list, the selected index and the history of
//! replaced ranges; the document only carries the transient `Match`, `SelectedMatch` and
//! `ReplacedMatch` tags derived from it. No formatter owns the `Find` family, so pipeline passes
//! never clobber these tags.
//!
//! Match ranges are only valid for the document version they were computed against. Edits made
//! through the engine recompute them; any other edit must be reported with
//! [`FindReplaceEngine::refresh_after_edit`].

use std::ops::Range;

use regex::Regex;
use wikitext_core::{
    DocumentError, SearchMatch, SearchOptions, SubRangeView, Tag, TagFamily, TaggedText,
    TextDeltaEdit, compile_find_pattern, find_all_matches,
};

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindState {
    /// No session.
    Idle,
    /// A session is active (it may have zero matches).
    SessionActive,
}

/// The live state of one find interaction.
#[derive(Debug, Clone)]
pub struct FindSession {
    query: String,
    regex: Option<Regex>,
    matches: Vec<SearchMatch>,
    selected: Option<usize>,
    replaced: Vec<Range<usize>>,
}

impl FindSession {
    /// The search text as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns `false` if the search text failed to compile (the session then has no matches).
    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Current matches, in document order.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Number of current matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Index of the selected match.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected match.
    pub fn selected_match(&self) -> Option<SearchMatch> {
        self.selected.and_then(|i| self.matches.get(i).copied())
    }

    /// Ranges written by replace operations, oldest first.
    pub fn replaced_ranges(&self) -> &[Range<usize>] {
        &self.replaced
    }

    /// The most recent replaced range.
    pub fn last_replaced_range(&self) -> Option<Range<usize>> {
        self.replaced.last().cloned()
    }

    fn recalculate<T: TaggedText + ?Sized>(&mut self, doc: &T) {
        self.matches = match &self.regex {
            Some(regex) => find_all_matches(&doc.text(), regex),
            None => Vec::new(),
        };
        self.selected = None;
    }

    fn record_edit(&mut self, edit: &TextDeltaEdit, len: usize) {
        let (start, end) = (edit.start, edit.end());
        self.replaced = self
            .replaced
            .iter()
            .filter(|r| r.end <= start || r.start >= end)
            .map(|r| edit.map_offset(r.start)..edit.map_offset(r.end))
            .filter(|r| r.start < r.end && r.end <= len)
            .collect();
    }

    /// Repaint every `Find` tag on `doc` from the session.
    fn paint<T: TaggedText + ?Sized>(&self, doc: &mut T) -> Result<(), DocumentError> {
        let len = doc.len_chars();
        doc.remove_families(0..len, &[TagFamily::Find])?;
        for range in &self.replaced {
            doc.add_tag(range.clone(), Tag::ReplacedMatch)?;
        }
        for (i, m) in self.matches.iter().enumerate() {
            doc.add_tag(m.range(), self.tag_for(i))?;
        }
        Ok(())
    }

    fn tag_for(&self, index: usize) -> Tag {
        if self.selected == Some(index) {
            Tag::SelectedMatch
        } else {
            Tag::Match
        }
    }

    fn select<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        index: usize,
    ) -> Result<(), DocumentError> {
        if let Some(previous) = self.selected_match() {
            doc.add_tag(previous.range(), Tag::Match)?;
        }
        self.selected = Some(index);
        if let Some(current) = self.selected_match() {
            doc.add_tag(current.range(), Tag::SelectedMatch)?;
        }
        Ok(())
    }
}

/// Find/replace state machine layered on top of a tagged document.
#[derive(Debug, Clone, Default)]
pub struct FindReplaceEngine {
    options: SearchOptions,
    session: Option<FindSession>,
}

impl FindReplaceEngine {
    /// Create an idle engine.
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            session: None,
        }
    }

    /// Options used by the next [`start`](Self::start).
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Change the options used by the next [`start`](Self::start).
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Current state.
    pub fn state(&self) -> FindState {
        if self.session.is_some() {
            FindState::SessionActive
        } else {
            FindState::Idle
        }
    }

    /// The active session.
    pub fn session(&self) -> Option<&FindSession> {
        self.session.as_ref()
    }

    /// Number of matches in the active session (`0` when idle).
    pub fn match_count(&self) -> usize {
        self.session.as_ref().map_or(0, FindSession::match_count)
    }

    /// Selected match index in the active session.
    pub fn selected_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(FindSession::selected_index)
    }

    /// Most recent replaced range in the active session.
    pub fn last_replaced_range(&self) -> Option<Range<usize>> {
        self.session.as_ref().and_then(FindSession::last_replaced_range)
    }

    /// Start a session for `query` and tag every match.
    ///
    /// Empty search text is ignored. Search text that does not compile starts a session with no
    /// matches. An already active session is ended first.
    pub fn start<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        query: &str,
    ) -> Result<(), DocumentError> {
        if query.is_empty() {
            return Ok(());
        }
        if self.session.is_some() {
            self.end(doc)?;
        }

        let regex = match compile_find_pattern(query, self.options) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::warn!(%err, "search text does not compile; no matches");
                None
            }
        };
        let mut session = FindSession {
            query: query.to_string(),
            regex,
            matches: Vec::new(),
            selected: None,
            replaced: Vec::new(),
        };
        session.recalculate(doc);
        session.paint(doc)?;

        tracing::debug!(query, matches = session.match_count(), "find session started");
        self.session = Some(session);
        Ok(())
    }

    /// Select the next match and return its index.
    ///
    /// With nothing selected, `after` picks the first match starting at or after it (falling
    /// back to the first match). Otherwise the selection advances, wrapping to the start.
    pub fn next<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        after: Option<usize>,
    ) -> Result<Option<usize>, DocumentError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let count = session.match_count();
        if count == 0 {
            return Ok(None);
        }

        let index = match (session.selected, after) {
            (None, Some(after)) => session
                .matches
                .iter()
                .position(|m| m.start >= after)
                .unwrap_or(0),
            (None, None) => 0,
            (Some(i), _) if i + 1 >= count => 0,
            (Some(i), _) => i + 1,
        };
        session.select(doc, index)?;
        tracing::trace!(index, count, "find next");
        Ok(Some(index))
    }

    /// Select the previous match, wrapping to the end, and return its index.
    pub fn previous<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
    ) -> Result<Option<usize>, DocumentError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let count = session.match_count();
        if count == 0 {
            return Ok(None);
        }

        let index = match session.selected {
            None | Some(0) => count - 1,
            Some(i) => i - 1,
        };
        session.select(doc, index)?;
        tracing::trace!(index, count, "find previous");
        Ok(Some(index))
    }

    /// Replace the selected match with `replacement`.
    ///
    /// The new text is tagged `ReplacedMatch`, matches are recomputed against the edited document
    /// and the first match at or after the edit is selected. Returns `None` when nothing is
    /// selected.
    pub fn replace_single<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        replacement: &str,
    ) -> Result<Option<TextDeltaEdit>, DocumentError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let Some(selected) = session.selected_match() else {
            return Ok(None);
        };

        let edit = doc.replace(selected.range(), replacement)?;
        session.record_edit(&edit, doc.len_chars());
        let inserted = edit.inserted_range();
        if !inserted.is_empty() {
            session.replaced.push(inserted);
        }
        session.recalculate(doc);
        session.paint(doc)?;
        tracing::debug!(
            start = edit.start,
            remaining = session.match_count(),
            "replaced selected match"
        );

        self.next(doc, Some(edit.start))?;
        Ok(Some(edit))
    }

    /// Replace every match with `replacement`, in document order.
    ///
    /// Each match is shifted by the length change of the replacements already made in the same
    /// pass. The session keeps running with no matches and no selection.
    pub fn replace_all<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        replacement: &str,
    ) -> Result<Vec<TextDeltaEdit>, DocumentError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Vec::new());
        };

        let pending = std::mem::take(&mut session.matches);
        session.selected = None;
        let mut shift: isize = 0;
        let mut edits = Vec::with_capacity(pending.len());

        for m in pending {
            let start = m.start.saturating_add_signed(shift);
            let edit = doc.replace(start..start + m.len(), replacement)?;
            session.record_edit(&edit, doc.len_chars());
            let inserted = edit.inserted_range();
            if !inserted.is_empty() {
                session.replaced.push(inserted);
            }
            shift += edit.len_delta();
            edits.push(edit);
        }

        session.paint(doc)?;
        tracing::debug!(replaced = edits.len(), "replaced all matches");
        Ok(edits)
    }

    /// End the session and clear every `Find` tag.
    pub fn end<T: TaggedText + ?Sized>(&mut self, doc: &mut T) -> Result<(), DocumentError> {
        let len = doc.len_chars();
        doc.remove_families(0..len, &[TagFamily::Find])?;
        if self.session.take().is_some() {
            tracing::debug!("find session ended");
        }
        Ok(())
    }

    /// Resynchronize the session after an edit made outside the engine.
    ///
    /// Replaced ranges are shifted through the edit (ranges the edit touched are dropped),
    /// matches are recomputed and the selection is cleared.
    pub fn refresh_after_edit<T: TaggedText + ?Sized>(
        &mut self,
        doc: &mut T,
        edit: &TextDeltaEdit,
    ) -> Result<(), DocumentError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.record_edit(edit, doc.len_chars());
        session.recalculate(doc);
        session.paint(doc)
    }

    /// Re-tag a materialized view from the document-wide session state.
    pub fn apply_to_view(&self, view: &mut SubRangeView) -> Result<(), DocumentError> {
        let len = view.len_chars();
        view.remove_families(0..len, &[TagFamily::Find])?;
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };

        for range in &session.replaced {
            if let Some(local) = view.clip_to_local(range.clone()) {
                view.add_tag(local, Tag::ReplacedMatch)?;
            }
        }
        for (i, m) in session.matches.iter().enumerate() {
            if let Some(local) = view.clip_to_local(m.range()) {
                view.add_tag(local, session.tag_for(i))?;
            }
        }
        Ok(())
    }
}
