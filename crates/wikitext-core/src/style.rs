//! Tag → visual attribute resolution.
//!
//! [`StyleResolver`] never classifies text. It reads the tags that are already on the document
//! and maps them to colors and fonts for the active [`Theme`] and [`ThemeFonts`]. A theme or text
//! size change is one sweep over the span boundaries of the document.

use std::ops::Range;

use crate::document::TaggedText;
use crate::tags::{ColorFamily, Tag};
use crate::theme::{Color, Font, Theme, ThemeColors, ThemeFonts};

/// Vertical text offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaselineShift {
    /// Normal baseline.
    #[default]
    None,
    /// Lowered.
    Subscript,
    /// Raised.
    Superscript,
}

/// Rendering attributes for one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAttributes {
    /// Text color.
    pub foreground: Color,
    /// Highlight color, if any.
    pub background: Option<Color>,
    /// Font request.
    pub font: Font,
    /// Strikethrough decoration.
    pub strikethrough: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Baseline shift.
    pub baseline: BaselineShift,
}

/// A maximal range sharing the same [`VisualAttributes`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRun {
    /// Character range.
    pub range: Range<usize>,
    /// Attributes for every character of the range.
    pub attributes: VisualAttributes,
}

/// Maps tags to visual attributes for one theme and text size.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    theme: Theme,
    fonts: ThemeFonts,
    syntax_highlighting: bool,
    colors: ThemeColors,
    effective_fonts: ThemeFonts,
    runs: Vec<StyleRun>,
}

impl StyleResolver {
    /// Create a resolver.
    pub fn new(theme: Theme, fonts: ThemeFonts, syntax_highlighting: bool) -> Self {
        let mut resolver = Self {
            colors: theme.colors.clone(),
            effective_fonts: fonts.clone(),
            theme,
            fonts,
            syntax_highlighting,
            runs: Vec::new(),
        };
        resolver.refresh_effective();
        resolver
    }

    fn refresh_effective(&mut self) {
        if self.syntax_highlighting {
            self.colors = self.theme.colors.clone();
            self.effective_fonts = self.fonts.clone();
        } else {
            self.colors = self.theme.colors.without_syntax_highlighting();
            self.effective_fonts = self.fonts.without_syntax_highlighting();
        }
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Active fonts.
    pub fn fonts(&self) -> &ThemeFonts {
        &self.fonts
    }

    /// Whether markup colors and fonts are rendered.
    pub fn syntax_highlighting(&self) -> bool {
        self.syntax_highlighting
    }

    /// Switch theme. Call [`restyle`](Self::restyle) to refresh cached runs.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.refresh_effective();
    }

    /// Switch fonts (e.g. after a text size change).
    pub fn set_fonts(&mut self, fonts: ThemeFonts) {
        self.fonts = fonts;
        self.refresh_effective();
    }

    /// Turn markup colors and fonts on or off. Tags are not touched.
    pub fn set_syntax_highlighting(&mut self, enabled: bool) {
        self.syntax_highlighting = enabled;
        self.refresh_effective();
    }

    /// Attributes for a character carrying `tags`.
    pub fn attributes_for(&self, tags: &[Tag]) -> VisualAttributes {
        let colors = &self.colors;
        let fonts = &self.effective_fonts;
        let has = |tag: Tag| tags.contains(&tag);

        let find_background = if has(Tag::SelectedMatch) {
            Some(colors.selected_match_background)
        } else if has(Tag::ReplacedMatch) {
            Some(colors.replaced_match_background)
        } else if has(Tag::Match) {
            Some(colors.match_background)
        } else {
            None
        };

        let foreground = if find_background.is_some() {
            colors.match_foreground
        } else {
            ColorFamily::ALL
                .iter()
                .rev()
                .find(|&&family| has(Tag::Color(family)))
                .map(|&family| colors.for_family(family))
                .unwrap_or(colors.text)
        };

        let heading = tags.iter().find_map(|tag| match tag {
            Tag::Heading(level) => Some(*level),
            _ => None,
        });
        let font = if let Some(level) = heading {
            fonts.heading(level)
        } else if has(Tag::BoldItalic) {
            fonts.bold_italic
        } else if has(Tag::Bold) {
            fonts.bold
        } else if has(Tag::Italic) {
            fonts.italic
        } else {
            fonts.base
        };

        let baseline = if has(Tag::Superscript) {
            BaselineShift::Superscript
        } else if has(Tag::Subscript) {
            BaselineShift::Subscript
        } else {
            BaselineShift::None
        };

        VisualAttributes {
            foreground,
            background: find_background,
            font,
            strikethrough: has(Tag::Strikethrough),
            underline: has(Tag::Underline),
            baseline,
        }
    }

    /// Resolve attribute runs for `range` of `doc`. Returns nothing for an out-of-bounds range.
    pub fn resolve<T: TaggedText + ?Sized>(&self, doc: &T, range: Range<usize>) -> Vec<StyleRun> {
        if range.start > range.end || range.end > doc.len_chars() {
            return Vec::new();
        }
        let spans = doc.spans_in(range.clone());

        let mut boundaries: Vec<usize> = Vec::with_capacity(spans.len() * 2 + 2);
        boundaries.push(range.start);
        boundaries.push(range.end);
        for span in &spans {
            boundaries.push(span.start);
            boundaries.push(span.end);
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut starts = spans.clone();
        starts.sort_by_key(|s| s.start);
        let mut next_start = 0;
        let mut active: Vec<(usize, Tag)> = Vec::new();

        let mut runs: Vec<StyleRun> = Vec::new();
        for window in boundaries.windows(2) {
            let (seg_start, seg_end) = (window[0], window[1]);
            active.retain(|&(end, _)| end > seg_start);
            while next_start < starts.len() && starts[next_start].start <= seg_start {
                let span = starts[next_start];
                active.push((span.end, span.tag));
                next_start += 1;
            }

            let tags: Vec<Tag> = active.iter().map(|&(_, tag)| tag).collect();
            let attributes = self.attributes_for(&tags);
            match runs.last_mut() {
                Some(last) if last.attributes == attributes && last.range.end == seg_start => {
                    last.range.end = seg_end;
                }
                _ => runs.push(StyleRun {
                    range: seg_start..seg_end,
                    attributes,
                }),
            }
        }

        runs
    }

    /// Recompute cached runs for the whole document.
    pub fn restyle<T: TaggedText + ?Sized>(&mut self, doc: &T) {
        self.runs = self.resolve(doc, 0..doc.len_chars());
        tracing::debug!(runs = self.runs.len(), "restyled document");
    }

    /// Runs cached by the last [`restyle`](Self::restyle). Stale once the document changes.
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(Theme::default(), ThemeFonts::default(), true)
    }
}
