#![warn(missing_docs)]
//! Wikitext Core - Headless Styled Document Kernel for Wikitext Source Editors
//!
//! # Overview
//!
//! `wikitext-core` holds the document model that a wikitext source editor classifies and renders:
//! a rope-backed text buffer with semantic [`Tag`]s attached to character ranges. It does not
//! classify markup itself (see `wikitext-highlight`) and it does not render; rendering backends
//! read tags through the [`TaggedText`] interface and ask the [`StyleResolver`] for colors and
//! fonts.
//!
//! # Core Features
//!
//! - **Tagged spans**: sorted span store with O(log n + k) queries and canonical merging
//! - **Tag families**: mutually-exclusive families enforced on every write
//! - **Transactions**: nested begin/end bracketing with one version bump per transaction
//! - **Sub-range views**: paragraph-sized copies with global/local coordinate translation
//! - **Theme resolution**: tags → colors/fonts without re-classification
//! - **Selection state**: toolbar flags for a caret or selection
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  SelectionState / StyleResolver             │  ← UI-facing queries
//! ├─────────────────────────────────────────────┤
//! │  TaggedText (StyledDocument, SubRangeView)  │  ← Backend interface
//! ├─────────────────────────────────────────────┤
//! │  SpanTree (tagged intervals)                │  ← Tag storage
//! ├─────────────────────────────────────────────┤
//! │  Rope                                       │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use wikitext_core::{StyledDocument, Tag, TaggedText, selection_state};
//!
//! let mut doc = StyledDocument::new("one '''two''' three");
//! doc.add_tag(7..10, Tag::Bold).unwrap();
//!
//! assert!(selection_state(&doc, 7..10).is_bold);
//! assert!(!selection_state(&doc, 4..10).is_bold);
//!
//! doc.replace(0..3, "1").unwrap();
//! assert_eq!(doc.coverage(0..doc.len_chars(), Tag::Bold), vec![5..8]);
//! ```
//!
//! # Module Description
//!
//! - [`tags`] - Tag and family definitions
//! - [`intervals`] - Sorted span store
//! - [`document`] - `StyledDocument`, `TaggedText`, `SubRangeView`
//! - [`delta`] - Edit records
//! - [`search`] - Char-offset regex search
//! - [`theme`] - Colors and fonts
//! - [`style`] - Tag → attribute resolution
//! - [`selection`] - Toolbar selection state

pub mod delta;
pub mod document;
pub mod error;
pub mod intervals;
pub mod search;
pub mod selection;
pub mod style;
pub mod tags;
pub mod theme;

pub use delta::TextDeltaEdit;
pub use document::{StyledDocument, SubRangeView, TaggedText};
pub use error::{DocumentError, SearchError, ThemeError};
pub use intervals::{Span, SpanTree};
pub use search::{
    CharIndex, SearchMatch, SearchOptions, compile_find_pattern, find_all, find_all_matches,
};
pub use selection::{SelectionState, selection_state};
pub use style::{BaselineShift, StyleResolver, StyleRun, VisualAttributes};
pub use tags::{ColorFamily, HeadingLevel, ListDepth, Tag, TagFamily};
pub use theme::{Color, DESIGN_TEXT_SIZE, Font, FontWeight, Theme, ThemeColors, ThemeFonts};
