#![warn(missing_docs)]
//! Wikitext Highlight - Incremental Classification Engine for `wikitext-core`
//!
//! # Overview
//!
//! `wikitext-highlight` classifies wikitext markup into the tags defined by `wikitext-core` and
//! keeps them current while the document is edited. A fixed, ordered [`FormatterPipeline`]
//! re-classifies only the lines an edit touched; a [`FindReplaceEngine`] layers transient match
//! tags on top; [`toggle_formatting`] implements the toolbar buttons by editing delimiters.
//! [`EditingSession`] ties these together with one transaction per edit.
//!
//! # Pipeline Order
//!
//! ```text
//! Base → Template → Emphasis → Reference → List → Heading → Strikethrough
//!      → Superscript → Subscript → Underline → Link → Comment   (+ find overlay)
//! ```
//!
//! Each formatter clears only the tag families it owns over the extended range before applying
//! its spans, so a pass over unchanged text is a no-op.
//!
//! # Quick Start
//!
//! ```rust
//! use wikitext_core::{Tag, TaggedText};
//! use wikitext_highlight::{EditingSession, EditorConfig};
//!
//! let mut session = EditingSession::new("cat ''cat'' cat", EditorConfig::default()).unwrap();
//! assert!(session.selection_state(7..7).is_italics);
//!
//! assert_eq!(session.start_find("cat").unwrap(), 3);
//! session.find_next(None).unwrap();
//! assert!(session.document().has_tag(0, Tag::SelectedMatch));
//!
//! session.replace_all("dog").unwrap();
//! assert_eq!(session.text(), "dog ''dog'' dog");
//! ```

pub mod config;
pub mod error;
pub mod find;
pub mod formatter;
pub mod formatters;
pub mod pipeline;
pub mod session;
pub mod toggle;

pub use config::EditorConfig;
pub use error::HighlightError;
pub use find::{FindReplaceEngine, FindSession, FindState};
pub use formatter::{Formatter, FormatterKind, PIPELINE_ORDER};
pub use pipeline::FormatterPipeline;
pub use session::EditingSession;
pub use toggle::{Markup, ToggleAction, ToggleOutcome, toggle_formatting};
