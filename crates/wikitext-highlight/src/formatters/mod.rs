//! The built-in formatters, one per markup category.

mod base;
mod comment;
mod emphasis;
mod heading;
mod link;
mod list;
mod paired_tag;
mod reference;
mod template;

pub use base::BaseFormatter;
pub use comment::CommentFormatter;
pub use emphasis::EmphasisFormatter;
pub use heading::HeadingFormatter;
pub use link::LinkFormatter;
pub use list::ListFormatter;
pub use paired_tag::PairedTagFormatter;
pub use reference::ReferenceFormatter;
pub use template::TemplateFormatter;

use crate::error::HighlightError;
use crate::formatter::{Formatter, FormatterKind};

/// Construct the built-in formatter for `kind`.
pub fn build(kind: FormatterKind) -> Result<Box<dyn Formatter>, HighlightError> {
    Ok(match kind {
        FormatterKind::Base => Box::new(BaseFormatter),
        FormatterKind::Template => Box::new(TemplateFormatter::new()?),
        FormatterKind::Emphasis => Box::new(EmphasisFormatter::new()?),
        FormatterKind::Reference => Box::new(ReferenceFormatter::new()?),
        FormatterKind::List => Box::new(ListFormatter::new()?),
        FormatterKind::Heading => Box::new(HeadingFormatter::new()?),
        FormatterKind::Strikethrough => Box::new(PairedTagFormatter::strikethrough()?),
        FormatterKind::Superscript => Box::new(PairedTagFormatter::superscript()?),
        FormatterKind::Subscript => Box::new(PairedTagFormatter::subscript()?),
        FormatterKind::Underline => Box::new(PairedTagFormatter::underline()?),
        FormatterKind::Link => Box::new(LinkFormatter::new()?),
        FormatterKind::Comment => Box::new(CommentFormatter::new()?),
    })
}
