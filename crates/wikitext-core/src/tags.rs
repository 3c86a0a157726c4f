//! Semantic tags attached to document spans.
//!
//! Tags are partitioned into [`TagFamily`] values. Within one family, at most one member may
//! cover any given character offset; members of different families combine freely (a character
//! can be `Bold`, `Color(Orange)` and `Heading(Level2)` at the same time).
//!
//! - **Emphasis**: [`Tag::Bold`], [`Tag::Italic`], [`Tag::BoldItalic`]
//! - **Delimiter colors**: one family per [`ColorFamily`], purely cosmetic
//! - **Content**: headings, lists, references, inline tags, links, comments, templates
//! - **Find**: transient [`Tag::Match`] / [`Tag::SelectedMatch`] / [`Tag::ReplacedMatch`]

/// Delimiter color classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorFamily {
    /// Generic wiki markup (apostrophes, heading `=`, list markers).
    Orange,
    /// `<ref>`, `<s>`, `<u>`, `<sub>`, `<sup>`.
    Green,
    /// Links.
    Blue,
    /// Templates.
    Purple,
    /// Comments.
    Gray,
}

impl ColorFamily {
    /// Every color family, in resolver precedence order (lowest first).
    pub const ALL: [ColorFamily; 5] = [
        ColorFamily::Purple,
        ColorFamily::Orange,
        ColorFamily::Green,
        ColorFamily::Blue,
        ColorFamily::Gray,
    ];
}

/// Heading level. `Level1` is written `== x ==`, `Level5` is `====== x ======`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    /// `==`
    Level1,
    /// `===`
    Level2,
    /// `====`
    Level3,
    /// `=====`
    Level4,
    /// `======`
    Level5,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 5] = [
        HeadingLevel::Level1,
        HeadingLevel::Level2,
        HeadingLevel::Level3,
        HeadingLevel::Level4,
        HeadingLevel::Level5,
    ];

    /// Number of `=` characters on each side of the heading text.
    pub fn delimiter_len(self) -> usize {
        match self {
            HeadingLevel::Level1 => 2,
            HeadingLevel::Level2 => 3,
            HeadingLevel::Level3 => 4,
            HeadingLevel::Level4 => 5,
            HeadingLevel::Level5 => 6,
        }
    }

    /// Zero-based index into [`HeadingLevel::ALL`].
    pub fn index(self) -> usize {
        self.delimiter_len() - 2
    }
}

/// List marker depth (`*` vs `**`, `#` vs `##`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListDepth {
    /// A single marker.
    Single,
    /// Two or more markers.
    Multiple,
}

/// A semantic marker attached to a text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// `'''x'''` content.
    Bold,
    /// `''x''` content.
    Italic,
    /// `'''''x'''''` content, or the overlap of nested bold and italic runs.
    BoldItalic,
    /// Delimiter color.
    Color(ColorFamily),
    /// Heading content.
    Heading(HeadingLevel),
    /// `*` list line.
    BulletList(ListDepth),
    /// `#` list line.
    NumberList(ListDepth),
    /// `<ref>` content.
    Reference,
    /// `<s>` content.
    Strikethrough,
    /// `<u>` content.
    Underline,
    /// `<sub>` content.
    Subscript,
    /// `<sup>` content.
    Superscript,
    /// `[[A]]` / `[[A|B]]` without inner links.
    SimpleLink,
    /// `[[A|...[[B]]...]]`.
    LinkWithNestedLink,
    /// `<!-- x -->` content.
    CommentContent,
    /// Single-line `{{...}}`.
    TemplateHorizontal,
    /// One line of a multi-line template.
    TemplateVertical,
    /// Find-session match.
    Match,
    /// The currently selected find-session match.
    SelectedMatch,
    /// A range produced by a replace.
    ReplacedMatch,
}

/// Mutually-exclusive tag families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagFamily {
    /// Bold / italic / bold-italic.
    Emphasis,
    /// A delimiter color.
    Color(ColorFamily),
    /// Headings.
    Heading,
    /// Bullet lists.
    BulletList,
    /// Numbered lists.
    NumberList,
    /// References.
    Reference,
    /// Strikethrough.
    Strikethrough,
    /// Underline.
    Underline,
    /// Subscript.
    Subscript,
    /// Superscript.
    Superscript,
    /// Simple and nested links.
    Link,
    /// Comment content.
    Comment,
    /// Horizontal and vertical templates.
    Template,
    /// Transient find-session tags.
    Find,
}

impl TagFamily {
    /// All delimiter color families.
    pub const COLORS: [TagFamily; 5] = [
        TagFamily::Color(ColorFamily::Orange),
        TagFamily::Color(ColorFamily::Green),
        TagFamily::Color(ColorFamily::Blue),
        TagFamily::Color(ColorFamily::Purple),
        TagFamily::Color(ColorFamily::Gray),
    ];
}

impl Tag {
    /// The family this tag belongs to.
    pub fn family(self) -> TagFamily {
        match self {
            Tag::Bold | Tag::Italic | Tag::BoldItalic => TagFamily::Emphasis,
            Tag::Color(color) => TagFamily::Color(color),
            Tag::Heading(_) => TagFamily::Heading,
            Tag::BulletList(_) => TagFamily::BulletList,
            Tag::NumberList(_) => TagFamily::NumberList,
            Tag::Reference => TagFamily::Reference,
            Tag::Strikethrough => TagFamily::Strikethrough,
            Tag::Underline => TagFamily::Underline,
            Tag::Subscript => TagFamily::Subscript,
            Tag::Superscript => TagFamily::Superscript,
            Tag::SimpleLink | Tag::LinkWithNestedLink => TagFamily::Link,
            Tag::CommentContent => TagFamily::Comment,
            Tag::TemplateHorizontal | Tag::TemplateVertical => TagFamily::Template,
            Tag::Match | Tag::SelectedMatch | Tag::ReplacedMatch => TagFamily::Find,
        }
    }

    /// Returns `true` for transient find-session tags.
    pub fn is_find(self) -> bool {
        self.family() == TagFamily::Find
    }
}
