//! Theme configuration.
//!
//! A [`Theme`] maps each tag family to a color; [`ThemeFonts`] maps emphasis and heading classes
//! to fonts for one base text size. Both are plain values handed to the
//! [`StyleResolver`](crate::StyleResolver); nothing here is global.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::tags::{ColorFamily, HeadingLevel};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ThemeError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }

        let channel =
            |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colors per tag family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Untagged text.
    pub text: Color,
    /// Editor background.
    pub background: Color,
    /// Generic wiki markup delimiters.
    pub orange: Color,
    /// Reference and inline-tag delimiters.
    pub green: Color,
    /// Links.
    pub blue: Color,
    /// Templates.
    pub purple: Color,
    /// Comments.
    pub gray: Color,
    /// Foreground of every find-session match.
    pub match_foreground: Color,
    /// Background of unselected matches.
    pub match_background: Color,
    /// Background of the selected match.
    pub selected_match_background: Color,
    /// Background of replaced ranges.
    pub replaced_match_background: Color,
}

impl ThemeColors {
    /// Color for a delimiter family.
    pub fn for_family(&self, family: ColorFamily) -> Color {
        match family {
            ColorFamily::Orange => self.orange,
            ColorFamily::Green => self.green,
            ColorFamily::Blue => self.blue,
            ColorFamily::Purple => self.purple,
            ColorFamily::Gray => self.gray,
        }
    }

    /// The same palette with every markup color replaced by the text color.
    ///
    /// Find-session colors are kept.
    pub fn without_syntax_highlighting(&self) -> Self {
        Self {
            orange: self.text,
            green: self.text,
            blue: self.text,
            purple: self.text,
            gray: self.text,
            ..self.clone()
        }
    }
}

/// A named color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name.
    pub name: String,
    /// Palette.
    pub colors: ThemeColors,
}

impl Theme {
    /// Built-in light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            colors: ThemeColors {
                text: Color::rgb(0x20, 0x21, 0x22),
                background: Color::rgb(0xff, 0xff, 0xff),
                orange: Color::rgb(0xac, 0x66, 0x00),
                green: Color::rgb(0x00, 0x8a, 0x54),
                blue: Color::rgb(0x33, 0x66, 0xcc),
                purple: Color::rgb(0x6b, 0x4b, 0xa1),
                gray: Color::rgb(0x72, 0x77, 0x7d),
                match_foreground: Color::rgb(0x00, 0x00, 0x00),
                match_background: Color::rgba(0xff, 0xcc, 0x33, 0x4d),
                selected_match_background: Color::rgb(0xff, 0xcc, 0x33),
                replaced_match_background: Color::rgba(0x14, 0x86, 0x6d, 0x4d),
            },
        }
    }

    /// Built-in dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors {
                text: Color::rgb(0xea, 0xec, 0xf0),
                background: Color::rgb(0x10, 0x14, 0x18),
                orange: Color::rgb(0xff, 0xcc, 0x33),
                green: Color::rgb(0x00, 0x8a, 0x54),
                blue: Color::rgb(0x6d, 0x8a, 0xf0),
                purple: Color::rgb(0xfe, 0xd8, 0xd8),
                gray: Color::rgb(0xa2, 0xa9, 0xb1),
                match_foreground: Color::rgb(0x00, 0x00, 0x00),
                match_background: Color::rgba(0xff, 0xcc, 0x33, 0x80),
                selected_match_background: Color::rgb(0xff, 0xcc, 0x33),
                replaced_match_background: Color::rgba(0x14, 0x86, 0x6d, 0x80),
            },
        }
    }

    /// Parse a theme from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize the theme to YAML.
    pub fn to_yaml_string(&self) -> Result<String, ThemeError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Body weight.
    Regular,
    /// Heading weight.
    Semibold,
    /// Bold.
    Bold,
}

/// A font request: the rendering backend picks the concrete face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Point size.
    pub size: f32,
    /// Weight.
    pub weight: FontWeight,
    /// Italic.
    pub italic: bool,
}

impl Font {
    /// Regular upright font of `size`.
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            italic: false,
        }
    }
}

/// Default body text size; the heading sizes are designed against it.
pub const DESIGN_TEXT_SIZE: f32 = 16.0;
/// Heading sizes at [`DESIGN_TEXT_SIZE`], `Level1` first.
const HEADING_DESIGN_SIZES: [f32; 5] = [28.0, 26.0, 24.0, 22.0, 20.0];

/// Fonts per emphasis and heading class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    /// Untagged text.
    pub base: Font,
    /// Bold content.
    pub bold: Font,
    /// Italic content.
    pub italic: Font,
    /// Bold-italic content.
    pub bold_italic: Font,
    /// Heading content, `Level1` first.
    pub headings: [Font; 5],
}

impl ThemeFonts {
    /// Derive every font from one body text size.
    pub fn for_text_size(size: f32) -> Result<Self, ThemeError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ThemeError::InvalidTextSize(size));
        }

        let scale = size / DESIGN_TEXT_SIZE;
        let headings = HEADING_DESIGN_SIZES.map(|design| Font {
            size: design * scale,
            weight: FontWeight::Semibold,
            italic: false,
        });

        Ok(Self {
            base: Font::regular(size),
            bold: Font {
                weight: FontWeight::Bold,
                ..Font::regular(size)
            },
            italic: Font {
                italic: true,
                ..Font::regular(size)
            },
            bold_italic: Font {
                size,
                weight: FontWeight::Bold,
                italic: true,
            },
            headings,
        })
    }

    /// Every class rendered with the base font.
    pub fn without_syntax_highlighting(&self) -> Self {
        Self {
            base: self.base,
            bold: self.base,
            italic: self.base,
            bold_italic: self.base,
            headings: [self.base; 5],
        }
    }

    /// Font for a heading level.
    pub fn heading(&self, level: HeadingLevel) -> Font {
        self.headings[level.index()]
    }
}

impl Default for ThemeFonts {
    fn default() -> Self {
        let base = Font::regular(DESIGN_TEXT_SIZE);
        Self {
            base,
            bold: Font {
                weight: FontWeight::Bold,
                ..base
            },
            italic: Font {
                italic: true,
                ..base
            },
            bold_italic: Font {
                size: DESIGN_TEXT_SIZE,
                weight: FontWeight::Bold,
                italic: true,
            },
            headings: HEADING_DESIGN_SIZES.map(|size| Font {
                size,
                weight: FontWeight::Semibold,
                italic: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let color: Color = "#3366CC".parse().unwrap();
        assert_eq!(color, Color::rgb(0x33, 0x66, 0xcc));
        assert_eq!(color.to_string(), "#3366CC");

        let translucent: Color = "#FFCC334D".parse().unwrap();
        assert_eq!(translucent.a, 0x4d);
        assert_eq!(translucent.to_string(), "#FFCC334D");

        assert!("3366CC".parse::<Color>().is_err());
        assert!("#33G6CC".parse::<Color>().is_err());
        assert!("#36C".parse::<Color>().is_err());
    }

    #[test]
    fn test_theme_yaml_round_trip() {
        let theme = Theme::dark();
        let yaml = theme.to_yaml_string().unwrap();
        assert!(yaml.contains("orange: '#FFCC33'") || yaml.contains("orange: \"#FFCC33\""));
        assert_eq!(Theme::from_yaml_str(&yaml).unwrap(), theme);
    }

    #[test]
    fn test_theme_yaml_rejects_bad_color() {
        let yaml = Theme::light()
            .to_yaml_string()
            .unwrap()
            .replace("#3366CC", "blue");
        assert!(matches!(
            Theme::from_yaml_str(&yaml),
            Err(ThemeError::Yaml(_))
        ));
    }

    #[test]
    fn test_fonts_scale_with_text_size() {
        let fonts = ThemeFonts::for_text_size(32.0).unwrap();
        assert_eq!(fonts.base.size, 32.0);
        assert_eq!(fonts.heading(HeadingLevel::Level1).size, 56.0);
        assert_eq!(fonts.heading(HeadingLevel::Level5).size, 40.0);
        assert!(fonts.bold_italic.italic);

        assert!(ThemeFonts::for_text_size(0.0).is_err());
        assert!(ThemeFonts::for_text_size(f32::NAN).is_err());
    }

    #[test]
    fn test_without_syntax_highlighting() {
        let colors = Theme::light().colors.without_syntax_highlighting();
        assert_eq!(colors.for_family(ColorFamily::Blue), colors.text);
        assert_ne!(colors.selected_match_background, colors.text);

        let fonts = ThemeFonts::default().without_syntax_highlighting();
        assert_eq!(fonts.heading(HeadingLevel::Level2), fonts.base);
    }
}
