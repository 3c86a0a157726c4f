//! Editor configuration loaded from YAML.

use serde::{Deserialize, Serialize};
use wikitext_core::{DESIGN_TEXT_SIZE, SearchOptions, Theme, ThemeFonts};

use crate::error::HighlightError;

/// Editor configuration, passed to [`EditingSession::new`](crate::EditingSession::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color theme.
    pub theme: Theme,
    /// Body text size in points. Heading sizes scale from it.
    pub text_size: f32,
    /// Render markup colors and fonts. When off, tags are still computed.
    pub syntax_highlighting: bool,
    /// Match case in find sessions.
    pub case_sensitive_search: bool,
    /// Escape regex metacharacters in find sessions.
    pub literal_search: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            text_size: DESIGN_TEXT_SIZE,
            syntax_highlighting: true,
            case_sensitive_search: false,
            literal_search: false,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HighlightError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.fonts()?;
        Ok(config)
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, HighlightError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fonts derived from [`text_size`](Self::text_size).
    pub fn fonts(&self) -> Result<ThemeFonts, HighlightError> {
        Ok(ThemeFonts::for_text_size(self.text_size)?)
    }

    /// Options for new find sessions.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            case_sensitive: self.case_sensitive_search,
            literal: self.literal_search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikitext_core::ThemeError;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config =
            EditorConfig::from_yaml_str("text_size: 20.0\nliteral_search: true\n").unwrap();
        assert_eq!(config.text_size, 20.0);
        assert!(config.syntax_highlighting);
        assert!(config.search_options().literal);
        assert_eq!(config.theme, Theme::light());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = EditorConfig {
            theme: Theme::dark(),
            ..EditorConfig::default()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(EditorConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_text_size() {
        let err = EditorConfig::from_yaml_str("text_size: -1.0").unwrap_err();
        assert!(matches!(
            err,
            HighlightError::Theme(ThemeError::InvalidTextSize(_))
        ));
    }
}
