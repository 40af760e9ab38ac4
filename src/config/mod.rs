//! Style configuration for the HTML transformation engine.
//!
//! A [`StyleConfig`] is plain data: fonts and line heights shared by every
//! element, per-level heading styles, and colours for the content elements.
//! It serializes to the camelCase JSON shape used by saved settings, and every
//! field has a default so a partial JSON document only overrides what it
//! names.
//!
//! Optional colours (`bold`, `italic`, `highlight.color`) are empty strings
//! when unset; the engine then omits the colour (or writes `inherit`) rather
//! than picking one.

pub mod presets;

use std::fmt;
use std::path::Path;

use pulldown_cmark::HeadingLevel;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use presets::Preset;

/// Complete style configuration for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub global: GlobalStyle,
    pub headers: HeaderStyles,
    pub content: ContentStyles,
}

impl StyleConfig {
    /// Parse a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let config = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), "loaded style configuration");
        Ok(config)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Settings shared by every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalStyle {
    /// CSS font stack.
    pub font_family: String,
    /// Line height for headings.
    pub header_line_height: String,
    /// Line height for body content.
    pub content_line_height: String,
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            font_family: r#""NanumSquare", "NanumGothic", sans-serif"#.to_owned(),
            header_line_height: "1.4".to_owned(),
            content_line_height: "1.8".to_owned(),
        }
    }
}

/// Heading styles for `h1` through `h5`. `h6` is left unstyled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyles {
    pub h1: HeaderStyle,
    pub h2: HeaderStyle,
    pub h3: HeaderStyle,
    pub h4: HeaderStyle,
    pub h5: HeaderStyle,
}

impl HeaderStyles {
    pub fn level(&self, level: HeadingLevel) -> Option<&HeaderStyle> {
        match level {
            HeadingLevel::H1 => Some(&self.h1),
            HeadingLevel::H2 => Some(&self.h2),
            HeadingLevel::H3 => Some(&self.h3),
            HeadingLevel::H4 => Some(&self.h4),
            HeadingLevel::H5 => Some(&self.h5),
            HeadingLevel::H6 => None,
        }
    }

    /// Iterate mutably over all five levels, `h1` first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HeaderStyle> {
        [
            &mut self.h1,
            &mut self.h2,
            &mut self.h3,
            &mut self.h4,
            &mut self.h5,
        ]
        .into_iter()
    }
}

impl Default for HeaderStyles {
    fn default() -> Self {
        Self {
            h1: HeaderStyle::with_size("34px"),
            h2: HeaderStyle::with_size("28px"),
            h3: HeaderStyle::with_size("24px"),
            h4: HeaderStyle::with_size("19px"),
            h5: HeaderStyle::with_size("16px"),
        }
    }
}

/// Style of one heading level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderStyle {
    pub color: String,
    pub font_size: String,
    pub font_weight: String,
    /// Render the heading as a full-width table with a bottom border.
    pub underlined: bool,
    /// Table background when underlined.
    pub background_color: String,
    /// Border colour when underlined.
    pub underline_color: String,
}

impl HeaderStyle {
    fn with_size(font_size: &str) -> Self {
        Self {
            font_size: font_size.to_owned(),
            ..Self::default()
        }
    }

    /// Underline colour, falling back to the text colour.
    pub fn effective_underline_color(&self) -> &str {
        non_empty(&self.underline_color).unwrap_or(&self.color)
    }

    /// Underlined table background, falling back to white.
    pub fn effective_background_color(&self) -> &str {
        non_empty(&self.background_color).unwrap_or("#ffffff")
    }
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            font_size: "16px".to_owned(),
            font_weight: "bold".to_owned(),
            underlined: false,
            background_color: "#ffffff".to_owned(),
            underline_color: "#000000".to_owned(),
        }
    }
}

/// Styles for body content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentStyles {
    pub blockquote: BlockquoteStyle,
    pub inline_code: InlineCodeStyle,
    pub table: TableStyle,
    pub link: LinkStyle,
    pub highlight: HighlightStyle,
    pub paragraph: ParagraphStyle,
    pub bold: TextColor,
    pub italic: TextColor,
    pub footnotes: FootnoteStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockquoteStyle {
    pub bg: String,
    pub border: String,
    pub color: String,
}

impl Default for BlockquoteStyle {
    fn default() -> Self {
        Self {
            bg: "#f6f8fa".to_owned(),
            border: "#0366d6".to_owned(),
            color: "#24292e".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineCodeStyle {
    pub bg: String,
    pub color: String,
}

impl Default for InlineCodeStyle {
    fn default() -> Self {
        Self {
            bg: "#f4f4f4".to_owned(),
            color: "#000000".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableStyle {
    pub header_bg: String,
    pub border_color: String,
    pub header_align: TextAlign,
    pub body_align: TextAlign,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_bg: "#f6f8fa".to_owned(),
            border_color: "#ddd".to_owned(),
            header_align: TextAlign::Left,
            body_align: TextAlign::Left,
        }
    }
}

/// Horizontal alignment of table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
    pub color: String,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            color: "#0366d6".to_owned(),
        }
    }
}

/// `==highlight==` colours. An empty `color` inherits the surrounding text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub bg: String,
    pub color: String,
}

impl HighlightStyle {
    pub fn effective_color(&self) -> &str {
        non_empty(&self.color).unwrap_or("inherit")
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            bg: "#fff8b2".to_owned(),
            color: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub color: String,
    pub font_size: String,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            font_size: "15px".to_owned(),
        }
    }
}

/// Optional text colour for `strong`/`em`; empty means inherit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextColor {
    pub color: String,
}

impl TextColor {
    pub fn get(&self) -> Option<&str> {
        non_empty(&self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FootnoteStyle {
    pub separator_color: String,
    pub font_size: String,
    pub color: String,
}

impl Default for FootnoteStyle {
    fn default() -> Self {
        Self {
            separator_color: "#dbdbdb".to_owned(),
            font_size: "13px".to_owned(),
            color: "#333333".to_owned(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StyleConfig::default();
        assert_eq!(config.global.header_line_height, "1.4");
        assert_eq!(config.global.content_line_height, "1.8");
        assert_eq!(config.headers.h1.font_size, "34px");
        assert_eq!(config.headers.h4.font_size, "19px");
        assert_eq!(config.content.table.border_color, "#ddd");
        assert_eq!(config.content.highlight.bg, "#fff8b2");
        assert!(config.content.bold.get().is_none());
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let json = r##"{
            "headers": { "h2": { "underlined": true, "underlineColor": "" } },
            "content": { "bold": { "color": "#ff0000" }, "table": { "headerAlign": "center" } }
        }"##;
        let config = StyleConfig::from_json(json).unwrap();

        assert!(config.headers.h2.underlined);
        assert_eq!(config.headers.h2.effective_underline_color(), "#000000");
        // untouched levels keep their own defaults
        assert_eq!(config.headers.h1.font_size, "34px");
        assert_eq!(config.content.bold.get(), Some("#ff0000"));
        assert_eq!(config.content.table.header_align, TextAlign::Center);
        assert_eq!(config.content.table.body_align, TextAlign::Left);
        assert_eq!(config.global, GlobalStyle::default());
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let json = StyleConfig::default().to_json_pretty().unwrap();
        assert!(json.contains("\"fontFamily\""));
        assert!(json.contains("\"headerLineHeight\""));
        assert!(json.contains("\"inlineCode\""));
        assert!(json.contains("\"separatorColor\""));
        assert!(json.contains("\"headerAlign\": \"left\""));
    }

    #[test]
    fn test_json_round_trip() {
        let config = Preset::Modern.config();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(StyleConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        let err = StyleConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = StyleConfig::from_json(r#"{"content": {"table": {"bodyAlign": "justify"}}}"#)
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r##"{"content": {"link": {"color": "#123456"}}}"##).unwrap();

        let config = StyleConfig::from_path(&path).unwrap();
        assert_eq!(config.content.link.color, "#123456");

        let missing = StyleConfig::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, crate::Error::Io(_)));
    }

    #[test]
    fn test_header_fallbacks() {
        let style = HeaderStyle {
            color: "#2c3e50".to_owned(),
            background_color: " ".to_owned(),
            underline_color: String::new(),
            ..HeaderStyle::default()
        };
        assert_eq!(style.effective_underline_color(), "#2c3e50");
        assert_eq!(style.effective_background_color(), "#ffffff");
    }

    #[test]
    fn test_highlight_color_inherits() {
        assert_eq!(HighlightStyle::default().effective_color(), "inherit");
    }
}
