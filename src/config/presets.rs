//! Built-in style presets.

use std::fmt;
use std::str::FromStr;

use super::{BlockquoteStyle, HighlightStyle, InlineCodeStyle, StyleConfig, TableStyle, TextAlign};
use crate::error::Error;

/// A named, built-in [`StyleConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Sans-serif, black headings, blue accents.
    #[default]
    Default,
    /// Serif body with muted grey tones.
    Classic,
    /// Larger slate headings with blue inline code and links.
    Modern,
    /// Black and white.
    Minimal,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Default,
        Preset::Classic,
        Preset::Modern,
        Preset::Minimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Classic => "classic",
            Preset::Modern => "modern",
            Preset::Minimal => "minimal",
        }
    }

    /// Build the preset's configuration.
    pub fn config(self) -> StyleConfig {
        let mut config = StyleConfig::default();
        match self {
            Preset::Default => {}
            Preset::Classic => {
                config.global.font_family = r#""NanumMyeongjo", "Batang", serif"#.to_owned();
                config.global.header_line_height = "1.5".to_owned();
                config.global.content_line_height = "1.9".to_owned();
                set_headers(&mut config, "#333333", ["30px", "26px", "22px", "18px", "16px"]);
                config.content.paragraph.color = "#333333".to_owned();
                config.content.blockquote = BlockquoteStyle {
                    bg: "#f9f9f9".to_owned(),
                    border: "#999".to_owned(),
                    color: "#555".to_owned(),
                };
                config.content.link.color = "#444".to_owned();
            }
            Preset::Modern => {
                config.global.font_family = r#""NanumSquare", "Pretendard", sans-serif"#.to_owned();
                set_headers(&mut config, "#2c3e50", ["36px", "30px", "26px", "20px", "18px"]);
                config.content.inline_code = InlineCodeStyle {
                    bg: "#eef4ff".to_owned(),
                    color: "#3b82f6".to_owned(),
                };
                config.content.link.color = "#2563eb".to_owned();
                config.content.blockquote = BlockquoteStyle {
                    bg: "#f1f5f9".to_owned(),
                    border: "#cbd5e1".to_owned(),
                    color: "#475569".to_owned(),
                };
                config.content.highlight.bg = "#bae6fd".to_owned();
            }
            Preset::Minimal => {
                set_headers(&mut config, "#000000", ["32px", "26px", "22px", "18px", "16px"]);
                config.content.paragraph.color = "#111".to_owned();
                config.content.blockquote = BlockquoteStyle {
                    bg: "#ffffff".to_owned(),
                    border: "#000000".to_owned(),
                    color: "#000000".to_owned(),
                };
                config.content.inline_code = InlineCodeStyle {
                    bg: "#f0f0f0".to_owned(),
                    color: "#000000".to_owned(),
                };
                config.content.link.color = "#000000".to_owned();
                config.content.highlight = HighlightStyle {
                    bg: "#e0e0e0".to_owned(),
                    color: "#000000".to_owned(),
                };
                config.content.table = TableStyle {
                    header_bg: "#ffffff".to_owned(),
                    border_color: "#000000".to_owned(),
                    header_align: TextAlign::Left,
                    body_align: TextAlign::Left,
                };
            }
        }
        config
    }
}

fn set_headers(config: &mut StyleConfig, color: &str, sizes: [&str; 5]) {
    for (header, size) in config.headers.iter_mut().zip(sizes) {
        header.color = color.to_owned();
        header.font_size = size.to_owned();
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_is_default_config() {
        assert_eq!(Preset::Default.config(), StyleConfig::default());
    }

    #[test]
    fn test_classic() {
        let config = Preset::Classic.config();
        assert!(config.global.font_family.contains("NanumMyeongjo"));
        assert_eq!(config.global.content_line_height, "1.9");
        assert_eq!(config.headers.h1.font_size, "30px");
        assert_eq!(config.headers.h5.color, "#333333");
        // weight and underline settings are inherited from the defaults
        assert_eq!(config.headers.h3.font_weight, "bold");
        assert_eq!(config.content.inline_code, InlineCodeStyle::default());
    }

    #[test]
    fn test_modern_and_minimal() {
        let modern = Preset::Modern.config();
        assert_eq!(modern.headers.h1.font_size, "36px");
        assert_eq!(modern.content.highlight.bg, "#bae6fd");
        assert_eq!(modern.content.highlight.color, "");

        let minimal = Preset::Minimal.config();
        assert_eq!(minimal.global, StyleConfig::default().global);
        assert_eq!(minimal.content.table.border_color, "#000000");
        assert_eq!(minimal.content.highlight.effective_color(), "#000000");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Modern".parse::<Preset>().unwrap(), Preset::Modern);
        assert_eq!(" minimal ".parse::<Preset>().unwrap(), Preset::Minimal);
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }

        let err = "fancy".parse::<Preset>().unwrap_err();
        assert!(matches!(err, Error::UnknownPreset(name) if name == "fancy"));
    }
}
