//! Style configuration and preset tests.

use std::io::Write;

use marklog::config::TextAlign;
use marklog::{Error, Preset, StyleConfig, convert};
use tempfile::NamedTempFile;

// ============================================================================
// JSON loading
// ============================================================================

#[test]
fn test_partial_json_merges_over_defaults() {
    let config = StyleConfig::from_json(
        r##"{
            "global": { "contentLineHeight": "2.0" },
            "headers": { "h1": { "underlined": true, "underlineColor": "#00ff00" } },
            "content": { "bold": { "color": "#ff0000" }, "table": { "headerAlign": "center" } }
        }"##,
    )
    .unwrap();

    let defaults = StyleConfig::default();
    assert_eq!(config.global.content_line_height, "2.0");
    assert_eq!(config.global.font_family, defaults.global.font_family);
    assert!(config.headers.h1.underlined);
    assert_eq!(config.headers.h1.underline_color, "#00ff00");
    assert_eq!(config.headers.h1.font_size, defaults.headers.h1.font_size);
    assert_eq!(config.headers.h2, defaults.headers.h2);
    assert_eq!(config.content.bold.color, "#ff0000");
    assert_eq!(config.content.table.header_align, TextAlign::Center);
    assert_eq!(config.content.table.body_align, defaults.content.table.body_align);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(StyleConfig::from_json("{}").unwrap(), StyleConfig::default());
}

#[test]
fn test_invalid_json_is_config_error() {
    let err = StyleConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = StyleConfig::from_json(r#"{"content": {"table": {"bodyAlign": "justify"}}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_json_uses_camel_case_keys() {
    let json = StyleConfig::default().to_json_pretty().unwrap();
    for key in [
        "fontFamily",
        "headerLineHeight",
        "contentLineHeight",
        "underlineColor",
        "backgroundColor",
        "inlineCode",
        "headerBg",
        "separatorColor",
    ] {
        assert!(json.contains(&format!("\"{key}\"")), "missing {key}");
    }
    assert_eq!(StyleConfig::from_json(&json).unwrap(), StyleConfig::default());
}

#[test]
fn test_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r##"{{"content": {{"link": {{"color": "#123456"}}}}}}"##).unwrap();

    let config = StyleConfig::from_path(file.path()).unwrap();
    assert_eq!(config.content.link.color, "#123456");

    let html = convert("[x](https://example.com)", &config);
    assert!(html.contains("color: #123456;"));
}

#[test]
fn test_from_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StyleConfig::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn test_preset_names_round_trip() {
    for preset in Preset::ALL {
        assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        assert_eq!(preset.to_string(), preset.name());
    }
    assert_eq!(" Modern ".parse::<Preset>().unwrap(), Preset::Modern);
}

#[test]
fn test_unknown_preset() {
    let err = "fancy".parse::<Preset>().unwrap_err();
    assert!(matches!(err, Error::UnknownPreset(ref name) if name == "fancy"));
    assert!(err.to_string().contains("fancy"));
}

#[test]
fn test_default_preset_is_default_config() {
    assert_eq!(Preset::Default.config(), StyleConfig::default());
}

#[test]
fn test_presets_differ() {
    let configs: Vec<_> = Preset::ALL.iter().map(|p| p.config()).collect();
    for (i, a) in configs.iter().enumerate() {
        for b in &configs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_preset_applies_to_output() {
    let html = convert("`code`", &Preset::Modern.config());
    assert!(html.contains("background-color: #eef4ff;"));
    assert!(html.contains("color: #3b82f6;"));
}
