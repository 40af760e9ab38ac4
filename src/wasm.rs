//! WASM bindings for converting in the browser.

use wasm_bindgen::prelude::*;

use crate::{StyleConfig, convert};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert Markdown to editor HTML.
///
/// `config_json` is a (possibly partial) style configuration in the saved
/// settings format; pass an empty string for the defaults.
#[wasm_bindgen]
pub fn convert_markdown(markdown: &str, config_json: &str) -> Result<String, JsValue> {
    let config = if config_json.trim().is_empty() {
        StyleConfig::default()
    } else {
        StyleConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    Ok(convert(markdown, &config))
}

/// The default style configuration as JSON.
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    StyleConfig::default()
        .to_json_pretty()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
