//! # marklog
//!
//! Convert Markdown into self-contained, inline-styled HTML that the Naver
//! Blog SmartEditor accepts when pasted.
//!
//! ## Pipeline
//!
//! 1. [`markdown::preprocess()`] - blank-line spacers and `==highlight==`
//! 2. [`markdown::render`] - pulldown-cmark with ATX-only headings and
//!    link-free footnotes
//! 3. [`sanitize::sanitize`] - ammonia allow-list
//! 4. [`transform::transform`] - inline styles and editor-specific markup
//!
//! ## Quick Start
//!
//! ```
//! use marklog::{Preset, StyleConfig, convert};
//!
//! let html = convert("Some **bold** text.", &StyleConfig::default());
//! assert!(html.contains("font-weight: bold"));
//!
//! let modern = Preset::Modern.config();
//! let html = convert("> [!tip] Use presets", &modern);
//! assert!(html.contains("Use presets"));
//! ```
//!
//! A [`Converter`] keeps the configuration and highlighter together for
//! repeated conversions.

pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod markdown;
pub mod sanitize;
pub mod transform;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{Preset, StyleConfig};
pub use error::{Error, HighlightError, Result};
pub use highlight::{Highlighter, SyntectHighlighter};
pub use markdown::RenderedMarkdown;
pub use util::decode_text;

/// Markdown to editor HTML with a fixed style configuration.
pub struct Converter {
    config: StyleConfig,
    highlighter: Box<dyn Highlighter>,
}

impl Converter {
    /// Converter using the syntect highlighter.
    pub fn new(config: StyleConfig) -> Self {
        Self {
            config,
            highlighter: Box::new(SyntectHighlighter::new()),
        }
    }

    /// Replace the code-block highlighter.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Preprocess and render to raw, unsanitized HTML.
    pub fn render_markdown(&self, markdown: &str) -> RenderedMarkdown {
        markdown::render(&markdown::preprocess(markdown))
    }

    /// Run the whole pipeline.
    pub fn convert(&self, markdown: &str) -> String {
        run_pipeline(markdown, &self.config, self.highlighter.as_ref())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(StyleConfig::default())
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Convert Markdown with `config` and the built-in highlighter.
pub fn convert(markdown: &str, config: &StyleConfig) -> String {
    run_pipeline(markdown, config, &SyntectHighlighter::new())
}

fn run_pipeline(markdown: &str, config: &StyleConfig, highlighter: &dyn Highlighter) -> String {
    let rendered = markdown::render(&markdown::preprocess(markdown));
    let clean = sanitize::sanitize(&rendered.html);
    let html = transform::transform_with(&clean, config, highlighter);
    tracing::debug!(
        input = markdown.len(),
        output = html.len(),
        footnotes = rendered.footnotes.len(),
        "converted markdown"
    );
    html
}
