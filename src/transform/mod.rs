//! HTML transformation engine.
//!
//! Rewrites sanitized HTML into the inline-styled dialect the editor
//! accepts. The document is parsed into an arena once and rewritten by four
//! passes, each run exactly once in this order:
//!
//! 1. **Styles** - inline `style` on every recognised element; underlined
//!    headings and `mark` are replaced
//! 2. **Lists** - editor list classes and `li > p > span` wrapping
//! 3. **Blockquotes** - plain quotes to `div`, `[!type]` callouts to tables
//! 4. **Code** - highlighted, colour-inlined code tables
//!
//! The input must already be sanitized; nothing here filters markup.

mod callout;
mod code;
mod lists;
mod pass;
mod styles;

pub use callout::{callout_color, callout_icon};
pub use code::{language_label, token_color};

use crate::config::StyleConfig;
use crate::dom::{self, inner_html};
use crate::highlight::{Highlighter, SyntectHighlighter};

/// Transform with the built-in syntect highlighter.
pub fn transform(html: &str, config: &StyleConfig) -> String {
    transform_with(html, config, &SyntectHighlighter::new())
}

/// Transform using `highlighter` for code blocks. Returns the body markup.
pub fn transform_with(html: &str, config: &StyleConfig, highlighter: &dyn Highlighter) -> String {
    let mut dom = dom::parse_html(html);
    let Some(body) = dom::body(&dom) else {
        return String::new();
    };

    styles::apply_styles(&mut dom, body, config);
    lists::restructure_lists(&mut dom, body, config);
    callout::convert_blockquotes(&mut dom, body, config);
    code::convert_code_blocks(&mut dom, body, highlighter);

    inner_html(&dom, body)
}
