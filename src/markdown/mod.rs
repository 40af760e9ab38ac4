//! Markdown to raw HTML.
//!
//! pulldown-cmark does the parsing; this module layers the dialect on top:
//!
//! - [`preprocess`]: blank-line spacers and `==highlight==`, at the string level
//! - [`heading`]: ATX-only headings
//! - [`footnote`]: `[^id]` references and the appended definitions block
//!
//! Soft line breaks render as `<br>`, matching how the editor shows a single
//! newline. The output is not sanitized.

pub mod footnote;
pub mod heading;
pub mod preprocess;

use pulldown_cmark::{Event, Options, Parser, TextMergeStream, html};

pub use footnote::FootnoteTable;
pub use preprocess::preprocess;

use footnote::FootnoteReferences;
use heading::AtxHeadings;

/// Raw HTML of one render and the footnotes it collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub footnotes: FootnoteTable,
}

/// Parser extensions: GFM tables, strikethrough and task lists.
///
/// Footnotes and GFM alerts are left off so `[^id]` and `[!type]` reach the
/// footnote adapter and the callout pass as plain text.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render Markdown (already preprocessed) to HTML, followed by the footnote
/// block when any definitions were found.
pub fn render(markdown: &str) -> RenderedMarkdown {
    let (body, footnotes) = footnote::extract_definitions(markdown);

    let mut html = String::with_capacity(body.len() + body.len() / 2);
    push_html(&mut html, &body);
    html.push_str(&footnote::render_section(&footnotes));

    tracing::debug!(
        footnotes = footnotes.len(),
        bytes = html.len(),
        "rendered markdown"
    );
    RenderedMarkdown { html, footnotes }
}

fn push_html(out: &mut String, markdown: &str) {
    let parser = Parser::new_ext(markdown, parser_options()).into_offset_iter();
    let events = AtxHeadings::new(markdown, parser);
    let events = FootnoteReferences::new(TextMergeStream::new(events));
    let events = events.map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    html::push_html(out, events);
}

/// Render a short snippet without its wrapping paragraph.
pub(crate) fn render_inline(markdown: &str) -> String {
    let mut html = String::new();
    push_html(&mut html, markdown);

    let trimmed = html.trim_end();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|inner| inner.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_owned(),
        _ => trimmed.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(markdown: &str) -> String {
        render(markdown).html
    }

    #[test]
    fn test_soft_breaks_become_br() {
        assert_eq!(html("one\ntwo"), "<p>one<br />\ntwo</p>\n");
    }

    #[test]
    fn test_gfm_extensions() {
        assert!(html("~~gone~~").contains("<del>gone</del>"));
        assert!(html("- [x] done").contains("checkbox"));
        assert!(html("| a |\n|---|\n| b |").contains("<table>"));
    }

    #[test]
    fn test_callout_marker_stays_literal() {
        assert_eq!(
            html("> [!warning] Careful"),
            "<blockquote>\n<p>[!warning] Careful</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_footnote_reference_and_section() {
        let rendered = render("Fact[^1].\n\n[^1]: Source.");
        assert_eq!(
            rendered.html,
            "<p>Fact<sup>[1]</sup>.</p>\n\
             <div class=\"footnotes\"><div class=\"footnote-item\" id=\"fn-1\">[1] Source.</div></div>\n"
        );
        assert_eq!(rendered.footnotes.len(), 1);
    }

    #[test]
    fn test_footnote_reference_in_code_untouched() {
        assert_eq!(html("`[^1]`"), "<p><code>[^1]</code></p>\n");
        assert_eq!(
            html("```\n[^1] x\n```"),
            "<pre><code>[^1] x\n</code></pre>\n"
        );
    }

    #[test]
    fn test_footnote_order_by_first_definition() {
        let rendered = render("[^b]: first\n[^a]: alpha\n[^b]: second\n");
        let ids: Vec<_> = rendered.footnotes.iter().collect();
        assert_eq!(ids, [("b", "second"), ("a", "alpha")]);
        let b = rendered.html.find("fn-b").unwrap();
        let a = rendered.html.find("fn-a").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_render_inline() {
        assert_eq!(render_inline("plain *text*"), "plain <em>text</em>");
        assert_eq!(render_inline("- item"), "<ul>\n<li>item</li>\n</ul>");
    }

    #[test]
    fn test_each_render_has_its_own_table() {
        let first = render("[^x]: one");
        let second = render("no notes");
        assert_eq!(first.footnotes.len(), 1);
        assert!(second.footnotes.is_empty());
    }
}
