//! Code blocks.
//!
//! `pre > code` is highlighted, the token classes are turned into inline
//! colours, and the block is rebuilt as a table with a language label row.
//! Whitespace is made explicit (`&nbsp;`, `<br>`) because the editor
//! collapses it.

use crate::dom::{self, ArenaDom, ArenaNodeId, InlineStyle};
use crate::highlight::Highlighter;
use crate::util::escape_html;

use super::pass::collect_tags;
use super::styles::CODE_FONT;

const PLAINTEXT: &str = "plaintext";

/// GitHub light colour for an `hljs-*` token class.
pub fn token_color(class: &str) -> Option<&'static str> {
    let color = match class {
        "hljs-comment" | "hljs-quote" => "#6a737d",
        "hljs-keyword" | "hljs-selector-tag" | "hljs-doctag" | "hljs-operator" => "#d73a49",
        "hljs-literal" | "hljs-section" | "hljs-link" | "hljs-attr" | "hljs-type"
        | "hljs-built_in" | "hljs-meta" | "hljs-number" => "#005cc5",
        "hljs-name" | "hljs-tag" => "#22863a",
        "hljs-string" | "hljs-regexp" => "#032f62",
        "hljs-title" => "#6f42c1",
        "hljs-symbol" | "hljs-variable" | "hljs-template-variable" => "#e36209",
        "hljs-bullet" => "#735c0f",
        "hljs-subst" | "hljs-function" | "hljs-punctuation" => "#24292e",
        _ => return None,
    };
    Some(color)
}

/// Language named by a `language-xxx` class.
fn language_of(dom: &ArenaDom, code: ArenaNodeId) -> String {
    dom.classes(code)
        .find_map(|class| class.strip_prefix("language-"))
        .map(|lang| {
            lang.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
                .collect::<String>()
        })
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| PLAINTEXT.to_owned())
}

/// Header label for a language.
pub fn language_label(lang: &str) -> String {
    if lang == PLAINTEXT {
        "CODE".to_owned()
    } else {
        lang.to_uppercase()
    }
}

/// Run Pass D over every `pre > code` below `root`.
pub fn convert_code_blocks(dom: &mut ArenaDom, root: ArenaNodeId, highlighter: &dyn Highlighter) {
    let blocks: Vec<_> = collect_tags(dom, root, &["pre"])
        .into_iter()
        .filter_map(|pre| {
            let code = dom.children(pre).find(|&c| dom.is_tag(c, "code"))?;
            Some((pre, code))
        })
        .collect();

    for &(pre, code) in &blocks {
        convert_block(dom, pre, code, highlighter);
    }

    tracing::debug!(blocks = blocks.len(), "converted code blocks");
}

fn convert_block(
    dom: &mut ArenaDom,
    pre: ArenaNodeId,
    code: ArenaNodeId,
    highlighter: &dyn Highlighter,
) {
    let lang = language_of(dom, code);
    let source = dom.text_content(code);

    let language = highlighter.supports(&lang).then_some(lang.as_str());
    let highlighted = match highlighter.highlight(&source, language) {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!(lang = %lang, error = %e, "highlighting failed, using plain text");
            escape_html(&source).into_owned()
        }
    };

    let scroller = dom.create_html_element("div");
    dom.set_style(
        scroller,
        &InlineStyle::new()
            .with("padding", "16px")
            .with("overflow-x", "auto")
            .with("white-space", "nowrap")
            .with("font-size", "13px")
            .with("line-height", "1.5")
            .with("color", "#24292e"),
    );
    import_highlighted(dom, scroller, &highlighted);
    colorize_tokens(dom, scroller);
    preserve_whitespace(dom, scroller);

    let table = dom.create_html_element("table");
    dom.set_style(
        table,
        &InlineStyle::new()
            .with("border-collapse", "separate")
            .with("border-spacing", "0")
            .with("width", "100%")
            .with("margin", "1.5em 0")
            .with("border", "1px solid #ddd")
            .with("border-radius", "6px")
            .with("overflow", "hidden")
            .with("background-color", "#f6f8fa")
            .with("font-family", CODE_FONT),
    );

    let header_row = dom.create_html_element("tr");
    let header = dom.create_html_element("td");
    dom.set_style(
        header,
        &InlineStyle::new()
            .with("background-color", "#f1f3f5")
            .with("padding", "6px 12px")
            .with("font-weight", "bold")
            .with("font-family", CODE_FONT)
            .with("font-size", "0.85em")
            .with("color", "#666")
            .with("border-bottom", "1px solid #ddd")
            .with("text-align", "left"),
    );
    dom.append_text(header, &language_label(&lang));
    dom.append(header_row, header);

    let code_row = dom.create_html_element("tr");
    let cell = dom.create_html_element("td");
    dom.set_style(
        cell,
        &InlineStyle::new()
            .with("padding", "0")
            .with("background-color", "#f6f8fa"),
    );
    dom.append(cell, scroller);
    dom.append(code_row, cell);

    dom.append(table, header_row);
    dom.append(table, code_row);
    dom.replace(pre, table);
}

/// Parse highlighter output and append it to `target`.
fn import_highlighted(dom: &mut ArenaDom, target: ArenaNodeId, html: &str) {
    // The wrapper keeps leading whitespace out of the parser's hands.
    let scratch = dom::parse_html(&format!("<div>{html}</div>"));
    let Some(wrapper) = scratch.find_by_tag("div") else {
        dom.append_text(target, html);
        return;
    };
    for child in scratch.children(wrapper) {
        let copy = dom.import(&scratch, child);
        dom.append(target, copy);
    }
}

fn colorize_tokens(dom: &mut ArenaDom, root: ArenaNodeId) {
    for span in dom.descendants_by_tag(root, "span") {
        let classes: Vec<&str> = dom.classes(span).collect();
        let mut style = InlineStyle::new();
        for class in &classes {
            if let Some(color) = token_color(class) {
                style.set("color", color);
            }
        }
        if classes.iter().any(|c| matches!(*c, "hljs-section" | "hljs-title")) {
            style.set("font-weight", "bold");
        }

        if !style.is_empty() {
            dom.set_style(span, &style);
        }
        dom.remove_attr(span, "class");
    }
}

/// Spaces to U+00A0 and newlines to `<br>`, in every text node below `root`.
fn preserve_whitespace(dom: &mut ArenaDom, root: ArenaNodeId) {
    let texts: Vec<_> = dom
        .descendants(root)
        .into_iter()
        .filter(|&id| dom.is_text(id))
        .collect();

    for id in texts {
        let Some(text) = dom.text(id).map(|t| t.replace(' ', "\u{a0}")) else {
            continue;
        };
        if !text.contains('\n') {
            if let Some(existing) = dom.text_mut(id) {
                *existing = text;
            }
            continue;
        }

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let br = dom.create_html_element("br");
                dom.insert_before(id, br);
            }
            if !line.is_empty() {
                let node = dom.create_text(line);
                dom.insert_before(id, node);
            }
        }
        dom.detach(id);
    }
}
