//! Blockquotes and callouts.
//!
//! The editor drops `blockquote`, so plain quotes become a styled `div`.
//! A quote whose first paragraph opens with `[!type]` is a callout and is
//! rebuilt as a two-row table: an accent-coloured title row and a body row.

use std::sync::LazyLock;

use regex::Regex;

use super::pass::collect_tags;
use crate::config::StyleConfig;
use crate::dom::{ArenaDom, ArenaNodeId, InlineStyle};
use crate::util::capitalize;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[!([A-Za-z0-9_]+)\]").expect("valid callout marker regex")
});

/// Accent colour for a callout type.
pub fn callout_color(kind: &str) -> &'static str {
    match kind {
        "note" | "summary" | "abstract" | "tldr" => "#155DFC",
        "info" | "todo" | "tip" | "hint" | "important" => "#0EA5E9",
        "success" | "check" | "done" | "question" | "help" | "faq" => "#009f6c",
        "warning" | "caution" | "attention" => "#ec7500",
        "failure" | "fail" | "missing" | "danger" | "error" | "bug" => "#e93147",
        "example" => "#7852ee",
        "quote" => "#989898",
        "check2" => "#00b0f0",
        _ => "#444",
    }
}

/// Emoji shown before a callout title.
pub fn callout_icon(kind: &str) -> &'static str {
    match kind {
        "note" => "✏️",
        "abstract" | "summary" | "tldr" => "📋",
        "info" => "ℹ️",
        "todo" => "✅",
        "tip" | "hint" | "important" => "🔥",
        "success" | "check" | "done" | "check2" => "✔️",
        "question" | "help" | "faq" => "❓",
        "warning" | "caution" | "attention" => "⚠️",
        "failure" | "fail" | "missing" => "❌",
        "danger" | "error" | "bug" => "⚡",
        "example" => "🟣",
        "quote" => "❝",
        _ => "📝",
    }
}

/// `#rgb` to `#rrggbb`, so a two-digit alpha can be appended.
fn expand_hex(color: &str) -> String {
    match color.strip_prefix('#') {
        Some(hex) if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            hex.chars().fold(String::from("#"), |mut out, c| {
                out.push(c);
                out.push(c);
                out
            })
        }
        _ => color.to_owned(),
    }
}

/// Run Pass C over every `blockquote` below `root`.
pub fn convert_blockquotes(dom: &mut ArenaDom, root: ArenaNodeId, config: &StyleConfig) {
    let quotes = collect_tags(dom, root, &["blockquote"]);
    let mut callouts = 0usize;

    for quote in &quotes {
        match detect(dom, *quote) {
            Some(marker) => {
                tracing::trace!(kind = %marker.kind, "converting callout");
                convert_callout(dom, *quote, &marker, config);
                callouts += 1;
            }
            None => convert_quote(dom, *quote, config),
        }
    }

    tracing::debug!(quotes = quotes.len(), callouts, "converted blockquotes");
}

struct Marker {
    kind: String,
    paragraph: ArenaNodeId,
    len: usize,
}

fn detect(dom: &ArenaDom, quote: ArenaNodeId) -> Option<Marker> {
    let paragraph = dom.children(quote).find(|&c| dom.is_tag(c, "p"))?;
    let text = dom.first_child(paragraph).and_then(|t| dom.text(t))?;
    let caps = MARKER.captures(text)?;
    Some(Marker {
        kind: caps.get(1)?.as_str().to_lowercase(),
        paragraph,
        len: caps.get(0)?.len(),
    })
}

fn convert_quote(dom: &mut ArenaDom, quote: ArenaNodeId, config: &StyleConfig) {
    let div = dom.create_html_element("div");
    if let Some(style) = dom.attr(quote, "style").map(str::to_owned) {
        dom.set_attr(div, "style", style);
    }
    dom.move_children(quote, div);

    for paragraph in dom.descendants_by_tag(div, "p") {
        dom.update_style(paragraph, |style| {
            style.set("margin", "0 0 0.5em 0");
            style.set("line-height", &config.global.content_line_height);
        });
    }

    dom.replace(quote, div);
}

fn convert_callout(dom: &mut ArenaDom, quote: ArenaNodeId, marker: &Marker, config: &StyleConfig) {
    let color = callout_color(&marker.kind);
    let tint = expand_hex(color);
    let family = &config.global.font_family;

    // Title: the paragraph's nodes up to its first <br>.
    let nodes: Vec<_> = dom.children(marker.paragraph).collect();
    let br = nodes.iter().position(|&n| dom.is_tag(n, "br"));
    let title = &nodes[..br.unwrap_or(nodes.len())];

    if let Some(&first) = title.first()
        && let Some(text) = dom.text_mut(first)
        && let Some(rest) = text.get(marker.len..)
    {
        *text = rest.trim_start().to_owned();
    }

    let table = dom.create_html_element("table");
    dom.set_style(
        table,
        &InlineStyle::new()
            .with("border-collapse", "collapse")
            .with("width", "100%")
            .with("border", format!("1px solid {color}"))
            .with("border-left", format!("4px solid {color}"))
            .with("background-color", "#ffffff")
            .with("margin", "1em 0")
            .with("border-radius", "4px")
            .with("box-shadow", "0 1px 3px rgba(0,0,0,0.05)"),
    );

    let header_row = dom.create_html_element("tr");
    let header = dom.create_html_element("td");
    dom.set_style(
        header,
        &InlineStyle::new()
            .with("background-color", format!("{tint}15"))
            .with("padding", "8px 15px")
            .with("font-weight", "bold")
            .with("color", color)
            .with("font-size", "16px")
            .with("border-bottom", format!("1px solid {tint}30"))
            .with("font-family", family),
    );
    dom.append_text(header, &format!("{} ", callout_icon(&marker.kind)));

    let blank = title
        .iter()
        .all(|&n| dom.text(n).is_some_and(|t| t.trim().is_empty()));
    if blank {
        for &node in title {
            dom.detach(node);
        }
        dom.append_text(header, &capitalize(&marker.kind));
    } else {
        for &node in title {
            dom.append(header, node);
        }
    }
    if let Some(br) = br {
        dom.detach(nodes[br]);
    }
    if dom.first_child(marker.paragraph).is_none() {
        dom.detach(marker.paragraph);
    }

    dom.append(header_row, header);
    dom.append(table, header_row);

    if has_content(dom, quote) {
        let body_row = dom.create_html_element("tr");
        let body = dom.create_html_element("td");
        let paragraph = &config.content.paragraph;
        dom.set_style(
            body,
            &InlineStyle::new()
                .with("padding", "15px")
                .with("color", &paragraph.color)
                .with("font-size", &paragraph.font_size)
                .with("line-height", &config.global.content_line_height)
                .with("font-family", family),
        );
        dom.move_children(quote, body);
        dom.append(body_row, body);
        dom.append(table, body_row);
    }

    dom.replace(quote, table);
}

/// Whether anything other than whitespace text is left in `node`.
fn has_content(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    dom.children(node)
        .any(|c| dom.is_element(c) || dom.text(c).is_some_and(|t| !t.trim().is_empty()))
}
