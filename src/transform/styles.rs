//! Style injection.
//!
//! Every element the editor renders gets its look from an inline `style`
//! attribute built from the [`StyleConfig`]. Two elements are replaced
//! outright: underlined headings become a one-cell table and `mark` becomes
//! the editor's highlight span.

use pulldown_cmark::HeadingLevel;

use super::pass::walk_pre_order;
use crate::config::{HeaderStyle, StyleConfig};
use crate::dom::{ArenaDom, ArenaNodeId, InlineStyle};

/// Class list of the editor's highlight wrapper.
pub const HIGHLIGHT_CLASS: &str = "se-ff-nanumsquare se-fs15 se-highlight __se-node";

/// Font stack for code, which does not follow the configured family.
pub const CODE_FONT: &str = r#""NanumGothic", sans-serif"#;

/// What Pass A does with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Heading(HeadingLevel),
    Superscript,
    Paragraph,
    Strong,
    Emphasis,
    InlineCode,
    Mark,
    Blockquote,
    Footnotes,
    BulletList,
    OrderedList,
    ListItem,
    Link,
    Rule,
    Table,
    TableHead,
    TableHeader,
    TableCell,
    Image,
    FigureCaption,
    Other,
}

impl ElementKind {
    fn of(dom: &ArenaDom, id: ArenaNodeId) -> Self {
        let Some(tag) = dom.tag(id) else {
            return Self::Other;
        };
        match tag {
            "h1" => Self::Heading(HeadingLevel::H1),
            "h2" => Self::Heading(HeadingLevel::H2),
            "h3" => Self::Heading(HeadingLevel::H3),
            "h4" => Self::Heading(HeadingLevel::H4),
            "h5" => Self::Heading(HeadingLevel::H5),
            "sup" => Self::Superscript,
            "p" => Self::Paragraph,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "code" if !dom.parent(id).is_some_and(|p| dom.is_tag(p, "pre")) => Self::InlineCode,
            "mark" => Self::Mark,
            "blockquote" => Self::Blockquote,
            "div" if dom.has_class(id, "footnotes") => Self::Footnotes,
            "ul" => Self::BulletList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "a" => Self::Link,
            "hr" => Self::Rule,
            "table" => Self::Table,
            "thead" => Self::TableHead,
            "th" => Self::TableHeader,
            "td" => Self::TableCell,
            "img" => Self::Image,
            "span" if dom.has_class(id, "figure-caption") => Self::FigureCaption,
            _ => Self::Other,
        }
    }
}

/// Run Pass A over everything below `root`.
pub fn apply_styles(dom: &mut ArenaDom, root: ArenaNodeId, config: &StyleConfig) {
    let styler = Styler { config };
    let mut styled = 0usize;
    walk_pre_order(dom, root, |dom, id| {
        let kind = ElementKind::of(dom, id);
        if kind == ElementKind::Other {
            return id;
        }
        styled += 1;
        tracing::trace!(?kind, "styling element");
        styler.apply(dom, id, kind)
    });
    tracing::debug!(styled, "applied inline styles");
}

struct Styler<'c> {
    config: &'c StyleConfig,
}

impl Styler<'_> {
    /// Style `id`, returning the node whose children the walk continues with.
    fn apply(&self, dom: &mut ArenaDom, id: ArenaNodeId, kind: ElementKind) -> ArenaNodeId {
        match kind {
            ElementKind::Heading(level) => match self.config.headers.level(level) {
                Some(header) if header.underlined => self.underlined_heading(dom, id, header),
                Some(header) => {
                    dom.set_style(id, &self.heading(header));
                    id
                }
                None => id,
            },
            ElementKind::Mark => self.mark(dom, id),
            ElementKind::Footnotes => {
                self.footnotes(dom, id);
                id
            }
            ElementKind::Paragraph => {
                let quoted = dom.ancestors(id).any(|a| dom.is_tag(a, "blockquote"));
                dom.set_style(id, &self.paragraph(quoted));
                id
            }
            other => {
                if let Some(style) = self.fixed(other) {
                    dom.set_style(id, &style);
                }
                id
            }
        }
    }

    fn heading(&self, header: &HeaderStyle) -> InlineStyle {
        let global = &self.config.global;
        InlineStyle::new()
            .with("font-size", &header.font_size)
            .with("font-weight", &header.font_weight)
            .with("color", &header.color)
            .with("margin", "0")
            .with("line-height", &global.header_line_height)
            .with("font-family", &global.font_family)
    }

    /// Replace the heading with `table > tr > td`; the cell receives the
    /// heading's children.
    fn underlined_heading(
        &self,
        dom: &mut ArenaDom,
        heading: ArenaNodeId,
        header: &HeaderStyle,
    ) -> ArenaNodeId {
        let global = &self.config.global;

        let table = dom.create_html_element("table");
        let table_style = InlineStyle::new()
            .with("width", "100%")
            .with(
                "border-bottom",
                format!("2px solid {}", header.effective_underline_color()),
            )
            .with("background-color", header.effective_background_color())
            .with("border-collapse", "collapse")
            .with("margin-block-start", "0.83em")
            .with("margin-block-end", "0.83em");
        dom.set_style(table, &table_style);

        let row = dom.create_html_element("tr");
        let cell = dom.create_html_element("td");
        let cell_style = InlineStyle::new()
            .with("padding", "5px 0 10px 0")
            .with("color", &header.color)
            .with("font-size", &header.font_size)
            .with("font-weight", &header.font_weight)
            .with("font-family", &global.font_family)
            .with("line-height", &global.header_line_height)
            .with("border", "none");
        dom.set_style(cell, &cell_style);

        dom.move_children(heading, cell);
        dom.append(row, cell);
        dom.append(table, row);
        dom.replace(heading, table);
        cell
    }

    fn paragraph(&self, quoted: bool) -> InlineStyle {
        let global = &self.config.global;
        let paragraph = &self.config.content.paragraph;
        let color = if quoted { "inherit" } else { paragraph.color.as_str() };
        InlineStyle::new()
            .with("line-height", &global.content_line_height)
            .with("margin", "0")
            .with("font-family", &global.font_family)
            .with("color", color)
            .with("font-size", &paragraph.font_size)
    }

    /// Swap `mark` for the highlight span holding a neutral `mark`.
    fn mark(&self, dom: &mut ArenaDom, mark: ArenaNodeId) -> ArenaNodeId {
        let highlight = &self.config.content.highlight;

        let wrapper = dom.create_html_element("span");
        dom.set_attr(wrapper, "class", HIGHLIGHT_CLASS);
        let wrapper_style = InlineStyle::new()
            .with("background-color", &highlight.bg)
            .with("color", highlight.effective_color());
        dom.set_style(wrapper, &wrapper_style);

        let inner = dom.create_html_element("mark");
        let inner_style = InlineStyle::new()
            .with("background-color", "transparent")
            .with("color", "inherit");
        dom.set_style(inner, &inner_style);

        dom.move_children(mark, inner);
        dom.append(wrapper, inner);
        dom.replace(mark, wrapper);
        inner
    }

    fn footnotes(&self, dom: &mut ArenaDom, block: ArenaNodeId) {
        let footnotes = &self.config.content.footnotes;
        let block_style = InlineStyle::new()
            .with("margin-top", "40px")
            .with("border-top", format!("1px solid {}", footnotes.separator_color))
            .with("padding-top", "20px")
            .with("font-size", &footnotes.font_size)
            .with("color", &footnotes.color)
            .with("font-family", &self.config.global.font_family);
        dom.set_style(block, &block_style);

        let item_style = InlineStyle::new()
            .with("margin-bottom", "8px")
            .with("line-height", "1.6")
            .with("font-size", "13px")
            .with("color", &footnotes.color);
        let items: Vec<_> = dom
            .descendants_by_tag(block, "div")
            .into_iter()
            .filter(|&item| dom.has_class(item, "footnote-item"))
            .collect();
        for item in items {
            dom.set_style(item, &item_style);
        }
    }

    /// Styles that depend only on the element kind and the config.
    fn fixed(&self, kind: ElementKind) -> Option<InlineStyle> {
        let global = &self.config.global;
        let content = &self.config.content;
        let line_height = global.content_line_height.as_str();
        let family = global.font_family.as_str();

        let style = match kind {
            ElementKind::Superscript => InlineStyle::new()
                .with("font-size", "0.8em")
                .with("vertical-align", "super")
                .with("line-height", "0")
                .with("font-family", family),
            ElementKind::Strong => with_color(
                InlineStyle::new()
                    .with("font-weight", "bold")
                    .with("line-height", line_height)
                    .with("font-family", family),
                content.bold.get(),
            ),
            ElementKind::Emphasis => with_color(
                InlineStyle::new()
                    .with("font-style", "italic")
                    .with("line-height", line_height)
                    .with("font-family", family),
                content.italic.get(),
            ),
            ElementKind::InlineCode => InlineStyle::new()
                .with("background-color", &content.inline_code.bg)
                .with("color", &content.inline_code.color)
                .with("padding", "2px 6px")
                .with("border-radius", "3px")
                .with("font-family", CODE_FONT)
                .with("font-size", "13px"),
            ElementKind::Blockquote => InlineStyle::new()
                .with("border-left", format!("4px solid {}", content.blockquote.border))
                .with("padding", "1em 1.5em")
                .with("background-color", &content.blockquote.bg)
                .with("color", &content.blockquote.color)
                .with("border-radius", "4px")
                .with("margin", "0")
                .with("line-height", line_height)
                .with("font-family", family),
            ElementKind::BulletList | ElementKind::OrderedList => InlineStyle::new()
                .with("padding-left", "2em")
                .with(
                    "list-style-type",
                    if kind == ElementKind::OrderedList {
                        "decimal"
                    } else {
                        "disc"
                    },
                )
                .with("margin", "0")
                .with("line-height", line_height)
                .with("font-family", family),
            ElementKind::ListItem => InlineStyle::new()
                .with("margin", "0")
                .with("line-height", line_height),
            ElementKind::Link => InlineStyle::new()
                .with("color", &content.link.color)
                .with("text-decoration", "underline")
                .with("font-weight", "bold")
                .with("line-height", line_height)
                .with("font-family", family),
            ElementKind::Rule => InlineStyle::new()
                .with("border", "0")
                .with("border-top", "1px solid #ddd")
                .with("margin", "2em 0"),
            ElementKind::Table => InlineStyle::new()
                .with("border-collapse", "collapse")
                .with("width", "100%")
                .with("border", format!("1px solid {}", content.table.border_color))
                .with("margin", "1.5em 0")
                .with("font-family", family)
                .with("line-height", "1.6"),
            ElementKind::TableHead => {
                InlineStyle::new().with("background-color", &content.table.header_bg)
            }
            ElementKind::TableHeader => InlineStyle::new()
                .with("border", format!("1px solid {}", content.table.border_color))
                .with("padding", "10px 12px")
                .with("font-weight", "bold")
                .with("text-align", content.table.header_align.as_str())
                .with("background-color", &content.table.header_bg),
            ElementKind::TableCell => InlineStyle::new()
                .with("border", format!("1px solid {}", content.table.border_color))
                .with("padding", "10px 12px")
                .with("text-align", content.table.body_align.as_str()),
            ElementKind::Image => InlineStyle::new()
                .with("max-width", "100%")
                .with("height", "auto")
                .with("display", "block")
                .with("margin", "1.5em auto"),
            ElementKind::FigureCaption => InlineStyle::new()
                .with("font-size", "0.9em")
                .with("background-color", "#fee")
                .with("padding", "4px 8px")
                .with("display", "inline-block")
                .with("margin-top", "8px")
                .with("font-style", "italic")
                .with("color", "#666")
                .with("text-align", "center"),
            _ => return None,
        };
        Some(style)
    }
}

fn with_color(style: InlineStyle, color: Option<&str>) -> InlineStyle {
    match color {
        Some(color) => style.with("color", color),
        None => style,
    }
}
