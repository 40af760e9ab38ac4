//! Lists in the editor's native shape.
//!
//! ```text
//! ul.se-text-list.se-text-list-type-bullet-disc
//! └── li.se-text-list-item
//!     └── p.se-text-paragraph.se-text-paragraph-align-left
//!         └── span.se-ff-system.se-fs15.se-highlight.__se-node
//!             └── (original item content)
//! ```

use super::pass::collect_tags;
use crate::config::StyleConfig;
use crate::dom::{ArenaDom, ArenaNodeId, InlineStyle};

const ITEM_CLASS: &str = "se-text-list-item";
const PARAGRAPH_CLASS: &str = "se-text-paragraph se-text-paragraph-align-left";
const SPAN_CLASS: &str = "se-ff-system se-fs15 se-highlight __se-node";

fn list_class(ordered: bool) -> &'static str {
    if ordered {
        "se-text-list se-text-list-type-decimal"
    } else {
        "se-text-list se-text-list-type-bullet-disc"
    }
}

/// Run Pass B over every `ul`/`ol` below `root`.
pub fn restructure_lists(dom: &mut ArenaDom, root: ArenaNodeId, config: &StyleConfig) {
    let lists = collect_tags(dom, root, &["ul", "ol"]);
    let mut items = 0usize;

    for list in &lists {
        let ordered = dom.is_tag(*list, "ol");
        dom.set_attr(*list, "class", list_class(ordered));
        dom.update_style(*list, |style| {
            style.set("margin", "0");
            style.set("padding-left", "40px");
        });

        let children: Vec<_> = dom
            .children(*list)
            .filter(|&child| dom.is_tag(child, "li"))
            .collect();
        for item in children {
            wrap_item(dom, item, config);
            items += 1;
        }
    }

    tracing::debug!(lists = lists.len(), items, "restructured lists");
}

fn wrap_item(dom: &mut ArenaDom, item: ArenaNodeId, config: &StyleConfig) {
    dom.set_attr(item, "class", ITEM_CLASS);
    dom.update_style(item, |style| style.set("margin", "0"));

    let paragraph = dom.create_html_element("p");
    dom.set_attr(paragraph, "class", PARAGRAPH_CLASS);
    dom.set_style(
        paragraph,
        &InlineStyle::new().with("line-height", &config.global.content_line_height),
    );

    let span = dom.create_html_element("span");
    dom.set_attr(span, "class", SPAN_CLASS);
    let content = &config.content.paragraph;
    dom.set_style(
        span,
        &InlineStyle::new()
            .with("color", &content.color)
            .with("font-size", &content.font_size)
            .with("background-color", "rgb(255, 255, 255)"),
    );

    dom.move_children(item, span);
    dom.append(paragraph, span);
    dom.append(item, paragraph);
}
