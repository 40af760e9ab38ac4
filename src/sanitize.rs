//! HTML sanitization between the Markdown render and the transformation
//! engine.
//!
//! ammonia's default allow-list already covers Markdown output (headings,
//! emphasis, code, tables, lists, links, images, `mark`, `sup`, `del`, `div`,
//! `span`). On top of it the dialect needs embedded `iframe`s, task-list
//! checkboxes, and the `class`/`style`/`target`/`id` attributes that inline
//! HTML and the footnote block carry.

use ammonia::Builder;

fn builder() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .add_tags(&["iframe", "input"])
        .add_generic_attributes(&["class", "style", "target", "id"])
        .add_tag_attributes(
            "iframe",
            &["src", "width", "height", "frameborder", "allowfullscreen"],
        )
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .link_rel(None);
    builder
}

/// Remove scripts, event handlers, unsafe URLs and anything else outside the
/// allow-list.
pub fn sanitize(html: &str) -> String {
    builder().clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_scripts_and_handlers() {
        let html = r#"<p onclick="evil()">Hi<script>alert(1)</script></p>"#;
        assert_eq!(sanitize(html), "<p>Hi</p>");
    }

    #[test]
    fn test_strips_javascript_urls() {
        let html = r#"<a href="javascript:alert(1)">x</a>"#;
        assert_eq!(sanitize(html), "<a>x</a>");
    }

    #[test]
    fn test_keeps_dialect_attributes() {
        let html = r#"<div class="footnotes"><div class="footnote-item" id="fn-1">[1] note</div></div>"#;
        assert_eq!(sanitize(html), html);

        let html = r#"<a href="https://example.com" target="_blank" style="color: red;">x</a>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_keeps_mark_sup_and_iframe() {
        let html = r#"<p><mark>hi</mark><sup>[1]</sup></p><iframe src="https://www.youtube.com/embed/x" width="560"></iframe>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn test_keeps_task_list_checkbox() {
        let html = r#"<li><input disabled="" type="checkbox"> todo</li>"#;
        let clean = sanitize(&format!("<ul>{html}</ul>"));
        assert!(clean.contains(r#"type="checkbox""#));
        assert!(clean.contains("todo"));
    }
}
