//! Footnotes without links.
//!
//! The destination editor strips anchors and fragment links, so footnotes are
//! rendered as plain markers: a reference `[^id]` becomes `<sup>[id]</sup>`
//! and the definitions are gathered into one block appended to the document,
//! each entry prefixed with the same `[id]` marker.

use std::collections::VecDeque;
use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::Regex;

use super::preprocess::FenceTracker;
use crate::util::escape_html;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\^([^\]\s]+)\]: [ \t]*(.*)$").expect("valid footnote definition regex")
});

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^([^\]\s]+)\]").expect("valid footnote reference regex"));

/// Footnote definitions in first-seen order.
///
/// Redefining an id replaces its text but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteTable {
    entries: Vec<(String, String)>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((id, text)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, text)| (id.as_str(), text.as_str()))
    }
}

/// Remove footnote definitions from `markdown`, returning the remaining
/// document and the collected definitions.
///
/// A definition starts at a line `[^id]: text` outside fenced code and runs
/// until the next definition line. Its lines are joined with `<br>` after
/// dropping trailing blank and `&nbsp;` spacer lines.
pub fn extract_definitions(markdown: &str) -> (String, FootnoteTable) {
    let mut body = String::with_capacity(markdown.len());
    let mut table = FootnoteTable::new();
    let mut fences = FenceTracker::default();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in markdown.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);

        if !fences.is_open()
            && let Some(caps) = DEFINITION.captures(content)
        {
            if let Some((id, lines)) = current.take() {
                table.insert(id, fold_lines(lines));
            }
            let id = caps.get(1).map_or("", |m| m.as_str());
            let first = caps.get(2).map_or("", |m| m.as_str());
            current = Some((id, vec![first]));
            continue;
        }

        match current.as_mut() {
            Some((_, lines)) => lines.push(content),
            None => {
                fences.advance(line);
                body.push_str(line);
            }
        }
    }

    if let Some((id, lines)) = current {
        table.insert(id, fold_lines(lines));
    }

    (body, table)
}

fn fold_lines(mut lines: Vec<&str>) -> String {
    while lines
        .last()
        .is_some_and(|line| matches!(line.trim(), "" | "&nbsp;"))
    {
        lines.pop();
    }
    lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Render the footnote block appended after the document body. Empty when
/// there are no definitions.
pub fn render_section(table: &FootnoteTable) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"footnotes\">");
    for (id, text) in table.iter() {
        let id = escape_html(id);
        let _ = write!(
            html,
            "<div class=\"footnote-item\" id=\"fn-{id}\">[{id}] {}</div>",
            super::render_inline(text)
        );
    }
    html.push_str("</div>\n");
    html
}

/// Event adapter replacing `[^id]` in text with `<sup>[id]</sup>`.
///
/// Expects merged text events (see `TextMergeStream`), since the parser
/// splits bracketed text into several events.
pub struct FootnoteReferences<'a, I> {
    inner: I,
    in_code_block: bool,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I> FootnoteReferences<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            in_code_block: false,
            pending: VecDeque::new(),
        }
    }
}

impl<'a, I> Iterator for FootnoteReferences<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let event = self.inner.next()?;
        match &event {
            Event::Start(Tag::CodeBlock(_)) => self.in_code_block = true,
            Event::End(TagEnd::CodeBlock) => self.in_code_block = false,
            Event::Text(text) if !self.in_code_block && REFERENCE.is_match(text) => {
                split_references(text, &mut self.pending);
                return self.pending.pop_front();
            }
            _ => {}
        }
        Some(event)
    }
}

fn split_references<'a>(text: &str, out: &mut VecDeque<Event<'a>>) {
    let mut last = 0;
    for caps in REFERENCE.captures_iter(text) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push_back(Event::Text(CowStr::from(text[last..whole.start()].to_owned())));
        }
        let sup = format!("<sup>[{}]</sup>", escape_html(id.as_str()));
        out.push_back(Event::InlineHtml(CowStr::from(sup)));
        last = whole.end();
    }
    if last < text.len() {
        out.push_back(Event::Text(CowStr::from(text[last..].to_owned())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_first_position() {
        let mut table = FootnoteTable::new();
        table.insert("b", "first b");
        table.insert("a", "a");
        table.insert("b", "second b");

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, [("b", "second b"), ("a", "a")]);
        assert_eq!(table.get("b"), Some("second b"));
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn test_extract_definitions() {
        let md = "Text[^1] here.\n\n[^1]: The note.\n";
        let (body, table) = extract_definitions(md);
        assert_eq!(body, "Text[^1] here.\n\n");
        assert_eq!(table.get("1"), Some("The note."));
    }

    #[test]
    fn test_definition_body_runs_to_next_definition() {
        let md = "[^a]: line one\nline two\n\n&nbsp;\n\n[^b]: other\n";
        let (body, table) = extract_definitions(md);
        assert_eq!(body, "");
        assert_eq!(table.get("a"), Some("line one<br>line two"));
        assert_eq!(table.get("b"), Some("other"));
    }

    #[test]
    fn test_definition_inside_fence_ignored() {
        let md = "```\n[^x]: not a note\n```\n";
        let (body, table) = extract_definitions(md);
        assert_eq!(body, md);
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_definitions_fall_through() {
        let md = "[^]: empty id\n[^a b]: space\n[^c] no colon\n[^d]:no space\n";
        let (body, table) = extract_definitions(md);
        assert_eq!(body, md);
        assert!(table.is_empty());
    }

    #[test]
    fn test_render_section() {
        let mut table = FootnoteTable::new();
        table.insert("1", "See *this*");
        table.insert("src", "Book");

        assert_eq!(
            render_section(&table),
            "<div class=\"footnotes\">\
             <div class=\"footnote-item\" id=\"fn-1\">[1] See <em>this</em></div>\
             <div class=\"footnote-item\" id=\"fn-src\">[src] Book</div>\
             </div>\n"
        );
        assert_eq!(render_section(&FootnoteTable::new()), "");
    }

    #[test]
    fn test_split_references() {
        let mut out = VecDeque::new();
        split_references("a[^1]b[^two]", &mut out);
        let events: Vec<_> = out.into_iter().collect();
        assert_eq!(
            events,
            [
                Event::Text("a".into()),
                Event::InlineHtml("<sup>[1]</sup>".into()),
                Event::Text("b".into()),
                Event::InlineHtml("<sup>[two]</sup>".into()),
            ]
        );
    }
}
