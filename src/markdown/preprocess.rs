//! String-level rewrites applied before parsing.
//!
//! Both rewrites skip fenced code blocks so code samples reach the parser
//! byte for byte.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid blank line regex"));

static HIGHLIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"==(.+?)==").expect("valid highlight regex"));

/// Rewrite author-visible spacing and `==highlight==` syntax.
///
/// Every run of blank lines keeps its paragraph break and gains one `&nbsp;`
/// paragraph per blank line, so the editor shows the gap the author typed.
/// `==text==` on a single line becomes `<mark>text</mark>`.
pub fn preprocess(markdown: &str) -> String {
    let markdown = markdown.replace("\r\n", "\n");
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 8);
    let mut prose = String::new();
    let mut fences = FenceTracker::default();

    for line in markdown.split_inclusive('\n') {
        if fences.advance(line) {
            flush_prose(&mut out, &mut prose);
            // The newline after a closing fence can start a blank-line run.
            match line.strip_suffix('\n') {
                Some(fence_line) if !fences.is_open() => {
                    out.push_str(fence_line);
                    prose.push('\n');
                }
                _ => out.push_str(line),
            }
        } else {
            prose.push_str(line);
        }
    }
    flush_prose(&mut out, &mut prose);

    out
}

fn flush_prose(out: &mut String, prose: &mut String) {
    if prose.is_empty() {
        return;
    }

    let spaced = BLANK_LINES.replace_all(prose, |caps: &Captures| {
        let blank_lines = caps[0].len() - 1;
        format!("\n\n{}", "&nbsp;\n\n".repeat(blank_lines))
    });
    let marked = HIGHLIGHT.replace_all(&spaced, "<mark>$1</mark>");
    out.push_str(&marked);
    prose.clear();
}

/// An open code fence: its marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Fence> {
        let rest = strip_fence_indent(line)?;
        let marker = rest.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = rest.chars().take_while(|&c| c == marker).count();
        if len < 3 {
            return None;
        }
        // Backtick fences may not carry backticks in their info string.
        if marker == '`' && rest[len..].contains('`') {
            return None;
        }
        Some(Fence { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(rest) = strip_fence_indent(line) else {
            return false;
        };
        let len = rest.chars().take_while(|&c| c == self.marker).count();
        len >= self.len && rest[len..].trim().is_empty()
    }
}

fn strip_fence_indent(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\n', '\r']);
    let rest = line.trim_start_matches(' ');
    (line.len() - rest.len() <= 3).then_some(rest)
}

/// Tracks whether successive lines are inside fenced code.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns true when the line is part of a fenced
    /// code block, fence lines included.
    pub(crate) fn advance(&mut self, line: &str) -> bool {
        match self.open {
            Some(fence) => {
                if fence.is_closed_by(line) {
                    self.open = None;
                }
                true
            }
            None => {
                self.open = Fence::open(line);
                self.open.is_some()
            }
        }
    }
}
