//! ATX-only headings.
//!
//! Underline-style (Setext) headings are easy to produce by accident when a
//! line of text is followed by `---` meant as a rule. This adapter rewrites
//! them back into what the author most likely meant: the text becomes a
//! paragraph, a `---` underline becomes a horizontal rule, and an `===`
//! underline becomes a paragraph of its own characters.

use std::collections::VecDeque;
use std::ops::Range;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

/// Event adapter over `Parser::into_offset_iter()` that demotes Setext
/// headings.
pub struct AtxHeadings<'a, I> {
    source: &'a str,
    inner: I,
    /// Underline of the Setext heading currently being demoted.
    underline: Option<&'a str>,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I> AtxHeadings<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    pub fn new(source: &'a str, inner: I) -> Self {
        Self {
            source,
            inner,
            underline: None,
            pending: VecDeque::new(),
        }
    }
}

impl<'a, I> Iterator for AtxHeadings<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let (event, range) = self.inner.next()?;
        match event {
            Event::Start(Tag::Heading { .. }) => {
                let raw = self.source.get(range.start..).unwrap_or_default();
                if is_atx(raw) {
                    return Some(event);
                }
                self.underline = Some(underline_of(raw));
                Some(Event::Start(Tag::Paragraph))
            }
            Event::End(TagEnd::Heading(_)) => match self.underline.take() {
                Some(underline) => {
                    self.queue_underline(underline);
                    Some(Event::End(TagEnd::Paragraph))
                }
                None => Some(event),
            },
            other => Some(other),
        }
    }
}

impl<'a, I> AtxHeadings<'a, I> {
    fn queue_underline(&mut self, underline: &'a str) {
        if underline.starts_with('-') && underline.chars().filter(|&c| c == '-').count() >= 3 {
            self.pending.push_back(Event::Rule);
        } else if !underline.is_empty() {
            self.pending.push_back(Event::Start(Tag::Paragraph));
            self.pending
                .push_back(Event::Text(CowStr::Borrowed(underline)));
            self.pending.push_back(Event::End(TagEnd::Paragraph));
        }
    }
}

/// True when the heading source starts with an ATX opening sequence.
fn is_atx(raw: &str) -> bool {
    let first_line = raw.lines().next().unwrap_or_default();
    let rest = first_line.trim_start_matches([' ', '\t', '>']);
    let hashes = rest.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && rest[hashes..].chars().next().is_none_or(|c| c == ' ' || c == '\t')
}

/// The underline run of a Setext heading starting at `raw`: the first
/// following line made only of `=` or only of `-`, container markers and
/// spacing trimmed.
fn underline_of(raw: &str) -> &str {
    raw.lines()
        .skip(1)
        .map(|line| line.trim_start_matches([' ', '\t', '>']).trim_end())
        .find(|line| {
            !line.is_empty() && (line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-'))
        })
        .unwrap_or_default()
}
