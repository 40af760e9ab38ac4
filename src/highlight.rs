//! Syntax highlighting for fenced code blocks.
//!
//! Highlighters emit HTML where each token is a `<span>` carrying an
//! `hljs-*` class (`hljs-keyword`, `hljs-string`, ...). The code-block pass
//! turns those classes into inline colours, so any highlighter that speaks
//! the class vocabulary can be plugged in through [`Highlighter`].
//!
//! [`SyntectHighlighter`] is the built-in implementation. It parses with
//! syntect's default grammars and maps TextMate scopes onto the class names.

use std::sync::LazyLock;

use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;
use crate::util::escape_html;

/// Default grammars, loaded on first use.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A source of `hljs-*` classed HTML for code.
pub trait Highlighter {
    /// Highlight `code`. `language` is `None` when the language should be
    /// detected from the code itself.
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String, HighlightError>;

    /// Whether `language` names a grammar this highlighter knows.
    fn supports(&self, language: &str) -> bool;
}

/// syntect-backed [`Highlighter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self
    }

    fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
        let lang = language.trim().to_lowercase();
        if lang.is_empty() {
            return None;
        }
        SYNTAX_SET
            .find_syntax_by_token(&lang)
            .or_else(|| SYNTAX_SET.find_syntax_by_token(resolve_alias(&lang)))
            .filter(|syntax| syntax.name != "Plain Text")
    }

    fn detect(code: &str) -> &'static SyntaxReference {
        code.lines()
            .next()
            .and_then(|line| SYNTAX_SET.find_syntax_by_first_line(line))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String, HighlightError> {
        let syntax = language
            .and_then(Self::find_syntax)
            .unwrap_or_else(|| Self::detect(code));
        tracing::trace!(syntax = %syntax.name, "highlighting code block");

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut html = String::with_capacity(code.len() * 2);
        let mut spans = SpanWriter::new(&mut html);

        for line in LinesWithEndings::from(code) {
            let ops = state.parse_line(line, &SYNTAX_SET)?;
            let mut pos = 0;
            for (offset, op) in ops {
                spans.push(line.get(pos..offset).unwrap_or_default(), token_class(&stack));
                pos = offset;
                stack
                    .apply(&op)
                    .map_err(|e| HighlightError::Scope(format!("{e:?}")))?;
            }
            spans.push(line.get(pos..).unwrap_or_default(), token_class(&stack));
        }
        spans.finish();

        Ok(html)
    }

    fn supports(&self, language: &str) -> bool {
        Self::find_syntax(language).is_some()
    }
}

/// Writes escaped text, merging adjacent runs that share a class into one
/// span.
struct SpanWriter<'o> {
    out: &'o mut String,
    open: Option<&'static str>,
}

impl<'o> SpanWriter<'o> {
    fn new(out: &'o mut String) -> Self {
        Self { out, open: None }
    }

    fn push(&mut self, text: &str, class: Option<&'static str>) {
        if text.is_empty() {
            return;
        }
        if class != self.open {
            self.close();
            if let Some(class) = class {
                self.out.push_str("<span class=\"");
                self.out.push_str(class);
                self.out.push_str("\">");
            }
            self.open = class;
        }
        self.out.push_str(&escape_html(text));
    }

    fn close(&mut self) {
        if self.open.take().is_some() {
            self.out.push_str("</span>");
        }
    }

    fn finish(mut self) {
        self.close();
    }
}

/// Class for the token under the current scope stack.
///
/// Comments, strings and regexes colour everything nested in them, so the
/// outermost of those wins; otherwise the innermost classified scope does.
fn token_class(stack: &ScopeStack) -> Option<&'static str> {
    let scopes = stack.as_slice();
    scopes
        .iter()
        .find_map(|scope| container_class(*scope))
        .or_else(|| scopes.iter().rev().find_map(|scope| scope_class(*scope)))
}

fn container_class(scope: Scope) -> Option<&'static str> {
    let name = scope.build_string();
    if matches_prefix(&name, "comment") {
        Some("hljs-comment")
    } else if matches_prefix(&name, "string.regexp") {
        Some("hljs-regexp")
    } else if matches_prefix(&name, "string") {
        Some("hljs-string")
    } else {
        None
    }
}

/// Scope prefix to class, most specific first.
const SCOPE_CLASSES: &[(&str, &str)] = &[
    ("constant.numeric", "hljs-number"),
    ("constant.character.escape", "hljs-subst"),
    ("constant.language", "hljs-literal"),
    ("constant.other.symbol", "hljs-symbol"),
    ("constant", "hljs-literal"),
    ("keyword.operator", "hljs-operator"),
    ("keyword", "hljs-keyword"),
    ("storage", "hljs-keyword"),
    ("entity.name.function", "hljs-title"),
    ("entity.name.section", "hljs-section"),
    ("entity.name.tag", "hljs-name"),
    ("entity.name", "hljs-title"),
    ("entity.other.inherited-class", "hljs-title"),
    ("entity.other.attribute-name", "hljs-attr"),
    ("support.function", "hljs-built_in"),
    ("support.type", "hljs-type"),
    ("support.class", "hljs-type"),
    ("support.constant", "hljs-literal"),
    ("variable.language", "hljs-variable"),
    ("variable.other.readwrite.global", "hljs-variable"),
    ("variable.parameter", "hljs-params"),
    ("meta.preprocessor", "hljs-meta"),
    ("meta.annotation", "hljs-meta"),
    ("meta.decorator", "hljs-meta"),
    ("meta.attribute", "hljs-meta"),
    ("punctuation.section.interpolation", "hljs-subst"),
    ("punctuation.definition.tag", "hljs-tag"),
    ("punctuation", "hljs-punctuation"),
    ("markup.heading", "hljs-section"),
    ("markup.quote", "hljs-quote"),
    ("markup.underline.link", "hljs-link"),
    ("markup.list", "hljs-bullet"),
    ("markup.bold", "hljs-strong"),
    ("markup.italic", "hljs-emphasis"),
];

fn scope_class(scope: Scope) -> Option<&'static str> {
    let name = scope.build_string();
    SCOPE_CLASSES
        .iter()
        .find(|(prefix, _)| matches_prefix(&name, prefix))
        .map(|(_, class)| *class)
}

/// Scope-selector matching: `prefix` equals the scope or is a dotted
/// ancestor of it.
fn matches_prefix(scope: &str, prefix: &str) -> bool {
    scope
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Common fence labels that are not syntect tokens.
fn resolve_alias(lang: &str) -> &str {
    match lang {
        "js" | "mjs" | "cjs" | "jsx" | "node" => "javascript",
        "ts" | "tsx" | "typescript" => "javascript",
        "rs" => "rust",
        "py" | "python3" | "py3" => "python",
        "rb" => "ruby",
        "sh" | "shell" | "zsh" | "console" => "bash",
        "md" => "markdown",
        "htm" | "xhtml" | "vue" => "html",
        "yml" => "yaml",
        "c++" | "cxx" | "hpp" | "cc" => "cpp",
        "h" => "c",
        "objc" | "objective-c" => "m",
        "kt" | "kts" | "kotlin" => "java",
        "cs" | "csharp" => "c#",
        "golang" => "go",
        "hs" => "haskell",
        "ex" | "exs" | "erl" => "erlang",
        "ml" | "mli" => "ocaml",
        "jsonc" | "json5" => "json",
        "tex" => "latex",
        "pl" | "pm" => "perl",
        "bat" | "cmd" => "batch file",
        "docker" | "dockerfile" => "bash",
        "postgres" | "mysql" | "sqlite" => "sql",
        "scss" | "sass" | "less" => "css",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(code: &str, language: Option<&str>) -> String {
        SyntectHighlighter::new()
            .highlight(code, language)
            .expect("highlighting succeeds")
    }

    #[test]
    fn test_supports_known_languages_and_aliases() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.supports("rust"));
        assert!(highlighter.supports("JavaScript"));
        assert!(highlighter.supports("js"));
        assert!(highlighter.supports("py"));
        assert!(!highlighter.supports("plaintext"));
        assert!(!highlighter.supports("txt"));
        assert!(!highlighter.supports("no-such-language"));
        assert!(!highlighter.supports(""));
    }

    #[test]
    fn test_string_is_one_span() {
        let html = highlight("let s = \"hi\";\n", Some("javascript"));
        assert!(html.contains("<span class=\"hljs-string\">&quot;hi&quot;</span>"));
    }

    #[test]
    fn test_rust_tokens() {
        let html = highlight("fn main() {\n    // note\n    let x = 42;\n}\n", Some("rust"));
        assert!(html.contains("hljs-keyword"));
        assert!(html.contains("hljs-comment"));
        assert!(html.contains("// note"));
        assert!(html.contains("<span class=\"hljs-number\">42</span>"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = highlight("a < b && c\n", None);
        assert_eq!(html, "a &lt; b &amp;&amp; c\n");
    }

    #[test]
    fn test_autodetect_from_first_line() {
        let html = highlight("#!/usr/bin/env python\nprint(1)\n", None);
        assert!(html.contains("hljs-"));
    }

    #[test]
    fn test_matches_prefix() {
        assert!(matches_prefix("string.quoted.double.js", "string"));
        assert!(matches_prefix("string", "string"));
        assert!(!matches_prefix("stringy", "string"));
        assert!(!matches_prefix("meta.string", "string"));
    }
}
