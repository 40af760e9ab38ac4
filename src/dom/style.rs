//! Inline `style` attribute editing.
//!
//! Declarations are kept as raw `property: value` pairs in source order so
//! that rewriting one property keeps its position and never duplicates it.

use std::fmt;

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

/// An ordered list of CSS declarations from (or for) a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list. Malformed declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        parse_declarations(&mut parser)
    }

    /// Builder form of [`InlineStyle::set`].
    pub fn with(mut self, property: &str, value: impl AsRef<str>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing an existing value in place.
    pub fn set(&mut self, property: &str, value: impl AsRef<str>) {
        let value = value.as_ref().trim().to_owned();
        match self
            .declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property.to_owned(), value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, property: &str) {
        self.declarations
            .retain(|(name, _)| !name.eq_ignore_ascii_case(property));
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

fn parse_declarations<'i>(input: &mut Parser<'i, '_>) -> InlineStyle {
    let mut style = InlineStyle::new();

    loop {
        input.skip_whitespace();

        if input.is_exhausted() {
            break;
        }

        let result: Result<(String, String), ParseError<'i, ()>> = input.try_parse(|i| {
            let property = i.expect_ident()?.to_ascii_lowercase();
            i.expect_colon()?;

            // Keep the value's source text verbatim: quoted font names,
            // functions like rgba() and shorthands survive untouched.
            let start = i.position();
            i.parse_until_before(Delimiter::Semicolon, |value| {
                while value.next().is_ok() {}
                Ok::<(), ParseError<'i, ()>>(())
            })?;
            let value = i.slice_from(start).trim().to_owned();

            if value.is_empty() {
                return Err(i.new_custom_error(()));
            }
            Ok((property, value))
        });

        if let Ok((property, value)) = result {
            style.set(&property, value);
        }

        // Consume through the next semicolon, recovering from bad input.
        loop {
            match input.next() {
                Ok(Token::Semicolon) | Err(_) => break,
                Ok(_) => continue,
            }
        }
    }

    style
}
