//! Error types for marklog operations.

use thiserror::Error;

/// Errors raised around a conversion: loading style configuration, reading
/// input, or resolving presets.
///
/// The conversion itself is total over its input and never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid style configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unknown preset: {0} (expected one of default, classic, modern, minimal)")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure inside a syntax highlighter.
///
/// Code blocks that fail to highlight degrade to plain text, so this error
/// never escapes a conversion.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("syntax parsing failed: {0}")]
    Parse(#[from] syntect::parsing::ParsingError),

    #[error("scope stack error: {0}")]
    Scope(String),
}
