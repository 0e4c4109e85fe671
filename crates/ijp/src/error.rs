//! Errors reported by the streaming parser.
//!
//! Every failure is returned synchronously from the `feed`, `feed_bytes` or
//! `close` call that detected it. Apart from [`UsageError`], an error poisons
//! the session: later calls return the same error again.
use thiserror::Error;

use crate::path::Path;

/// A parse failure, tagged with where in the input it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) path: Path,
}

impl ParserError {
    /// The error family.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.source {
            ErrorSource::Syntax(_) => ErrorKind::Syntax,
            ErrorSource::Structural(_) => ErrorKind::Structural,
            ErrorSource::IncompleteInput(_) => ErrorKind::IncompleteInput,
            ErrorSource::Usage(_) => ErrorKind::Usage,
            ErrorSource::ResourceLimit(_) => ErrorKind::ResourceLimit,
        }
    }

    /// The underlying cause.
    #[must_use]
    pub fn source_error(&self) -> &ErrorSource {
        &self.source
    }

    /// Approximate byte offset into the concatenated input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column (in characters) of the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Path of the value being parsed when the error was detected.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if this error poisons the session it came from.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self.source, ErrorSource::Usage(_))
    }
}

/// Coarse classification of a [`ParserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed lexical token.
    Syntax,
    /// Well-formed tokens in an illegal order.
    Structural,
    /// Input ended before a complete document, or continued after it.
    IncompleteInput,
    /// The session was driven outside of its lifecycle.
    Usage,
    /// A configured bound was exceeded.
    ResourceLimit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
    #[error("incomplete input: {0}")]
    IncompleteInput(#[from] IncompleteInput),
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
    #[error("resource limit: {0}")]
    ResourceLimit(#[from] ResourceLimit),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("invalid character '{}'", .0.escape_debug())]
    InvalidCharacter(char),
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence at character '{}'", .0.escape_debug())]
    InvalidUnicodeEscapeChar(char),
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    #[error("unescaped control character U+{0:04X} in string")]
    ControlCharacterInString(u32),
    #[error("invalid number '{0}'")]
    InvalidNumber(alloc::string::String),
    #[error("integer '{0}' does not fit in 64 bits")]
    IntegerOverflow(alloc::string::String),
    #[error("invalid UTF-8 byte 0x{0:02X}")]
    InvalidUtf8(u8),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("object keys must be strings, found {found}")]
    NonStringKey { found: &'static str },
    #[error("expected ':' after object key, found {found}")]
    MissingColon { found: &'static str },
    #[error("expected ',' or '{close}', found {found}")]
    MissingComma { close: char, found: &'static str },
    #[error("trailing comma before '{0}'")]
    TrailingComma(char),
    #[error("mismatched bracket: expected '{expected}', found '{found}'")]
    MismatchedBracket { expected: char, found: char },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncompleteInput {
    #[error("no JSON value in input")]
    NoValue,
    #[error("{depth} unclosed container(s)")]
    UnclosedContainers { depth: usize },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("input ends inside a UTF-8 sequence")]
    PartialCodePoint,
    #[error("unexpected content after the top-level value")]
    TrailingContent,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    #[error("input fed after the parser was closed")]
    FeedAfterClose,
    #[error("parser closed twice")]
    AlreadyClosed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLimit {
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
    #[error("more than {limit} undrained events queued")]
    QueueFull { limit: usize },
}
