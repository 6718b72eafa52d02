//! Error types for xml2json

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start.line == 0
    }
}

/// Broad error class: the input text was unreadable, or it was readable but
/// did not have the shape the decoder needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Schema,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse error"),
            Self::Schema => write!(f, "schema error"),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    // JSON syntax
    InvalidEscapeSequence,
    InvalidUnicodeEscape,
    UnterminatedString,
    InvalidNumber,
    InvalidToken,
    Expected { expected: String, found: String },
    DuplicateKey { key: String },
    TrailingContent,

    // XML syntax
    UnexpectedEof,
    InvalidName,
    MismatchedTag { expected: String, found: String },
    DuplicateAttribute { name: String },
    InvalidEntity { entity: String },
    InvalidUtf8,
    NoRootElement,

    // Limits
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },

    // Decoder structure
    RootNotObject { found: &'static str },
    RootKeyCount { count: usize },
    ExpectedScalar { key: String, found: &'static str },
    MisplacedArray,
    InvalidXmlName { name: String },
}

impl ErrorKind {
    /// Which side of the taxonomy this kind belongs to
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::RootNotObject { .. }
            | Self::RootKeyCount { .. }
            | Self::ExpectedScalar { .. }
            | Self::MisplacedArray
            | Self::InvalidXmlName { .. } => ErrorCategory::Schema,
            _ => ErrorCategory::Parse,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            Self::InvalidUnicodeEscape => write!(f, "invalid unicode escape"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::InvalidToken => write!(f, "invalid token"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::DuplicateKey { key } => write!(f, "duplicate key: {key}"),
            Self::TrailingContent => write!(f, "unexpected content after document end"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::MismatchedTag { expected, found } => {
                write!(f, "mismatched closing tag: expected </{expected}>, found </{found}>")
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidEntity { entity } => write!(f, "invalid entity reference: &{entity};"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::NoRootElement => write!(f, "document has no root element"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::RootNotObject { found } => {
                write!(f, "top-level value must be an object, found {found}")
            }
            Self::RootKeyCount { count } => {
                write!(f, "top-level object must have exactly one key, found {count}")
            }
            Self::ExpectedScalar { key, found } => {
                write!(f, "value of {key} must be a string or null, found {found}")
            }
            Self::MisplacedArray => {
                write!(f, "an array is only allowed as the value of a child element key")
            }
            Self::InvalidXmlName { name } => write!(f, "not a valid XML name: {name:?}"),
        }
    }
}

/// Main error type for xml2json
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    path: Option<String>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            path: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            path: None,
            message: message.into(),
        }
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, offset: usize, line: u32, col: u32) -> Self {
        Self::new(kind, Span::at(Pos::new(offset, line, col)))
    }

    /// Create a structural error located by its key path inside the JSON value
    pub fn schema(kind: ErrorKind, path: impl Into<String>) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span: Span::empty(),
            path: Some(path.into()),
            message,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn is_parse(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }

    pub fn is_schema(&self) -> bool {
        self.category() == ErrorCategory::Schema
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.span.is_empty()) {
            (Some(path), _) => write!(f, "{} at {path}: {}", self.category(), self.message),
            (None, false) => write!(
                f,
                "{} at {}: {}",
                self.category(),
                self.span.start,
                self.message
            ),
            (None, true) => write!(f, "{}: {}", self.category(), self.message),
        }
    }
}

/// Result type alias for xml2json
pub type Result<T> = std::result::Result<T, Error>;
