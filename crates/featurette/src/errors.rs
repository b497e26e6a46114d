//! Error types surfaced by the parser and the byte/file boundary.

use std::fmt;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Category of a grammar failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A `Scenario Outline:` ended without an `Examples:` block.
    MissingExamples,
    /// A line appeared where the grammar does not allow it.
    UnexpectedLine,
    /// Input ended while a required production was incomplete.
    UnexpectedEndOfInput,
    /// A step was followed by both a table and a doc string.
    StepArgumentConflict,
    /// A table row was unterminated, uneven, or the header was invalid.
    MalformedTable,
    /// A keyword outside the supported vocabulary was used.
    UnknownKeyword,
    /// Any other malformation, such as content before `Feature:`.
    SyntaxError,
}

impl ParseErrorKind {
    /// Short human-readable label for the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingExamples => "missing examples",
            Self::UnexpectedLine => "unexpected line",
            Self::UnexpectedEndOfInput => "unexpected end of input",
            Self::StepArgumentConflict => "step argument conflict",
            Self::MalformedTable => "malformed table",
            Self::UnknownKeyword => "unknown keyword",
            Self::SyntaxError => "syntax error",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar error with the 1-based source line where it was detected.
///
/// # Examples
/// ```
/// use featurette::{ParseErrorKind, parse_feature};
///
/// let err = parse_feature("Feature: F\n").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
/// assert_eq!(err.line, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {message}")]
pub struct ParseError {
    /// Category of the failure.
    pub kind: ParseErrorKind,
    /// 1-based line number where the failure was detected.
    pub line: usize,
    /// Description of what the parser expected.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

/// Errors raised when loading a feature from bytes or from disk.
///
/// Decoding failures are kept apart from grammar failures so callers can tell
/// "not valid text" from "not valid Gherkin".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The feature file could not be read.
    #[error("failed to read feature file {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The bytes were not valid UTF-8.
    #[error("feature text is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),
    /// The text was decoded but is not a valid feature document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
