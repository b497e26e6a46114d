//! One-line lookahead over the significant lines of a document.
//!
//! Comments are dropped. Blank lines are folded into the `after_blank` flag
//! of the next significant line, which is how descriptions and step
//! arguments detect that they have ended.

use std::fmt;

use crate::errors::{ParseError, ParseErrorKind};
use crate::keyword::SectionKeyword;
use crate::lexer::{Lexer, Line, LineKind};

/// A line the grammar has to look at.
#[derive(Debug, Clone)]
pub(super) struct Significant {
    pub(super) line: Line,
    pub(super) after_blank: bool,
}

/// Copyable summary of the next significant line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lookahead {
    End,
    Tags,
    Section(SectionKeyword),
    Step,
    DocFence,
    TableRow,
    Text,
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => f.write_str("end of input"),
            Self::Tags => f.write_str("tag line"),
            Self::Section(keyword) => write!(f, "'{keyword}'"),
            Self::Step => f.write_str("step"),
            Self::DocFence => f.write_str("doc string"),
            Self::TableRow => f.write_str("table row"),
            Self::Text => f.write_str("free text"),
        }
    }
}

/// Result of a lookahead: what comes next and where.
#[derive(Debug, Clone, Copy)]
pub(super) struct Peek {
    pub(super) what: Lookahead,
    pub(super) line: usize,
    pub(super) after_blank: bool,
}

impl Peek {
    pub(super) fn is(&self, what: Lookahead) -> bool {
        self.what == what
    }

    /// Build an error for a line the current production cannot accept.
    ///
    /// End of input becomes [`ParseErrorKind::UnexpectedEndOfInput`]; any
    /// other line becomes `kind`.
    pub(super) fn reject(&self, kind: ParseErrorKind, expected: &str) -> ParseError {
        let kind = if self.is(Lookahead::End) {
            ParseErrorKind::UnexpectedEndOfInput
        } else {
            kind
        };
        ParseError::new(kind, self.line, format!("expected {expected}, found {}", self.what))
    }
}

pub(super) struct Cursor<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Significant>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            peeked: None,
        }
    }

    fn fill(&mut self) -> Result<(), ParseError> {
        if self.peeked.is_some() {
            return Ok(());
        }
        let mut after_blank = false;
        for line in self.lexer.by_ref() {
            let line = line?;
            match line.kind {
                LineKind::Blank => after_blank = true,
                LineKind::Comment => {}
                _ => {
                    self.peeked = Some(Significant { line, after_blank });
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// Describe the next significant line without consuming it.
    pub(super) fn lookahead(&mut self) -> Result<Peek, ParseError> {
        self.fill()?;
        let Some(next) = self.peeked.as_ref() else {
            return Ok(Peek {
                what: Lookahead::End,
                line: self.lexer.last_line().max(1),
                after_blank: false,
            });
        };
        let what = match &next.line.kind {
            LineKind::TagLine(_) => Lookahead::Tags,
            LineKind::Keyword(keyword, _) => Lookahead::Section(*keyword),
            LineKind::Step(..) => Lookahead::Step,
            LineKind::DocFence => Lookahead::DocFence,
            LineKind::TableRow(_) => Lookahead::TableRow,
            LineKind::Text(_) | LineKind::Blank | LineKind::Comment => Lookahead::Text,
        };
        Ok(Peek {
            what,
            line: next.line.number,
            after_blank: next.after_blank,
        })
    }

    /// Section keyword on the first line after the pending tag lines.
    ///
    /// Only meaningful while the lookahead is a tag line. Scans a clone of the
    /// lexer, so nothing is consumed; a lexer error ends the scan.
    pub(super) fn section_after_tags(&self) -> Option<SectionKeyword> {
        let line = self
            .lexer
            .clone()
            .map_while(Result::ok)
            .find(|line| {
                !matches!(
                    line.kind,
                    LineKind::Blank | LineKind::Comment | LineKind::TagLine(_)
                )
            })?;
        match line.kind {
            LineKind::Keyword(keyword, _) => Some(keyword),
            _ => None,
        }
    }

    /// Consume the next significant line.
    pub(super) fn bump(&mut self) -> Result<Significant, ParseError> {
        self.fill()?;
        self.peeked.take().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEndOfInput,
                self.lexer.last_line().max(1),
                "unexpected end of input",
            )
        })
    }
}
