//! Step arguments: tables and doc strings.

use std::collections::HashSet;

use super::Parser;
use super::cursor::Lookahead;
use super::tree::{RawArgument, RawRow, RawTable};
use crate::errors::{ParseError, ParseErrorKind};
use crate::lexer::LineKind;

impl Parser<'_> {
    /// Parse the argument block directly following a step, if any.
    ///
    /// A blank line between the step and the block detaches it. A second
    /// block directly after the first is a conflict.
    pub(super) fn step_argument(&mut self) -> Result<Option<RawArgument>, ParseError> {
        let peek = self.cursor.lookahead()?;
        if peek.after_blank {
            return Ok(None);
        }
        let argument = match peek.what {
            Lookahead::TableRow => RawArgument::Table(self.table()?),
            Lookahead::DocFence => RawArgument::DocString(self.doc_string()?),
            _ => return Ok(None),
        };

        let next = self.cursor.lookahead()?;
        if !next.after_blank && matches!(next.what, Lookahead::TableRow | Lookahead::DocFence) {
            let attached = match argument {
                RawArgument::Table(_) => "a table",
                RawArgument::DocString(_) => "a doc string",
            };
            return Err(ParseError::new(
                ParseErrorKind::StepArgumentConflict,
                next.line,
                format!("step already has {attached}; found another {}", next.what),
            ));
        }
        Ok(Some(argument))
    }

    /// Parse a header row followed by at least one data row.
    pub(super) fn table(&mut self) -> Result<RawTable, ParseError> {
        let mut rows: Vec<RawRow> = Vec::new();
        loop {
            let peek = self.cursor.lookahead()?;
            if !peek.is(Lookahead::TableRow) || (peek.after_blank && !rows.is_empty()) {
                break;
            }
            let next = self.cursor.bump()?;
            if let LineKind::TableRow(cells) = next.line.kind {
                rows.push(RawRow {
                    line: next.line.number,
                    cells,
                });
            }
        }

        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            let peek = self.cursor.lookahead()?;
            return Err(peek.reject(ParseErrorKind::MalformedTable, "a table row"));
        };
        let data: Vec<RawRow> = rows.collect();
        if data.is_empty() {
            let peek = self.cursor.lookahead()?;
            let (kind, line) = if peek.is(Lookahead::End) {
                (ParseErrorKind::UnexpectedEndOfInput, peek.line)
            } else {
                (ParseErrorKind::MalformedTable, header.line)
            };
            return Err(ParseError::new(
                kind,
                line,
                format!(
                    "table starting on line {} has a header row but no data rows",
                    header.line
                ),
            ));
        }

        check_header(&header)?;
        for row in &data {
            check_width(&header, row)?;
        }
        Ok(RawTable { header, data })
    }

    /// Parse a fenced doc string, returning its lines joined by newlines.
    pub(super) fn doc_string(&mut self) -> Result<String, ParseError> {
        let opening = self.cursor.bump()?;
        let mut lines = Vec::new();
        loop {
            let next = self.cursor.bump()?;
            match next.line.kind {
                LineKind::DocFence => return Ok(lines.join("\n")),
                LineKind::Text(text) => lines.push(text),
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::SyntaxError,
                        next.line.number,
                        format!(
                            "doc string opened on line {} was interrupted",
                            opening.line.number
                        ),
                    ));
                }
            }
        }
    }
}

fn check_header(header: &RawRow) -> Result<(), ParseError> {
    let mut seen = HashSet::new();
    for name in &header.cells {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::new(
                ParseErrorKind::MalformedTable,
                header.line,
                format!("table header contains duplicate column '{name}'"),
            ));
        }
    }
    Ok(())
}

fn check_width(header: &RawRow, row: &RawRow) -> Result<(), ParseError> {
    if row.cells.len() == header.cells.len() {
        return Ok(());
    }
    Err(ParseError::new(
        ParseErrorKind::MalformedTable,
        row.line,
        format!(
            "table row has {} cells but the header has {}",
            row.cells.len(),
            header.cells.len()
        ),
    ))
}
