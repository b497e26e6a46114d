//! Recursive-descent grammar engine over classified lines.
//!
//! ```text
//! Document    := TagLine* "Feature:" name Description? Background? Scenario+
//! Description := Text+
//! Background  := TagLine* "Background:" name Description? Step*
//! Scenario    := TagLine* ("Scenario:" | "Scenario Outline:") name Description? Step* Examples*
//! Examples    := "Examples:" name Table
//! Step        := StepKeyword text (Table | DocString)?
//! Table       := TableRow{header} TableRow{data}+
//! DocString   := '"""' Text* '"""'
//! ```
//!
//! Every production looks at most one significant line ahead. The scenario
//! variant is fixed by its keyword line; an outline that ends without an
//! `Examples:` block is an error rather than a simple scenario. Tags before
//! `Examples:` are rejected on the tag line itself.

mod arguments;
mod cursor;
pub(crate) mod tree;

use crate::errors::{ParseError, ParseErrorKind};
use crate::keyword::SectionKeyword;
use crate::lexer::LineKind;
use crate::model::Tag;

use cursor::{Cursor, Lookahead, Significant};
use tree::{RawBackground, RawFeature, RawScenario, RawStep, RawTable, ScenarioKind};

/// Parser state for a single call: the cursor over classified lines.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            cursor: Cursor::new(text),
        }
    }

    /// Parse a complete feature document.
    pub(crate) fn parse_document(mut self) -> Result<RawFeature, ParseError> {
        let tags = self.tags()?;
        let peek = self.cursor.lookahead()?;
        if !peek.is(Lookahead::Section(SectionKeyword::Feature)) {
            let kind = if tags.is_empty() {
                ParseErrorKind::SyntaxError
            } else {
                ParseErrorKind::UnexpectedLine
            };
            return Err(peek.reject(kind, "'Feature:'"));
        }
        let (_, name) = self.section(SectionKeyword::Feature)?;
        let description = self.description()?;
        log::trace!("feature '{name}' opened on line {}", peek.line);

        let mut background = None;
        let mut scenarios = Vec::new();
        loop {
            let entity_tags = self.tags()?;
            let peek = self.cursor.lookahead()?;
            match peek.what {
                Lookahead::Section(SectionKeyword::Background)
                    if background.is_none() && scenarios.is_empty() =>
                {
                    background = Some(self.background(entity_tags)?);
                }
                Lookahead::Section(SectionKeyword::Scenario | SectionKeyword::ScenarioOutline) => {
                    scenarios.push(self.scenario(entity_tags)?);
                }
                Lookahead::End if entity_tags.is_empty() => break,
                _ => {
                    let expected = if entity_tags.is_empty() {
                        "'Scenario:' or 'Scenario Outline:'"
                    } else {
                        "'Background:', 'Scenario:' or 'Scenario Outline:' after tags"
                    };
                    return Err(peek.reject(ParseErrorKind::UnexpectedLine, expected));
                }
            }
        }

        if scenarios.is_empty() {
            let end = self.cursor.lookahead()?;
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfInput,
                end.line,
                format!("feature '{name}' has no scenarios"),
            ));
        }

        Ok(RawFeature {
            tags,
            name,
            description,
            background,
            scenarios,
        })
    }

    /// Parse a single, optionally tagged, scenario block.
    pub(crate) fn parse_scenario_block(mut self) -> Result<RawScenario, ParseError> {
        let tags = self.tags()?;
        let peek = self.cursor.lookahead()?;
        if !matches!(
            peek.what,
            Lookahead::Section(SectionKeyword::Scenario | SectionKeyword::ScenarioOutline)
        ) {
            let kind = if tags.is_empty() {
                ParseErrorKind::SyntaxError
            } else {
                ParseErrorKind::UnexpectedLine
            };
            return Err(peek.reject(kind, "'Scenario:' or 'Scenario Outline:'"));
        }
        let scenario = self.scenario(tags)?;
        let trailing = self.cursor.lookahead()?;
        if !trailing.is(Lookahead::End) {
            return Err(trailing.reject(ParseErrorKind::UnexpectedLine, "end of scenario"));
        }
        Ok(scenario)
    }

    fn tags(&mut self) -> Result<Vec<Tag>, ParseError> {
        let mut tags = Vec::new();
        while self.cursor.lookahead()?.is(Lookahead::Tags) {
            if let LineKind::TagLine(line_tags) = self.cursor.bump()?.line.kind {
                tags.extend(line_tags);
            }
        }
        Ok(tags)
    }

    /// Consume a section keyword line, returning its line number and name.
    fn section(&mut self, expected: SectionKeyword) -> Result<(usize, String), ParseError> {
        let next = self.cursor.bump()?;
        match next.line.kind {
            LineKind::Keyword(keyword, name) if keyword == expected => Ok((next.line.number, name)),
            _ => Err(ParseError::new(
                ParseErrorKind::SyntaxError,
                next.line.number,
                format!("expected '{expected}'"),
            )),
        }
    }

    fn description(&mut self) -> Result<Option<String>, ParseError> {
        let mut parts: Vec<String> = Vec::new();
        loop {
            let peek = self.cursor.lookahead()?;
            if !peek.is(Lookahead::Text) || (peek.after_blank && !parts.is_empty()) {
                break;
            }
            if let LineKind::Text(text) = self.cursor.bump()?.line.kind {
                parts.push(text);
            }
        }
        Ok((!parts.is_empty()).then(|| parts.join(" ")))
    }

    fn background(&mut self, tags: Vec<Tag>) -> Result<RawBackground, ParseError> {
        let (line, name) = self.section(SectionKeyword::Background)?;
        log::trace!("background opened on line {line}");
        let description = self.description()?;
        let steps = self.steps()?;
        Ok(RawBackground {
            tags,
            name,
            description,
            steps,
        })
    }

    fn scenario(&mut self, tags: Vec<Tag>) -> Result<RawScenario, ParseError> {
        let header = self.cursor.bump()?;
        let line = header.line.number;
        let (kind, name) = match header.line.kind {
            LineKind::Keyword(SectionKeyword::Scenario, name) => (ScenarioKind::Simple, name),
            LineKind::Keyword(SectionKeyword::ScenarioOutline, name) => {
                (ScenarioKind::Outline, name)
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::SyntaxError,
                    line,
                    "expected 'Scenario:' or 'Scenario Outline:'",
                ));
            }
        };
        log::trace!("scenario '{name}' ({kind:?}) opened on line {line}");

        let description = self.description()?;
        let steps = self.steps()?;
        let examples = self.examples(kind)?;
        if kind == ScenarioKind::Outline && examples.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::MissingExamples,
                line,
                format!("scenario outline '{name}' has no 'Examples:' table"),
            ));
        }

        Ok(RawScenario {
            line,
            kind,
            tags,
            name,
            description,
            steps,
            examples,
        })
    }

    fn steps(&mut self) -> Result<Vec<RawStep>, ParseError> {
        let mut steps = Vec::new();
        loop {
            let peek = self.cursor.lookahead()?;
            match peek.what {
                Lookahead::Step => steps.push(self.step()?),
                Lookahead::Text | Lookahead::TableRow | Lookahead::DocFence => {
                    return Err(peek.reject(ParseErrorKind::UnexpectedLine, "a step"));
                }
                _ => return Ok(steps),
            }
        }
    }

    fn step(&mut self) -> Result<RawStep, ParseError> {
        let Significant { line, .. } = self.cursor.bump()?;
        let LineKind::Step(keyword, text) = line.kind else {
            return Err(ParseError::new(
                ParseErrorKind::SyntaxError,
                line.number,
                "expected a step",
            ));
        };
        let argument = self.step_argument()?;
        Ok(RawStep {
            keyword,
            text,
            argument,
        })
    }

    fn examples(&mut self, kind: ScenarioKind) -> Result<Vec<RawTable>, ParseError> {
        let mut tables: Vec<RawTable> = Vec::new();
        loop {
            let peek = self.cursor.lookahead()?;
            if peek.is(Lookahead::Tags)
                && self.cursor.section_after_tags() == Some(SectionKeyword::Examples)
            {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedLine,
                    peek.line,
                    "tags are not allowed before 'Examples:'",
                ));
            }
            if !peek.is(Lookahead::Section(SectionKeyword::Examples)) {
                return Ok(tables);
            }
            if kind == ScenarioKind::Simple {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedLine,
                    peek.line,
                    "'Examples:' is only valid under 'Scenario Outline:'",
                ));
            }
            self.section(SectionKeyword::Examples)?;
            let start = self.cursor.lookahead()?;
            if !start.is(Lookahead::TableRow) {
                return Err(start.reject(ParseErrorKind::UnexpectedLine, "an examples table"));
            }
            let table = self.table()?;
            if let Some(first) = tables.first() {
                check_same_header(first, &table)?;
            }
            tables.push(table);
        }
    }
}

fn check_same_header(first: &RawTable, next: &RawTable) -> Result<(), ParseError> {
    if first.header.cells == next.header.cells {
        return Ok(());
    }
    Err(ParseError::new(
        ParseErrorKind::MalformedTable,
        next.header.line,
        format!(
            "examples header [{}] differs from the first examples header [{}]",
            next.header.cells.join(", "),
            first.header.cells.join(", "),
        ),
    ))
}
