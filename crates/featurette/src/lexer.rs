//! Line classifier turning raw feature text into typed lines.
//!
//! Indentation is insignificant: every line is trimmed before it is
//! classified. Keywords match case-sensitively, so a wrongly cased keyword
//! is plain text. A `"""` fence switches the lexer into raw capture, where every
//! line up to the closing fence is reported as [`LineKind::Text`] with only
//! the fence's own indentation removed. The [`Lexer`] is a cheap, cloneable
//! iterator, so a caller can restart classification from any point by
//! cloning it.

use crate::errors::{ParseError, ParseErrorKind};
use crate::keyword::{SectionKeyword, StepKeyword, UNSUPPORTED_KEYWORDS};
use crate::model::Tag;

const DOC_FENCE: &str = "\"\"\"";

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Shape of the line.
    pub kind: LineKind,
}

/// Shape of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only.
    Blank,
    /// A `#` comment.
    Comment,
    /// One or more `@tag` tokens.
    TagLine(Vec<Tag>),
    /// A section keyword and the trimmed name after it.
    Keyword(SectionKeyword, String),
    /// A step keyword and the trimmed step text.
    Step(StepKeyword, String),
    /// A `"""` doc string fence.
    DocFence,
    /// A table row split into trimmed, unescaped cells.
    TableRow(Vec<String>),
    /// Free text, or a captured doc string line.
    Text(String),
}

#[derive(Debug, Clone, Copy)]
struct OpenFence {
    line: usize,
    indent: usize,
}

/// Lazy classifier over the lines of a feature document.
///
/// # Examples
/// ```
/// use featurette::lexer::{Lexer, LineKind};
/// use featurette::SectionKeyword;
///
/// let mut lines = Lexer::new("Feature: Demo\n");
/// let first = lines.next().unwrap().unwrap();
/// assert_eq!(first.kind, LineKind::Keyword(SectionKeyword::Feature, "Demo".into()));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    fence: Option<OpenFence>,
    last_line: usize,
}

impl<'a> Lexer<'a> {
    /// Start classifying `text` from its first line.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            fence: None,
            last_line: 0,
        }
    }

    /// Number of the last line produced so far, or 0 before the first.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.last_line
    }

    fn classify(&mut self, number: usize, raw: &str) -> Result<LineKind, ParseError> {
        let content = raw.trim();
        if let Some(fence) = self.fence {
            if content == DOC_FENCE {
                self.fence = None;
                return Ok(LineKind::DocFence);
            }
            return Ok(LineKind::Text(dedent(raw, fence.indent).to_string()));
        }

        if content.is_empty() {
            return Ok(LineKind::Blank);
        }
        if content.starts_with('#') {
            return Ok(LineKind::Comment);
        }
        if content.starts_with('@') {
            return parse_tags(number, content).map(LineKind::TagLine);
        }
        if content.starts_with('|') {
            return split_row(number, content).map(LineKind::TableRow);
        }
        if content == DOC_FENCE {
            self.fence = Some(OpenFence {
                line: number,
                indent: indentation(raw),
            });
            return Ok(LineKind::DocFence);
        }
        if let Some(kind) = classify_keyword(number, content)? {
            return Ok(kind);
        }
        Ok(LineKind::Text(content.to_string()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((index, raw)) = self.lines.next() else {
            return self.fence.take().map(|fence| {
                Err(ParseError::new(
                    ParseErrorKind::UnexpectedEndOfInput,
                    fence.line,
                    "doc string is never closed",
                ))
            });
        };
        let number = index + 1;
        self.last_line = number;
        Some(self.classify(number, raw).map(|kind| Line { number, kind }))
    }
}

fn classify_keyword(number: usize, content: &str) -> Result<Option<LineKind>, ParseError> {
    for keyword in SectionKeyword::ALL {
        if let Some(name) = content.strip_prefix(keyword.prefix()) {
            return Ok(Some(LineKind::Keyword(keyword, name.trim().to_string())));
        }
    }
    for keyword in StepKeyword::ALL {
        if let Some(text) = content
            .strip_prefix(keyword.as_str())
            .and_then(|rest| rest.strip_prefix(char::is_whitespace))
        {
            return Ok(Some(LineKind::Step(keyword, text.trim().to_string())));
        }
    }
    if let Some(unsupported) = UNSUPPORTED_KEYWORDS
        .into_iter()
        .find(|kw| content.starts_with(kw))
    {
        return Err(ParseError::new(
            ParseErrorKind::UnknownKeyword,
            number,
            format!("'{unsupported}' is not supported"),
        ));
    }
    Ok(None)
}

fn parse_tags(number: usize, content: &str) -> Result<Vec<Tag>, ParseError> {
    let mut tags = Vec::new();
    for token in content.split_whitespace() {
        if token.starts_with('#') {
            break;
        }
        let Some(name) = token.strip_prefix('@').filter(|name| !name.is_empty()) else {
            return Err(ParseError::new(
                ParseErrorKind::SyntaxError,
                number,
                format!("expected '@name' in tag line, found '{token}'"),
            ));
        };
        tags.push(Tag::new(name));
    }
    Ok(tags)
}

/// Split a `|`-delimited row into trimmed cells.
///
/// `\|` yields a literal pipe, `\\` a backslash, and `\n` a newline. The row
/// must end with an unescaped `|`.
pub(crate) fn split_row(number: usize, content: &str) -> Result<Vec<String>, ParseError> {
    let mut chars = content.chars();
    if chars.next() != Some('|') {
        return Err(ParseError::new(
            ParseErrorKind::MalformedTable,
            number,
            "table row must start with '|'",
        ));
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut terminated = false;
    while let Some(ch) = chars.next() {
        terminated = false;
        match ch {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('\\') => cell.push('\\'),
                Some('n') => cell.push('\n'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => {
                cells.push(cell.trim().to_string());
                cell.clear();
                terminated = true;
            }
            other => cell.push(other),
        }
    }

    if !terminated {
        return Err(ParseError::new(
            ParseErrorKind::MalformedTable,
            number,
            "table row must end with '|'",
        ));
    }
    Ok(cells)
}

fn indentation(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

fn dedent(raw: &str, indent: usize) -> &str {
    let mut rest = raw;
    for _ in 0..indent {
        match rest.strip_prefix(char::is_whitespace) {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(text: &str) -> Vec<LineKind> {
        Lexer::new(text)
            .map(|line| match line {
                Ok(line) => line.kind,
                Err(err) => panic!("unexpected lexer error: {err}"),
            })
            .collect()
    }

    fn first_error(text: &str) -> ParseError {
        match Lexer::new(text).find_map(Result::err) {
            Some(err) => err,
            None => panic!("expected a lexer error for {text:?}"),
        }
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classifies_each_line_shape() {
        let text = "@wip\nFeature: Demo\n  # comment\n\n  Given a step\n  | a | b |\n  \"\"\"\n  some text\n  \"\"\"\nfree text\n";
        assert_eq!(
            kinds(text),
            vec![
                LineKind::TagLine(vec![Tag::new("wip")]),
                LineKind::Keyword(SectionKeyword::Feature, "Demo".into()),
                LineKind::Comment,
                LineKind::Blank,
                LineKind::Step(StepKeyword::Given, "a step".into()),
                LineKind::TableRow(cells(&["a", "b"])),
                LineKind::DocFence,
                LineKind::Text("some text".into()),
                LineKind::DocFence,
                LineKind::Text("free text".into()),
            ]
        );
    }

    #[rstest]
    #[case("Scenario Outline: out", SectionKeyword::ScenarioOutline, "out")]
    #[case("Scenario:   spaced  ", SectionKeyword::Scenario, "spaced")]
    #[case("Background:", SectionKeyword::Background, "")]
    #[case("Examples: first batch", SectionKeyword::Examples, "first batch")]
    fn recognises_section_keywords(
        #[case] line: &str,
        #[case] keyword: SectionKeyword,
        #[case] name: &str,
    ) {
        assert_eq!(
            kinds(line),
            vec![LineKind::Keyword(keyword, name.to_string())]
        );
    }

    #[rstest]
    #[case("Given a", StepKeyword::Given, "a")]
    #[case("When\tb", StepKeyword::When, "b")]
    #[case("  Then   c  ", StepKeyword::Then, "c")]
    #[case("And d", StepKeyword::And, "d")]
    #[case("But e", StepKeyword::But, "e")]
    fn recognises_step_keywords(
        #[case] line: &str,
        #[case] keyword: StepKeyword,
        #[case] text: &str,
    ) {
        assert_eq!(kinds(line), vec![LineKind::Step(keyword, text.to_string())]);
    }

    #[rstest]
    #[case::step_prefix_without_space("Givenchy is a brand")]
    #[case::bare_step_keyword("Then")]
    #[case::keyword_mid_line("Notes: Feature: inline")]
    #[case::lowercase_section("background: the team wants fast tests")]
    #[case::uppercase_section("FEATURE: shouting")]
    #[case::lowercase_step("given a lowercase step")]
    fn keyword_lookalikes_are_text(#[case] line: &str) {
        assert_eq!(kinds(line), vec![LineKind::Text(line.trim().to_string())]);
    }

    #[test]
    fn doc_string_captures_lines_verbatim() {
        let text =
            "    \"\"\"\n    | not a row |\n      Given indented\n\n    # kept\n    \"\"\"\n";
        assert_eq!(
            kinds(text),
            vec![
                LineKind::DocFence,
                LineKind::Text("| not a row |".into()),
                LineKind::Text("  Given indented".into()),
                LineKind::Text(String::new()),
                LineKind::Text("# kept".into()),
                LineKind::DocFence,
            ]
        );
    }

    #[test]
    fn unclosed_doc_string_reports_opening_fence() {
        let err = first_error("Given a\n\"\"\"\ntext\n");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.line, 2);
    }

    #[rstest]
    #[case("| a | b |", &["a", "b"])]
    #[case("||", &[""])]
    #[case(r"| a \| b | c |", &["a | b", "c"])]
    #[case(r"| back\\slash |", &[r"back\slash"])]
    #[case(r"| two\nlines |", &["two\nlines"])]
    #[case(r"| keep \t |", &[r"keep \t"])]
    fn splits_rows_on_unescaped_pipes(#[case] row: &str, #[case] expected: &[&str]) {
        let split = split_row(1, row).unwrap_or_else(|err| panic!("row should split: {err}"));
        assert_eq!(split, cells(expected));
    }

    #[rstest]
    #[case("| a | b")]
    #[case("|")]
    #[case(r"| a \|")]
    fn rejects_unterminated_rows(#[case] row: &str) {
        let err = first_error(row);
        assert_eq!(err.kind, ParseErrorKind::MalformedTable);
    }

    #[test]
    fn tag_lines_split_on_whitespace_and_stop_at_comments() {
        assert_eq!(
            kinds("@a   @b @a # trailing @c"),
            vec![LineKind::TagLine(vec![
                Tag::new("a"),
                Tag::new("b"),
                Tag::new("a"),
            ])]
        );
    }

    #[rstest]
    #[case("@ok bare")]
    #[case("@")]
    fn rejects_malformed_tags(#[case] line: &str) {
        assert_eq!(first_error(line).kind, ParseErrorKind::SyntaxError);
    }

    #[rstest]
    #[case::rule("Rule: grouping")]
    #[case::example_synonym("Example: alias")]
    #[case::template_synonym("Scenario Template: alias")]
    #[case::scenarios_synonym("Scenarios:")]
    fn rejects_unsupported_keywords(#[case] line: &str) {
        let err = first_error(&format!("\n{line}\n"));
        assert_eq!(err.kind, ParseErrorKind::UnknownKeyword);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn lexer_is_restartable_by_cloning() {
        let mut lexer = Lexer::new("Feature: F\nScenario: s\n");
        let snapshot = lexer.clone();
        let first: Vec<_> = lexer.by_ref().collect();
        let second: Vec<_> = snapshot.collect();
        assert_eq!(first, second);
        assert_eq!(lexer.last_line(), 2);
    }

    #[test]
    fn handles_crlf_line_endings() {
        assert_eq!(
            kinds("Feature: F\r\nGiven a\r\n"),
            vec![
                LineKind::Keyword(SectionKeyword::Feature, "F".into()),
                LineKind::Step(StepKeyword::Given, "a".into()),
            ]
        );
    }
}
