//! Line-oriented parser for Gherkin `.feature` documents.
//!
//! The crate turns feature text into an immutable, strongly-typed
//! [`Feature`]. Parsing runs in three stages:
//!
//! 1. the [`lexer`] classifies each line (tags, section keywords, steps,
//!    table rows, doc string fences, free text);
//! 2. a recursive-descent grammar with one-line lookahead builds a validated
//!    parse tree, reporting the first malformation as a [`ParseError`] with
//!    its 1-based line number;
//! 3. the tree is materialised into the document model. Scenario Outlines
//!    keep their `<placeholder>` step text alongside one [`Example`] per data
//!    row; [`substitute`] produces concrete steps on demand.
//!
//! Only the fixed English keyword set is recognised. Parsing is pure and
//! synchronous, so independent documents can be parsed from many threads
//! without coordination.
//!
//! # Examples
//!
//! ```
//! use featurette::parse_feature;
//!
//! let feature = parse_feature("Feature: F\n\nScenario: s\nGiven a\nAnd b").unwrap();
//! assert_eq!(feature.name, "F");
//! assert_eq!(feature.scenarios[0].steps().len(), 2);
//! assert_eq!(feature.scenarios[0].steps()[0].text, "a");
//! ```

mod errors;
mod keyword;
pub mod lexer;
mod load;
mod model;
mod parser;
mod placeholder;
mod transform;

pub use errors::{LoadError, ParseError, ParseErrorKind};
pub use keyword::{SectionKeyword, StepKeyword, StepKeywordParseError};
pub use load::{load_feature, parse_feature_bytes};
pub use model::{
    Background, DataTable, Example, Feature, OutlineScenario, Scenario, SimpleScenario, Step,
    StepArgument, Tag,
};
pub use placeholder::{contains_placeholders, placeholders, substitute, substitute_text};

use parser::Parser;

/// Parse a complete feature document.
///
/// # Errors
///
/// Returns the first grammar violation as a [`ParseError`]; no partial
/// feature is produced.
pub fn parse_feature(text: &str) -> Result<Feature, ParseError> {
    Parser::new(text)
        .parse_document()
        .map(Feature::from)
        .inspect(|feature| {
            log::debug!(
                "parsed feature '{}' with {} scenario(s)",
                feature.name,
                feature.scenarios.len()
            );
        })
        .inspect_err(|err| log::debug!("feature parse failed: {err}"))
}

/// Parse a standalone scenario block, with optional leading tags.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not exactly one scenario.
///
/// # Examples
///
/// ```
/// use featurette::{ParseErrorKind, parse_scenario};
///
/// let err = parse_scenario("Scenario Outline: s\nGiven a <x>").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::MissingExamples);
/// assert_eq!(err.line, 1);
/// ```
pub fn parse_scenario(text: &str) -> Result<Scenario, ParseError> {
    Parser::new(text)
        .parse_scenario_block()
        .map(Scenario::from)
}
