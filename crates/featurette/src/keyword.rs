//! Step and section keywords recognised by the line classifier.
//!
//! The keyword set is the fixed English Gherkin vocabulary. Matching is a
//! case-sensitive literal prefix match; [`StepKeyword`]'s `FromStr`
//! implementation is the only lenient entry point and exists for consumers
//! that read roles back from configuration or serialised data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keyword used to categorise a step.
///
/// The enum includes `And` and `But` variants so the document model keeps
/// the role exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Every step keyword, in classification order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use featurette::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::And.as_str(), "And");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step keyword: {}", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

/// Structural keyword that opens a section of a feature document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKeyword {
    /// `Feature:`
    Feature,
    /// `Background:`
    Background,
    /// `Scenario:`
    Scenario,
    /// `Scenario Outline:`
    ScenarioOutline,
    /// `Examples:`
    Examples,
}

impl SectionKeyword {
    /// Every section keyword, in classification order.
    pub const ALL: [Self; 5] = [
        Self::Feature,
        Self::Background,
        Self::ScenarioOutline,
        Self::Scenario,
        Self::Examples,
    ];

    /// Literal line prefix, including the trailing colon.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Feature => "Feature:",
            Self::Background => "Background:",
            Self::Scenario => "Scenario:",
            Self::ScenarioOutline => "Scenario Outline:",
            Self::Examples => "Examples:",
        }
    }
}

impl fmt::Display for SectionKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Gherkin keywords outside the supported vocabulary.
///
/// Lines starting with one of these are rejected rather than folded into a
/// description.
pub(crate) const UNSUPPORTED_KEYWORDS: [&str; 4] =
    ["Rule:", "Example:", "Scenario Template:", "Scenarios:"];
