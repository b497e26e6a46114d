//! Immutable document model produced by a successful parse.
//!
//! Every entity is owned by value; there are no back-references. The serde
//! representation is a plain keyed structure. [`Scenario`] is untagged: a
//! decoder tries the simple shape first and falls back to the outline shape,
//! and the two shapes are mutually exclusive because [`SimpleScenario`]
//! rejects an `examples` field while [`OutlineScenario`] requires a non-empty
//! one.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::keyword::StepKeyword;
use crate::placeholder;

/// Top-level document unit; one per parsed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    /// Text after `Feature:`.
    pub name: String,
    /// Free-text lines after the name, joined by single spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags written above `Feature:`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Steps run before every scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Scenarios in document order.
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Look up a scenario by name, returning the first match.
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name() == name)
    }

    /// Iterate over the outline scenarios only.
    pub fn outlines(&self) -> impl Iterator<Item = &OutlineScenario> {
        self.scenarios.iter().filter_map(Scenario::as_outline)
    }
}

/// Steps implicitly run before every scenario in a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Background {
    /// Text after `Background:`; often empty.
    pub name: String,
    /// Free-text lines after the name, joined by single spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags written above `Background:`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Steps in document order.
    pub steps: Vec<Step>,
}

/// A single example of behaviour, either concrete or parameterised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scenario {
    /// Declared with `Scenario:`.
    Simple(SimpleScenario),
    /// Declared with `Scenario Outline:` and followed by `Examples:`.
    Outline(OutlineScenario),
}

impl Scenario {
    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(s) => &s.name,
            Self::Outline(o) => &o.name,
        }
    }

    /// Optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Simple(s) => s.description.as_deref(),
            Self::Outline(o) => o.description.as_deref(),
        }
    }

    /// Tags in document order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Simple(s) => &s.tags,
            Self::Outline(o) => &o.tags,
        }
    }

    /// Steps in document order. Outline step text is unsubstituted.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Simple(s) => &s.steps,
            Self::Outline(o) => &o.steps,
        }
    }

    /// Example rows; always empty for a simple scenario.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        match self {
            Self::Simple(_) => &[],
            Self::Outline(o) => &o.examples,
        }
    }

    /// Return `true` when this is a `Scenario Outline`.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        matches!(self, Self::Outline(_))
    }

    /// Borrow the outline variant, if any.
    #[must_use]
    pub fn as_outline(&self) -> Option<&OutlineScenario> {
        match self {
            Self::Simple(_) => None,
            Self::Outline(o) => Some(o),
        }
    }

    /// Return `true` if any tag on the scenario has the given name.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags().iter().any(|t| t.name == name)
    }
}

/// Scenario declared with `Scenario:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimpleScenario {
    /// Text after `Scenario:`.
    pub name: String,
    /// Free-text lines after the name, joined by single spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags written above the scenario.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Steps in document order.
    pub steps: Vec<Step>,
}

/// Scenario declared with `Scenario Outline:`.
///
/// Step text keeps its `<name>` placeholders; use [`expand`](Self::expand) or
/// [`crate::substitute`] to obtain concrete steps for one example row.
/// `examples` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutlineScenario {
    /// Text after `Scenario Outline:`.
    pub name: String,
    /// Free-text lines after the name, joined by single spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags written above the outline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Unsubstituted steps in document order.
    pub steps: Vec<Step>,
    /// One entry per data row across the `Examples:` tables, in source order.
    #[serde(deserialize_with = "non_empty_examples")]
    pub examples: Vec<Example>,
}

impl OutlineScenario {
    /// Concrete steps for one example row.
    ///
    /// # Examples
    /// ```
    /// use featurette::parse_feature;
    ///
    /// let feature = parse_feature(
    ///     "Feature: F\nScenario Outline: o\nGiven I am a <mountain>\nExamples:\n| mountain |\n| etna |\n",
    /// )
    /// .unwrap();
    /// let outline = feature.outlines().next().unwrap();
    /// let steps = outline.expand(&outline.examples[0]);
    /// assert_eq!(steps[0].text, "I am a etna");
    /// ```
    #[must_use]
    pub fn expand(&self, example: &Example) -> Vec<Step> {
        self.steps
            .iter()
            .map(|step| placeholder::substitute(step, example))
            .collect()
    }

    /// Concrete step lists for every example row, in row order.
    pub fn expansions(&self) -> impl Iterator<Item = (&Example, Vec<Step>)> {
        self.examples
            .iter()
            .map(move |example| (example, self.expand(example)))
    }
}

fn non_empty_examples<'de, D>(deserializer: D) -> Result<Vec<Example>, D::Error>
where
    D: Deserializer<'de>,
{
    let examples = Vec::<Example>::deserialize(deserializer)?;
    if examples.is_empty() {
        return Err(D::Error::invalid_length(0, &"at least one example row"));
    }
    Ok(examples)
}

/// One action or assertion line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Role keyword exactly as written.
    pub keyword: StepKeyword,
    /// Text after the keyword.
    pub text: String,
    /// Optional table or doc string attached to the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<StepArgument>,
}

impl Step {
    /// Attached data table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&DataTable> {
        match &self.argument {
            Some(StepArgument::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// Attached doc string, if any.
    #[must_use]
    pub fn docstring(&self) -> Option<&str> {
        match &self.argument {
            Some(StepArgument::DocString(text)) => Some(text),
            _ => None,
        }
    }
}

/// Argument block attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepArgument {
    /// A `|`-delimited table with a header row.
    Table(DataTable),
    /// The lines between a pair of `"""` fences, joined by newlines.
    DocString(String),
}

/// Table attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataTable {
    /// Column names from the first row.
    pub header: Vec<String>,
    /// Data rows mapping column name to cell value.
    pub rows: Vec<IndexMap<String, String>>,
}

impl DataTable {
    /// Cell values of one column, in row order.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(name).map(String::as_str))
    }
}

/// One data row of an outline's `Examples:` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Example {
    /// Header name to cell value, in header order.
    pub values: IndexMap<String, String>,
}

impl Example {
    /// Value bound to `name`, if the row has that column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl From<IndexMap<String, String>> for Example {
    fn from(values: IndexMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Example
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Free-form label, stored without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag {
    /// Tag name without `@`.
    pub name: String,
}

impl Tag {
    /// Create a tag from its bare name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
