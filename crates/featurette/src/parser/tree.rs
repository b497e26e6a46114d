//! Intermediate parse tree produced by the grammar engine.
//!
//! The tree keeps source line numbers and raw table rows. It has already been
//! validated, so the transform into the document model cannot fail.

use crate::keyword::StepKeyword;
use crate::model::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawFeature {
    pub(crate) tags: Vec<Tag>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) background: Option<RawBackground>,
    pub(crate) scenarios: Vec<RawScenario>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawBackground {
    pub(crate) tags: Vec<Tag>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) steps: Vec<RawStep>,
}

/// Variant decided by the scenario keyword line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScenarioKind {
    Simple,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawScenario {
    pub(crate) line: usize,
    pub(crate) kind: ScenarioKind,
    pub(crate) tags: Vec<Tag>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) steps: Vec<RawStep>,
    /// One table per `Examples:` block; empty for simple scenarios.
    pub(crate) examples: Vec<RawTable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawStep {
    pub(crate) keyword: StepKeyword,
    pub(crate) text: String,
    pub(crate) argument: Option<RawArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawArgument {
    Table(RawTable),
    DocString(String),
}

/// Table whose header width matches every data row and whose header names
/// are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTable {
    pub(crate) header: RawRow,
    pub(crate) data: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRow {
    pub(crate) line: usize,
    pub(crate) cells: Vec<String>,
}
