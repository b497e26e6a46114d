//! Materialise the validated parse tree into the document model.
//!
//! Simple scenarios are copied structurally. Outlines keep their
//! unsubstituted steps and gain one [`Example`] per data row across their
//! `Examples:` tables, in source order.

use indexmap::IndexMap;

use crate::model::{
    Background, DataTable, Example, Feature, OutlineScenario, Scenario, SimpleScenario, Step,
    StepArgument,
};
use crate::parser::tree::{
    RawArgument, RawBackground, RawFeature, RawScenario, RawStep, RawTable, ScenarioKind,
};

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            tags: raw.tags,
            background: raw.background.map(Background::from),
            scenarios: raw.scenarios.into_iter().map(Scenario::from).collect(),
        }
    }
}

impl From<RawBackground> for Background {
    fn from(raw: RawBackground) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            tags: raw.tags,
            steps: steps(raw.steps),
        }
    }
}

impl From<RawScenario> for Scenario {
    fn from(raw: RawScenario) -> Self {
        match raw.kind {
            ScenarioKind::Simple => Self::Simple(SimpleScenario {
                name: raw.name,
                description: raw.description,
                tags: raw.tags,
                steps: steps(raw.steps),
            }),
            ScenarioKind::Outline => {
                let examples: Vec<Example> = raw
                    .examples
                    .into_iter()
                    .flat_map(|table| records(table).into_iter().map(Example::from))
                    .collect();
                debug_assert!(
                    !examples.is_empty(),
                    "grammar guarantees outline on line {} has examples",
                    raw.line
                );
                Self::Outline(OutlineScenario {
                    name: raw.name,
                    description: raw.description,
                    tags: raw.tags,
                    steps: steps(raw.steps),
                    examples,
                })
            }
        }
    }
}

fn steps(raw: Vec<RawStep>) -> Vec<Step> {
    raw.into_iter()
        .map(|step| Step {
            keyword: step.keyword,
            text: step.text,
            argument: step.argument.map(|argument| match argument {
                RawArgument::Table(table) => StepArgument::Table(DataTable::from(table)),
                RawArgument::DocString(text) => StepArgument::DocString(text),
            }),
        })
        .collect()
}

impl From<RawTable> for DataTable {
    fn from(table: RawTable) -> Self {
        Self {
            header: table.header.cells.clone(),
            rows: records(table),
        }
    }
}

/// Map every data row to a header-keyed record.
fn records(table: RawTable) -> Vec<IndexMap<String, String>> {
    let RawTable { header, data } = table;
    data.into_iter()
        .map(|row| header.cells.iter().cloned().zip(row.cells).collect())
        .collect()
}
