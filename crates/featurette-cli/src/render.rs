//! Helpers for writing parsed documents.

use std::io::Write;

use eyre::{Context, Result};
use featurette::{Example, Feature, OutlineScenario, Scenario, Step};
use serde::Serialize;

use crate::config::OutputFormat;

/// One concrete run of an outline.
#[derive(Debug, Serialize)]
struct Expansion<'a> {
    scenario: &'a str,
    example: &'a Example,
    steps: Vec<Step>,
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    encoded.wrap_err("failed to encode JSON")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}

/// Write the whole document in the configured format.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_feature(
    writer: &mut dyn Write,
    feature: &Feature,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, feature, false),
        OutputFormat::PrettyJson => write_json(writer, feature, true),
        OutputFormat::Summary => write_summary(writer, feature),
    }
}

fn write_summary(writer: &mut dyn Write, feature: &Feature) -> Result<()> {
    writeln!(
        writer,
        "Feature: {}{} ({} scenarios)",
        feature.name,
        tag_suffix(feature.tags.iter().map(|t| t.name.as_str())),
        feature.scenarios.len()
    )
    .wrap_err_with(|| format!("failed to write feature '{}'", feature.name))?;
    if let Some(background) = &feature.background {
        writeln!(
            writer,
            "  Background: {} ({} steps)",
            background.name,
            background.steps.len()
        )
        .wrap_err("failed to write background")?;
    }
    for scenario in &feature.scenarios {
        write_scenario_line(writer, scenario)?;
    }
    Ok(())
}

fn write_scenario_line(writer: &mut dyn Write, scenario: &Scenario) -> Result<()> {
    let tags = tag_suffix(scenario.tags().iter().map(|t| t.name.as_str()));
    let line = match scenario {
        Scenario::Simple(s) => format!("  Scenario: {}{tags} ({} steps)", s.name, s.steps.len()),
        Scenario::Outline(o) => format!(
            "  Scenario Outline: {}{tags} ({} steps, {} examples)",
            o.name,
            o.steps.len(),
            o.examples.len()
        ),
    };
    writeln!(writer, "{line}")
        .wrap_err_with(|| format!("failed to write scenario '{}'", scenario.name()))
}

fn tag_suffix<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(|name| format!(" @{name}")).collect()
}

/// Write the concrete steps of every outline, one block per example row.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_expansions(
    writer: &mut dyn Write,
    feature: &Feature,
    format: OutputFormat,
) -> Result<()> {
    let expansions: Vec<Expansion<'_>> = feature.outlines().flat_map(expansions_of).collect();
    match format {
        OutputFormat::Json => write_json(writer, &expansions, false),
        OutputFormat::PrettyJson => write_json(writer, &expansions, true),
        OutputFormat::Summary => {
            for expansion in &expansions {
                write_expansion(writer, expansion)?;
            }
            Ok(())
        }
    }
}

fn expansions_of(outline: &OutlineScenario) -> impl Iterator<Item = Expansion<'_>> {
    outline.expansions().map(move |(example, steps)| Expansion {
        scenario: &outline.name,
        example,
        steps,
    })
}

fn write_expansion(writer: &mut dyn Write, expansion: &Expansion<'_>) -> Result<()> {
    let bindings: Vec<String> = expansion
        .example
        .values
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    writeln!(writer, "{} [{}]", expansion.scenario, bindings.join(", "))
        .wrap_err_with(|| format!("failed to write expansion of '{}'", expansion.scenario))?;
    for step in &expansion.steps {
        writeln!(writer, "  {} {}", step.keyword, step.text)
            .wrap_err_with(|| format!("failed to write step '{}'", step.text))?;
    }
    Ok(())
}
