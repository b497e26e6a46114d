//! Command line front end for the `featurette` Gherkin parser.
//!
//! The binary loads one `.feature` file and either prints the parsed
//! document or the concrete steps of each outline example. Configuration
//! comes from `FEATURETTE_*` environment variables overridden by flags; logs
//! go to stderr.

pub mod config;
pub mod error;
pub mod logging;
pub mod render;

use std::io::Write;
use std::path::Path;

use eyre::{Context, Result};

use crate::config::OutputFormat;

/// What to print for a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The document model.
    Parse,
    /// Concrete outline steps, one block per example row.
    Expand,
}

/// Load `path` and write the requested view of it to `writer`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if writing the
/// output fails.
pub fn run(
    path: &Path,
    action: Action,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<()> {
    let feature = featurette::load_feature(path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        scenarios = feature.scenarios.len(),
        "loaded feature"
    );
    let rendered = match action {
        Action::Parse => render::write_feature(writer, &feature, format),
        Action::Expand => render::write_expansions(writer, &feature, format),
    };
    rendered?;
    writer.flush().wrap_err("failed to flush output")
}
