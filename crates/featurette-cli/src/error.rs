//! Error types raised before any document is read.

use thiserror::Error;

/// Failures in assembling the command line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// An environment variable or flag carried an unsupported value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
