//! Command line configuration read from environment variables.
//!
//! Every setting has a `FEATURETTE_` environment variable; the matching
//! command line flag, when given, takes precedence.

use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "FEATURETTE_LOG_LEVEL";
/// Environment variable holding the output format.
pub const FORMAT_VAR: &str = "FEATURETTE_FORMAT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that only problems reach stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, including grammar section boundaries.
    Trace,
    /// Parse summaries and file loads.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How parsed documents are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Compact JSON, one document per line.
    Json,
    /// Indented JSON.
    PrettyJson,
    /// Human-readable outline of the document.
    #[default]
    Summary,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty" => Ok(Self::PrettyJson),
            "summary" => Ok(Self::Summary),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown output format '{s}', expected one of: json, pretty-json, summary"
            ))),
        }
    }
}

/// Configuration for a single invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Output format for rendered documents.
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|val| val.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let format = lookup(FORMAT_VAR)
            .map(|val| val.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { log_level, format })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| {
            owned
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_valid_values(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[rstest]
    #[case("json", OutputFormat::Json)]
    #[case("pretty-json", OutputFormat::PrettyJson)]
    #[case("Summary", OutputFormat::Summary)]
    fn output_format_parses_valid_values(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().ok(), Some(expected));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let Err(CliError::InvalidConfig(message)) = "verbose".parse::<LogLevel>() else {
            panic!("expected an invalid config error");
        };
        assert!(message.contains("unknown log level"));
        let Err(CliError::InvalidConfig(message)) = "xml".parse::<OutputFormat>() else {
            panic!("expected an invalid config error");
        };
        assert!(message.contains("unknown output format"));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CliConfig::from_lookup(|_| None)
            .unwrap_or_else(|err| panic!("empty environment is valid: {err}"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Summary);
    }

    #[test]
    fn environment_values_are_read() {
        let config = CliConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "debug"),
            (FORMAT_VAR, "json"),
        ]))
        .unwrap_or_else(|err| panic!("valid environment: {err}"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_environment_value_is_rejected() {
        let result = CliConfig::from_lookup(lookup_from(&[(FORMAT_VAR, "yaml")]));
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Trace), None);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.format, OutputFormat::Summary);
        let config = config.apply_overrides(None, Some(OutputFormat::PrettyJson));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.format, OutputFormat::PrettyJson);
    }
}
