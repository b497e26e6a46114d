//! Structured logging for the command line tool.
//!
//! Logs go to stderr so that stdout carries only rendered documents. The
//! subscriber also captures `log` records emitted by the parser library.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `FEATURETTE_LOG_LEVEL`
/// 3. `warn`
///
/// If a global subscriber is already set, the call is a no-op.
pub fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    // The first subscriber wins.
    if let Err(err) = result {
        tracing::debug!(error = %err, "logging already initialised");
    }
}
