//! `featurette` binary: parse a feature file and print it.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use featurette_cli::config::{CliConfig, LogLevel, OutputFormat};
use featurette_cli::error::CliError;
use featurette_cli::logging::init_logging;
use featurette_cli::{Action, run};

/// Inspect Gherkin feature files.
#[derive(Parser, Debug)]
#[command(name = "featurette", version, about)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Output format (json, pretty-json, summary).
    #[arg(long, global = true)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the parsed document.
    Parse {
        /// Path to a `.feature` file.
        file: PathBuf,
    },
    /// Print the concrete steps of every outline example.
    Expand {
        /// Path to a `.feature` file.
        file: PathBuf,
    },
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.format))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let (file, action) = match &cli.command {
        Commands::Parse { file } => (file, Action::Parse),
        Commands::Expand { file } => (file, Action::Expand),
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = run(file, action, config.format, &mut stdout) {
        let message = format!("{e:#}");
        tracing::error!(error = %message, "featurette failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
