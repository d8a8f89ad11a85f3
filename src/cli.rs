//! CLI module containing the main entry point logic.
//!
//! This module is separated from main.rs so other binaries can reuse it.

use crate::config::{self, RunConfig};
use crate::{executor, logging};
use clap::Parser as ClapParser;
use std::io;
use std::path::PathBuf;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for the runscripts tool.
#[derive(ClapParser, Debug)]
#[command(name = "runscripts")]
#[command(version = PKG_VERSION)]
#[command(
    about = "Run every Python script in a directory, stopping at the first failure",
    long_about = None
)]
pub struct Cli {
    /// Interpreter used to run each script (name on PATH or explicit path)
    /// [env: RUNSCRIPTS_INTERPRETER] [default: python3, else python]
    #[arg(long, value_name = "INTERPRETER")]
    pub interpreter: Option<String>,

    /// Directory to scan for scripts (default: current directory)
    #[arg(long = "working-dir", value_name = "PATH")]
    pub working_dir: Option<PathBuf>,

    /// File extension to match, without the dot
    #[arg(
        long,
        value_name = "EXT",
        default_value = config::DEFAULT_EXTENSION,
        value_parser = parse_extension
    )]
    pub extension: String,

    /// List the scripts that would run, in order, without running them
    #[arg(short, long)]
    pub list: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Increase diagnostic logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Strip leading dots from `--extension` and reject what is left if it is empty.
fn parse_extension(value: &str) -> Result<String, String> {
    let extension = value.trim_start_matches('.');
    if extension.is_empty() {
        return Err("extension must not be empty".to_string());
    }
    Ok(extension.to_string())
}

impl Cli {
    /// Build the run configuration, filling unset options from the environment.
    #[must_use]
    pub fn into_config(self) -> RunConfig {
        let directory = self
            .working_dir
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        RunConfig {
            program_name: config::program_name_from_args(),
            directory,
            interpreter: config::select_interpreter(
                self.interpreter,
                config::interpreter_from_env(),
            ),
            extension: self.extension,
            report_path: self.report,
        }
    }
}

/// Main CLI logic that can be called from external wrappers.
///
/// Exits with status 0 when every script succeeded (or none were found), 1 otherwise.
pub fn run_cli() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let list = cli.list;
    let config = cli.into_config();
    tracing::debug!(?config, "starting run");

    let mut stdout = io::stdout();

    // Handle --list flag
    if list {
        if let Err(e) = executor::list_scripts(&config, &mut stdout) {
            crate::fatal_error(&format!("Error: {e}"));
        }
        return;
    }

    match executor::run_scripts(&config, &mut stdout) {
        Ok(report) => {
            tracing::info!(
                scripts = report.scripts.len(),
                duration_ms = report.total_duration_ms,
                "run succeeded"
            );
        }
        // The failure line has already been printed with the progress output
        Err(e) if e.is_execution_failure() => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            crate::fatal_error(&format!("Error: {e}"));
        }
    }
}
