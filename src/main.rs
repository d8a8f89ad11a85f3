//! # runscripts
//!
//! Run every `*.py` file in the current directory with a Python interpreter,
//! in name order, and stop at the first one that fails.
//!
//! ## Usage
//!
//! - Run everything here: `runscripts`
//! - Pick the interpreter: `runscripts --interpreter pypy3`
//!   or `RUNSCRIPTS_INTERPRETER=pypy3 runscripts`
//! - Run another directory: `runscripts --working-dir models/`
//! - See what would run: `runscripts --list`

/// Entry point for the CLI tool.
fn main() {
    runscripts::cli::run_cli();
}
