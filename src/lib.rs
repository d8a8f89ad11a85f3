//! # runscripts
//!
//! Run every Python script in a directory, one at a time, stopping at the first failure.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod logging;
pub mod report;

pub use error::RunError;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
