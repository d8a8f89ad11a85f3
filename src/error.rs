//! Error types for a script run.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Everything that can stop a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A discovered script exited with a non-zero status.
    #[error("script {script} failed ({status})")]
    ExecutionFailure { script: String, status: ExitStatus },

    #[error("interpreter '{name}' not found: {source}")]
    InterpreterNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to launch {script} with {}: {source}", interpreter.display())]
    Launch {
        script: String,
        interpreter: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report '{}': {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    /// True for the failure the runner reports on stdout itself.
    #[must_use]
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Self::ExecutionFailure { .. })
    }
}
