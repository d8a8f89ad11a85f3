//! Run configuration and interpreter selection.

use crate::error::RunError;
use std::path::PathBuf;

/// Environment variable naming the interpreter when `--interpreter` is not given.
pub const INTERPRETER_ENV: &str = "RUNSCRIPTS_INTERPRETER";

/// Suffix matched when `--extension` is not given.
pub const DEFAULT_EXTENSION: &str = "py";

/// Name used in the startup banner when `argv[0]` is unavailable.
pub const DEFAULT_PROGRAM_NAME: &str = "runscripts";

/// Settings for a single run, fixed before the first script is discovered.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Identity of the invoking command, shown in the startup banner.
    pub program_name: String,
    /// Directory scanned for scripts; also the working directory of each child.
    pub directory: PathBuf,
    /// Interpreter name or path, before resolution.
    pub interpreter: String,
    /// File suffix without the leading dot.
    pub extension: String,
    /// Where to write the JSON run report, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl RunConfig {
    /// Configuration for `directory` with every other setting at its default.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            directory: directory.into(),
            interpreter: default_interpreter(),
            extension: DEFAULT_EXTENSION.to_string(),
            report_path: None,
        }
    }
}

/// Get the Python executable (prefers python3)
#[must_use]
pub fn default_interpreter() -> String {
    if which::which("python3").is_ok() {
        "python3".to_string()
    } else {
        "python".to_string()
    }
}

/// Pick the interpreter: the flag wins, then a non-empty environment value,
/// then whatever Python is on the search path.
#[must_use]
pub fn select_interpreter(flag: Option<String>, env: Option<String>) -> String {
    flag.or_else(|| env.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(default_interpreter)
}

/// Read the interpreter override from the environment.
#[must_use]
pub fn interpreter_from_env() -> Option<String> {
    std::env::var(INTERPRETER_ENV).ok()
}

/// Resolve an interpreter name or path to an executable on disk.
///
/// # Errors
///
/// Returns [`RunError::InterpreterNotFound`] if nothing executable matches.
pub fn resolve_interpreter(name: &str) -> Result<PathBuf, RunError> {
    let resolved = which::which(name).map_err(|source| RunError::InterpreterNotFound {
        name: name.to_string(),
        source,
    })?;
    tracing::debug!(interpreter = name, path = %resolved.display(), "resolved interpreter");
    Ok(resolved)
}

/// Identity of the running command for the startup banner.
#[must_use]
pub fn program_name_from_args() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence_over_env() {
        let chosen = select_interpreter(Some("pypy3".to_string()), Some("python3.11".to_string()));
        assert_eq!(chosen, "pypy3");
    }

    #[test]
    fn test_env_used_without_flag() {
        let chosen = select_interpreter(None, Some("/opt/python/bin/python".to_string()));
        assert_eq!(chosen, "/opt/python/bin/python");
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        assert_eq!(select_interpreter(None, Some("  ".to_string())), default_interpreter());
        assert_eq!(select_interpreter(None, None), default_interpreter());
    }

    #[test]
    fn test_default_is_a_python() {
        assert!(default_interpreter().starts_with("python"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_interpreter_finds_sh() {
        let path = resolve_interpreter("sh").unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn test_resolve_interpreter_missing() {
        let err = resolve_interpreter("definitely-not-an-interpreter-3f9c").unwrap_err();
        assert!(matches!(err, RunError::InterpreterNotFound { .. }));
        assert!(err.to_string().contains("definitely-not-an-interpreter-3f9c"));
    }

    #[test]
    fn test_new_config_defaults() {
        let config = RunConfig::new("scripts");
        assert_eq!(config.directory, PathBuf::from("scripts"));
        assert_eq!(config.extension, DEFAULT_EXTENSION);
        assert_eq!(config.program_name, DEFAULT_PROGRAM_NAME);
        assert!(config.report_path.is_none());
    }
}
