//! Run report written by `--report`.

use crate::error::RunError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

/// Outcome of one attempted script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    /// 1-indexed position in the run
    pub index: usize,

    /// Script file name
    pub name: String,

    /// Process exit code (None if killed by signal or never launched)
    pub exit_code: Option<i32>,

    /// Whether the script exited 0
    pub success: bool,

    /// Execution duration in milliseconds
    pub duration_ms: u128,
}

/// Summary of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub status: RunStatus,

    /// Resolved interpreter, if one was needed
    pub interpreter: Option<PathBuf>,

    /// Directory the scripts were discovered in
    pub directory: PathBuf,

    /// Number of scripts discovered
    pub discovered: usize,

    /// Attempted scripts, in execution order
    pub scripts: Vec<ScriptResult>,

    /// Total execution time
    pub total_duration_ms: u128,
}

impl RunReport {
    /// An empty report for a run over `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            status: RunStatus::NotStarted,
            interpreter: None,
            directory: directory.into(),
            discovered: 0,
            scripts: Vec::new(),
            total_duration_ms: 0,
        }
    }

    /// The first script that did not succeed.
    #[must_use]
    pub fn failed_script(&self) -> Option<&ScriptResult> {
        self.scripts.iter().find(|s| !s.success)
    }

    /// Format as JSON for programmatic consumption
    ///
    /// # Errors
    ///
    /// Fails if a path in the report is not valid UTF-8.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Report`] if the report cannot be serialized or the
    /// file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), RunError> {
        let report_error = |source| RunError::Report {
            path: path.to_path_buf(),
            source,
        };

        let json = self.to_json().map_err(|e| report_error(io::Error::other(e)))?;
        fs::write(path, json + "\n").map_err(report_error)?;
        tracing::debug!(path = %path.display(), "wrote run report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RunReport {
        let mut report = RunReport::new("/work");
        report.status = RunStatus::Failed;
        report.discovered = 3;
        report.scripts = vec![
            ScriptResult {
                index: 1,
                name: "a.py".to_string(),
                exit_code: Some(0),
                success: true,
                duration_ms: 12,
            },
            ScriptResult {
                index: 2,
                name: "b.py".to_string(),
                exit_code: Some(1),
                success: false,
                duration_ms: 3,
            },
        ];
        report
    }

    #[test]
    fn test_new_report_not_started() {
        let report = RunReport::new("scripts");
        assert_eq!(report.status, RunStatus::NotStarted);
        assert!(report.scripts.is_empty());
        assert!(report.failed_script().is_none());
    }

    #[test]
    fn test_failed_script() {
        let report = sample_report();
        assert_eq!(report.failed_script().map(|s| s.name.as_str()), Some("b.py"));
    }

    #[test]
    fn test_to_json_uses_snake_case_status() {
        let json = sample_report().to_json().unwrap();
        assert!(json.contains("\"status\": \"failed\""));
        assert!(json.contains("\"name\": \"b.py\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["discovered"], 3);
        assert_eq!(value["scripts"].as_array().unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_to_rejects_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = RunReport::new(PathBuf::from(OsStr::from_bytes(b"/work/\xffmodels")));

        let err = report.write_to(&path).unwrap_err();
        assert!(matches!(err, RunError::Report { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_to_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        sample_report().write_to(&path).unwrap();

        let report: RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(report.scripts.len(), 2);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");

        let err = sample_report().write_to(&path).unwrap_err();
        assert!(matches!(err, RunError::Report { .. }));
    }
}
