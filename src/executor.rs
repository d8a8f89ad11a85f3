//! Sequential script execution.
//!
//! Scripts run one at a time with inherited stdio. The first non-zero exit
//! status ends the run; nothing after it is attempted.

use crate::config::{self, RunConfig};
use crate::discovery::{self, Script};
use crate::error::RunError;
use crate::report::{RunReport, RunStatus, ScriptResult};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

/// Runs a fixed list of scripts with one interpreter, writing progress to `out`.
pub struct Runner<W: Write> {
    interpreter: PathBuf,
    working_dir: PathBuf,
    out: W,
    report: RunReport,
}

impl<W: Write> Runner<W> {
    /// A runner that has not started; its report is `NotStarted` until [`Runner::run_all`].
    #[must_use]
    pub fn new(interpreter: PathBuf, working_dir: PathBuf, out: W) -> Self {
        let mut report = RunReport::new(working_dir.clone());
        report.interpreter = Some(interpreter.clone());
        Self {
            interpreter,
            working_dir,
            out,
            report,
        }
    }

    /// Run every script in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ExecutionFailure`] for the first script exiting non-zero,
    /// [`RunError::Launch`] if the interpreter cannot be started, or
    /// [`RunError::Io`] if progress output cannot be written.
    pub fn run_all(&mut self, scripts: &[Script]) -> Result<(), RunError> {
        let start = Instant::now();
        self.report.status = RunStatus::Running;
        self.report.discovered = scripts.len();

        let result = self.run_sequence(scripts);

        self.report.total_duration_ms = start.elapsed().as_millis();
        self.report.status = if result.is_ok() {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        };
        result
    }

    fn run_sequence(&mut self, scripts: &[Script]) -> Result<(), RunError> {
        let mut count = 1;
        for script in scripts {
            writeln!(self.out, "running script {count}: {}", script.name)?;
            // Flush before the child writes to the same stream
            self.out.flush()?;

            let status = self.run_one(count, script)?;
            if !status.success() {
                writeln!(self.out, "script {} failed ({status})", script.name)?;
                self.out.flush()?;
                tracing::error!(script = %script.name, %status, "script failed, stopping run");
                return Err(RunError::ExecutionFailure {
                    script: script.name.clone(),
                    status,
                });
            }

            writeln!(self.out)?;
            count += 1;
        }
        Ok(())
    }

    fn run_one(&mut self, index: usize, script: &Script) -> Result<ExitStatus, RunError> {
        let start = Instant::now();
        let status = Command::new(&self.interpreter)
            .arg(&script.path)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();
        let duration_ms = start.elapsed().as_millis();

        let status = match status {
            Ok(status) => status,
            Err(source) => {
                self.record(index, script, None, duration_ms);
                return Err(RunError::Launch {
                    script: script.name.clone(),
                    interpreter: self.interpreter.clone(),
                    source,
                });
            }
        };

        self.record(index, script, Some(status), duration_ms);
        tracing::info!(script = %script.name, %status, duration_ms, "script finished");
        Ok(status)
    }

    fn record(
        &mut self,
        index: usize,
        script: &Script,
        status: Option<ExitStatus>,
        duration_ms: u128,
    ) {
        self.report.scripts.push(ScriptResult {
            index,
            name: script.name.clone(),
            exit_code: status.and_then(|s| s.code()),
            success: status.is_some_and(|s| s.success()),
            duration_ms,
        });
    }

    #[must_use]
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    #[must_use]
    pub fn into_report(self) -> RunReport {
        self.report
    }
}

/// Discover and run every script described by `config`, printing banners and
/// progress to `out`.
///
/// An empty directory is a successful run. The interpreter is only resolved
/// when there is something to run. The report, if requested, is written on
/// failure as well as on success.
///
/// # Errors
///
/// Returns the first error that stopped the run; see [`RunError`].
pub fn run_scripts<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunReport, RunError> {
    writeln!(out, "Starting {}", config.program_name)?;
    out.flush()?;

    let scripts = discovery::discover_scripts(&config.directory, &config.extension)?;

    let (report, result) = if scripts.is_empty() {
        tracing::warn!(
            directory = %config.directory.display(),
            extension = %config.extension,
            "no scripts found"
        );
        let mut report = RunReport::new(config.directory.clone());
        report.status = RunStatus::Succeeded;
        (report, Ok(()))
    } else {
        let interpreter = config::resolve_interpreter(&config.interpreter)?;
        let mut runner = Runner::new(interpreter, config.directory.clone(), &mut *out);
        let result = runner.run_all(&scripts);
        (runner.into_report(), result)
    };

    let written = config
        .report_path
        .as_deref()
        .map_or(Ok(()), |path| report.write_to(path));
    result?;
    written?;

    writeln!(out, "Done!")?;
    out.flush()?;
    Ok(report)
}

/// Print the scripts `config` would run, one per line, without running them.
///
/// # Errors
///
/// Returns [`RunError::ReadDir`] if the directory cannot be listed.
pub fn list_scripts<W: Write>(config: &RunConfig, out: &mut W) -> Result<(), RunError> {
    let scripts = discovery::discover_scripts(&config.directory, &config.extension)?;

    if scripts.is_empty() {
        writeln!(
            out,
            "No *.{} scripts found in {}.",
            config.extension,
            config.directory.display()
        )?;
    } else {
        for script in &scripts {
            writeln!(out, "{}", script.name)?;
        }
    }
    Ok(())
}
