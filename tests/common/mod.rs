//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_runscripts"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Write a script that leaves a `ran_<name>.done` marker, prints a line and exits with `code`.
///
/// Scripts are plain `sh` so the tests do not depend on Python being installed.
pub fn create_script(dir: &Path, name: &str, code: i32) {
    let body = format!("touch ran_{name}.done\necho \"hello from {name}\"\nexit {code}\n");
    fs::write(dir.join(name), body).unwrap();
}

/// Whether the script called `name` was executed.
pub fn script_ran(dir: &Path, name: &str) -> bool {
    dir.join(format!("ran_{name}.done")).exists()
}

/// Helper to create a Command with test environment
/// Runs in `dir` with `sh` as the interpreter and a clean log filter
pub fn test_command(dir: &Path) -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.current_dir(dir)
        .env("RUNSCRIPTS_INTERPRETER", "sh")
        .env_remove("RUST_LOG");
    cmd
}
