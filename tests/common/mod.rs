use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data root for one CLI run or sequence of runs.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A script-mode CLI invocation rooted at `home`.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vendor_intake_cli").expect("binary built");
    cmd.env("VENDOR_INTAKE_CLI_SCRIPT", "1")
        .env("VENDOR_INTAKE_HOME", home)
        .env_remove("VENDOR_INTAKE_FORM")
        .env("NO_COLOR", "1");
    cmd
}
