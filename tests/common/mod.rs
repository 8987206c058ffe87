//! Shared testing utilities for deploygen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory CLI invocations run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Output root passed to `--output-dir`.
    pub fn output_dir(&self) -> PathBuf {
        self.work_dir.join("out")
    }

    /// Build a command for invoking the compiled `deploygen` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("deploygen").expect("Failed to locate deploygen binary");
        cmd.current_dir(&self.work_dir).env_remove("RUST_LOG");
        cmd
    }

    /// Build a `--local` invocation writing under [`TestContext::output_dir`].
    pub fn local_cli(&self) -> Command {
        let mut cmd = self.cli();
        cmd.arg("--local").arg("--output-dir").arg(self.output_dir());
        cmd
    }

    /// Directory a bundle for `domain` is written into.
    pub fn bundle_dir(&self, domain: &str) -> PathBuf {
        self.output_dir().join(domain)
    }

    /// Read a generated file.
    pub fn read(&self, domain: &str, file: &str) -> String {
        let path = self.bundle_dir(domain).join(file);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Write a file into the work directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}
