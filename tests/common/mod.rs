//! Shared test harness for CLI integration tests.
//!
//! [`FakeTools`] builds a directory of tiny `/bin/sh` scripts standing in
//! for ffmpeg and MP4Box. Commands built with [`muxforge`] run with `PATH`
//! pointing only at that directory, so tests never depend on what is
//! installed on the host.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::TempDir;

/// A directory of fake external tools.
pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A tool that exits 0 after creating the file named by its last
    /// argument. Only shell builtins are used, so an empty `PATH` is fine.
    pub fn succeeding(self, name: &str) -> Self {
        self.script(name, "for last; do :; done\n: > \"$last\"\nexit 0")
    }

    /// A tool that exits 0 and writes nothing.
    pub fn silent(self, name: &str) -> Self {
        self.script(name, "exit 0")
    }

    /// A tool that prints `stderr` and exits with `code`.
    pub fn failing(self, name: &str, stderr: &str, code: i32) -> Self {
        self.script(name, &format!("echo '{stderr}' >&2\nexit {code}"))
    }

    fn script(self, name: &str, body: &str) -> Self {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }
}

/// Get a command for the muxforge binary that only sees `tools` on `PATH`.
#[allow(deprecated)]
pub fn muxforge(tools: &FakeTools) -> Command {
    let mut cmd = Command::cargo_bin("muxforge").unwrap();
    cmd.env("PATH", tools.path()).env_remove("RUST_LOG");
    cmd
}

/// Create an empty input file named `name` inside `dir`.
pub fn input_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not really a movie").unwrap();
    path
}
