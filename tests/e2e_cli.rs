//! CLI end-to-end tests
//!
//! Argument handling and commands that never spawn an encoder.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the muxforge binary
#[allow(deprecated)]
fn muxforge_cmd() -> Command {
    Command::cargo_bin("muxforge").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = muxforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = muxforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("muxforge"))
        .stdout(predicate::str::contains("transmux"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = muxforge_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("muxforge"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = muxforge_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = muxforge_cmd();
    cmd.arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffmpeg"))
        .stdout(predicate::str::contains("MP4Box"));
}

#[test]
fn test_cli_transmux_help() {
    let mut cmd = muxforge_cmd();
    cmd.args(["transmux", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--formats"))
        .stdout(predicate::str::contains("--strict-tools"));
}

#[test]
fn test_cli_transcode_requires_tasks() {
    let mut cmd = muxforge_cmd();
    cmd.args(["transcode", "movie.mp4", "/tmp/out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tasks"));
}

#[test]
fn test_cli_unknown_format_is_rejected() {
    let temp = tempdir().unwrap();
    let mut cmd = muxforge_cmd();
    cmd.arg("transmux")
        .arg("movie.mp4")
        .arg(temp.path())
        .args(["--formats", "webm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
    assert!(!temp.path().join("movie").exists());
}

#[test]
fn test_cli_empty_format_list_does_nothing() {
    let temp = tempdir().unwrap();
    let mut cmd = muxforge_cmd();
    cmd.arg("transmux")
        .arg("movie.mp4")
        .arg(temp.path())
        .arg("--formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("transmuxing").not());
    assert!(!temp.path().join("movie").exists());
}

#[test]
fn test_cli_both_cmaf_backends_is_fatal() {
    let temp = tempdir().unwrap();
    let mut cmd = muxforge_cmd();
    cmd.arg("transmux")
        .arg("movie.mp4")
        .arg(temp.path())
        .args(["--formats", "cmaf", "cmaf-ffmpeg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cmaf-ffmpeg"));
    assert!(!temp.path().join("movie").exists());
}

#[test]
fn test_cli_invalid_config_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("muxforge.json");
    std::fs::write(&config, "{ not json").unwrap();

    let mut cmd = muxforge_cmd();
    cmd.arg("-c").arg(&config).arg("version").assert().success();
}
