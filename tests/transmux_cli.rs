//! Transmux and transcode runs against fake encoder scripts.

#![cfg(unix)]

mod common;

use assert_cmd::prelude::*;
use common::{input_file, muxforge, FakeTools};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_hls_and_cmaf_scenario() {
    let tools = FakeTools::new().succeeding("ffmpeg").silent("MP4Box");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    let assert = muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "hls", "cmaf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HLS transmuxing completed."))
        .stdout(predicate::str::contains("CMAF transmuxing completed."));

    assert!(out.join("movie/hls").is_dir());
    assert!(out.join("movie/cmaf").is_dir());
    assert!(out.join("movie/hls/hls_output.m3u8").is_file());
    assert!(!out.join("movie/mpeg-dash").exists());

    // Report lines follow the request order regardless of completion order.
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let hls = stdout.find("HLS: ok ->").unwrap();
    let cmaf = stdout.find("CMAF: ok ->").unwrap();
    assert!(hls < cmaf, "unexpected report order:\n{stdout}");
}

#[test]
fn test_default_formats_from_config() {
    let tools = FakeTools::new().succeeding("ffmpeg").silent("MP4Box");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "clip.mkv");
    let out = temp.path().join("out");
    let config = temp.path().join("muxforge.json");
    std::fs::write(&config, r#"{ "transmux": { "default_formats": ["dash"] } }"#).unwrap();

    muxforge(&tools)
        .arg("-c")
        .arg(&config)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("MPEG-DASH transmuxing completed."))
        .stdout(predicate::str::contains("HLS").not());

    assert!(out.join("clip/mpeg-dash/dash_output.mpd").is_file());
}

#[test]
fn test_failing_backend_exits_2_and_keeps_siblings() {
    let tools = FakeTools::new()
        .failing("ffmpeg", "moov atom not found", 1)
        .silent("MP4Box");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "hls", "cmaf", "--jobs", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("HLS transmuxing failed."))
        .stdout(predicate::str::contains(
            "HLS: failed (exit 1): moov atom not found",
        ))
        .stdout(predicate::str::contains("CMAF transmuxing completed."));
}

#[test]
fn test_missing_tool_is_reported_per_format_and_exits_3() {
    let tools = FakeTools::new().succeeding("ffmpeg");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "hls", "cmaf"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("HLS transmuxing completed."))
        .stdout(predicate::str::contains("CMAF: failed (MP4Box missing)"))
        .stderr(predicate::str::contains("Missing tools: MP4Box"));

    assert!(out.join("movie/hls/hls_output.m3u8").is_file());
}

#[test]
fn test_strict_tools_aborts_before_dispatch() {
    let tools = FakeTools::new().succeeding("ffmpeg");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "hls", "cmaf", "--strict-tools"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("MP4Box not found"))
        .stdout(predicate::str::contains("transmuxing").not());

    assert!(!out.join("movie").exists());
}

#[test]
fn test_filename_with_shell_metacharacters() {
    let tools = FakeTools::new().succeeding("ffmpeg");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "it's; rm -rf $HOME.mp4");
    let out = temp.path().join("out");

    muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "hls"])
        .assert()
        .success();

    assert!(out
        .join("it's; rm -rf $HOME/hls/hls_output.m3u8")
        .is_file());
}

#[test]
fn test_json_report() {
    let tools = FakeTools::new().succeeding("ffmpeg");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    let assert = muxforge(&tools)
        .arg("transmux")
        .arg(&input)
        .arg(&out)
        .args(["--formats", "dash", "hls", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["job"]["format"], "dash");
    assert_eq!(outcomes[1]["job"]["format"], "hls");
    assert_eq!(outcomes[0]["status"]["status"], "success");
}

#[test]
fn test_transcode_tasks() {
    let tools = FakeTools::new().succeeding("ffmpeg");
    let temp = tempdir().unwrap();
    let input = input_file(temp.path(), "movie.mp4");
    let out = temp.path().join("out");

    muxforge(&tools)
        .arg("transcode")
        .arg(&input)
        .arg(&out)
        .args(["--tasks", "mp3-audio", "h265"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MP3 audio transcoding completed."))
        .stdout(predicate::str::contains("H.265 transcoding completed."));

    assert!(out.join("transcoded/output_audio.mp3").is_file());
    assert!(out.join("transcoded/output_h265.mp4").is_file());
}

#[test]
fn test_check_tools_with_ffmpeg_and_mp4box_reports_all_available() {
    let tools = FakeTools::new().silent("ffmpeg").silent("MP4Box");

    muxforge(&tools)
        .arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("All required tools are available!"))
        .stdout(predicate::str::contains("ffprobe").not())
        .stdout(predicate::str::contains("Some tools are missing").not());
}
