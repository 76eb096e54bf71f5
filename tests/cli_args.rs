//! Integration tests for CLI argument handling
//!
//! Tests the binary end to end: help output, argument validation, and an
//! offline resolution against a local feed file with a temp cache.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

/// Sample feed used for offline runs
const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<weatherdata>
  <forecast>
    <tabular>
      <time from="2018-02-11T22:00:00" to="2018-02-12T00:00:00" period="3">
        <temperature unit="celsius" value="-3"/>
      </time>
    </tabular>
  </forecast>
</weatherdata>"#;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_yrcast"))
        .args(args)
        .output()
        .expect("Failed to execute yrcast")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("yrcast"), "Help should mention yrcast");
    assert!(
        stdout.contains("cache-file"),
        "Help should mention --cache-file flag"
    );
    assert!(
        stdout.contains("feed-file"),
        "Help should mention --feed-file flag"
    );
}

#[test]
fn test_missing_time_argument_fails() {
    let output = run_cli(&[]);
    assert!(
        !output.status.success(),
        "Expected missing time argument to fail"
    );
}

#[test]
fn test_invalid_time_prints_error_and_exits() {
    let output = run_cli(&["definitely-not-a-time"]);
    assert!(!output.status.success(), "Expected invalid time to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid time"),
        "Should print error message about the invalid time: {}",
        stderr
    );
}

#[test]
fn test_resolves_temperature_from_feed_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let feed_path = temp_dir.path().join("forecast.xml");
    let cache_path = temp_dir.path().join("temperatures.txt");
    fs::write(&feed_path, SAMPLE_FEED).expect("Failed to write feed file");

    let output = run_cli(&[
        "2018-02-11T23:00:00",
        "--feed-file",
        feed_path.to_str().unwrap(),
        "--cache-file",
        cache_path.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "Expected resolution to succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "-3");
    assert!(cache_path.exists(), "Cache file should have been written");
}

#[test]
fn test_second_run_is_served_from_cache() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let feed_path = temp_dir.path().join("forecast.xml");
    let cache_path = temp_dir.path().join("temperatures.txt");
    fs::write(&feed_path, SAMPLE_FEED).expect("Failed to write feed file");

    let first = run_cli(&[
        "2018-02-11T23:00:00",
        "--feed-file",
        feed_path.to_str().unwrap(),
        "--cache-file",
        cache_path.to_str().unwrap(),
    ]);
    assert!(first.status.success());

    // Remove the feed; a cache hit must not read it
    fs::remove_file(&feed_path).expect("Failed to remove feed file");

    let second = run_cli(&[
        "2018-02-11T23:00:00",
        "--feed-file",
        feed_path.to_str().unwrap(),
        "--cache-file",
        cache_path.to_str().unwrap(),
    ]);

    assert!(
        second.status.success(),
        "Second run should be served from the cache: {}",
        String::from_utf8_lossy(&second.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&second.stdout).trim(), "-3");
}

#[test]
fn test_uncovered_time_exits_with_not_found_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let feed_path = temp_dir.path().join("forecast.xml");
    let cache_path = temp_dir.path().join("temperatures.txt");
    fs::write(&feed_path, SAMPLE_FEED).expect("Failed to write feed file");

    // The window end is exclusive, so its boundary instant is not covered
    let output = run_cli(&[
        "2018-02-12T00:00:00",
        "--feed-file",
        feed_path.to_str().unwrap(),
        "--cache-file",
        cache_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1), "Not-found should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No forecast window"),
        "Should report the uncovered time: {}",
        stderr
    );
    assert!(!cache_path.exists(), "Not-found must not write to the cache");
}

#[test]
fn test_missing_feed_file_exits_with_fetch_error_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache_path = temp_dir.path().join("temperatures.txt");

    let output = run_cli(&[
        "2018-02-11T23:00:00",
        "--feed-file",
        temp_dir.path().join("missing.xml").to_str().unwrap(),
        "--cache-file",
        cache_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2), "Fetch failures should exit 2");
}
