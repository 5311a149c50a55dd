//! Integration tests for the ocr-lines CLI
//!
//! Drives the binary with `--detections` fixtures so no OCR engine is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a CLI command isolated from any user config
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ocr-lines"));
    cmd.env("OCR_LINES_CONFIG", dir.path().join("missing-config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// PaddleOCR-style entry for an axis-aligned fragment
fn fragment(label: &str, x: f32, top: f32, bottom: f32) -> serde_json::Value {
    let right = x + 40.0;
    serde_json::json!([
        [[x, top], [x, bottom], [right, bottom], [right, top]],
        [label, 0.95]
    ])
}

fn write_detections(dir: &TempDir, fragments: &[serde_json::Value]) -> PathBuf {
    let path = dir.path().join("detections.json");
    let page = serde_json::Value::Array(vec![serde_json::Value::Array(fragments.to_vec())]);
    fs::write(&path, serde_json::to_string(&page).unwrap()).unwrap();
    path
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rebuild text lines from OCR fragments"));
}

#[test]
fn test_overlapping_fragments_print_one_line() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("Hello", 0.0, 10.0, 30.0), fragment("World", 50.0, 20.0, 40.0)],
    );

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("Hello World\n");
}

#[test]
fn test_disjoint_fragments_print_in_band_order() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("Line2", 0.0, 50.0, 60.0), fragment("Line1", 0.0, 10.0, 20.0)],
    );

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("Line1\nLine2\n");
}

#[test]
fn test_padding_flag_joins_near_misses() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("near", 0.0, 10.0, 18.0), fragment("miss", 50.0, 21.0, 30.0)],
    );

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("near\nmiss\n");

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .args(["--padding", "2"])
        .assert()
        .success()
        .stdout("near miss\n");
}

#[test]
fn test_padding_from_config_file() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("near", 0.0, 10.0, 18.0), fragment("miss", 50.0, 21.0, 30.0)],
    );
    let config = dir.path().join("config.toml");
    fs::write(&config, "[grouping]\npadding = 2.0\n").unwrap();

    cli(&dir)
        .env("OCR_LINES_CONFIG", &config)
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("near miss\n");

    // Flag beats config
    cli(&dir)
        .arg("--config")
        .arg(&config)
        .arg("--detections")
        .arg(&detections)
        .args(["--padding", "0"])
        .assert()
        .success()
        .stdout("near\nmiss\n");
}

#[test]
fn test_order_flag() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("World", 100.0, 10.0, 30.0), fragment("Hello", 0.0, 12.0, 28.0)],
    );

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("World Hello\n");

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .args(["--order", "left-to-right"])
        .assert()
        .success()
        .stdout("Hello World\n");
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(
        &dir,
        &[fragment("Hello", 0.0, 10.0, 30.0), fragment("World", 50.0, 20.0, 40.0)],
    );

    let output = cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(lines[0]["text"], "Hello World");
    assert_eq!(lines[0]["top"], 10.0);
    assert_eq!(lines[0]["bottom"], 40.0);
    assert_eq!(lines[0]["labels"], serde_json::json!(["Hello", "World"]));
}

#[test]
fn test_empty_detections_print_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "[null]").unwrap();

    cli(&dir)
        .arg("--detections")
        .arg(&path)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_negative_padding_fails() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(&dir, &[fragment("x", 0.0, 0.0, 10.0)]);

    cli(&dir)
        .arg("--detections")
        .arg(&detections)
        .arg("--padding=-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid grouping padding"));
}

#[test]
fn test_malformed_detections_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    cli(&dir)
        .arg("--detections")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed detections"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No image given"));
}

#[test]
fn test_warmup_with_detection_file() {
    let dir = TempDir::new().unwrap();
    let detections = write_detections(&dir, &[]);

    cli(&dir)
        .arg("warmup")
        .arg("--detections")
        .arg(&detections)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ocr-lines"));
}
