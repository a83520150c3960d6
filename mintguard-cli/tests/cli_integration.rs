//! CLI integration tests for mintguard-cli.
//!
//! These tests run the actual binary and check outputs and exit codes.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{GrayImage, ImageFormat, Luma};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get a Command for the mintguard binary.
fn mintguard() -> Command {
    Command::cargo_bin("mintguard").unwrap()
}

/// Write a horizontal gradient PNG. `rising` picks the direction.
fn write_gradient(dir: &Path, name: &str, rising: bool) -> PathBuf {
    let img = GrayImage::from_fn(72, 64, |x, _| {
        let v = (x * 255 / 71) as u8;
        Luma([if rising { v } else { 255 - v }])
    });
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

fn write_corpus(dir: &Path, fingerprints: &[(&str, &str)]) -> PathBuf {
    let listings: Vec<Value> = fingerprints
        .iter()
        .enumerate()
        .map(|(i, (title, fp))| {
            serde_json::json!({
                "id": format!("00000000-0000-0000-0000-00000000000{}", i + 1),
                "title": title,
                "owner_id": format!("owner-{}", title),
                "image_url": format!("https://cdn.example.com/{}.png", title),
                "fingerprint": fp,
                "created_at": format!("2024-05-0{}T12:00:00Z", i + 1),
            })
        })
        .collect();
    let path = dir.join("corpus.json");
    fs::write(&path, serde_json::to_string(&listings).unwrap()).unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    mintguard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("near-duplicate"))
        .stdout(predicate::str::contains("hash"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_version_displays_version() {
    mintguard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mintguard"));
}

#[test]
fn test_help_shows_exit_codes() {
    mintguard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"));
}

// ============================================================================
// Hash Tests
// ============================================================================

#[test]
fn test_hash_missing_file_returns_input_error() {
    mintguard()
        .args(["hash", "nonexistent_file.png"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_hash_image_json() {
    let temp = TempDir::new().unwrap();
    let path = write_gradient(temp.path(), "rising.png", true);

    let output = mintguard()
        .args(["hash", "--json", path.to_str().unwrap()])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["dhash64"], "0000000000000000");
    assert_eq!(json["sha256"].as_str().unwrap().len(), 64);
    assert!(json.get("note").is_none());
}

#[test]
fn test_hash_non_image_has_digest_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, b"abc").unwrap();

    let output = mintguard()
        .args(["hash", "--json", path.to_str().unwrap()])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert!(json["dhash64"].is_null());
    assert_eq!(
        json["sha256"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(json["note"], "not an image");
}

#[test]
fn test_hash_quiet_prints_bare_values() {
    let temp = TempDir::new().unwrap();
    let path = write_gradient(temp.path(), "rising.png", true);

    mintguard()
        .args(["--quiet", "hash", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0000000000000000 "));
}

// ============================================================================
// Compare Tests
// ============================================================================

#[test]
fn test_compare_identical_images() {
    let temp = TempDir::new().unwrap();
    let a = write_gradient(temp.path(), "a.png", true);
    let b = write_gradient(temp.path(), "b.png", true);

    mintguard()
        .args(["compare", a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("SIMILAR"));
}

#[test]
fn test_compare_opposite_images_fails() {
    let temp = TempDir::new().unwrap();
    let a = write_gradient(temp.path(), "rising.png", true);
    let b = write_gradient(temp.path(), "falling.png", false);

    mintguard()
        .args(["compare", a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("not similar"));
}

#[test]
fn test_compare_fingerprints_threshold_boundary() {
    // 8 bits apart: 0.875 passes the default threshold
    mintguard()
        .args(["--quiet", "compare", "0000000000000000", "00000000000000ff"])
        .assert()
        .success();

    // 9 bits apart: 0.859 does not
    mintguard()
        .args(["--quiet", "compare", "0000000000000000", "00000000000001ff"])
        .assert()
        .code(65);
}

#[test]
fn test_compare_custom_threshold() {
    mintguard()
        .args([
            "--quiet",
            "compare",
            "--threshold",
            "0.5",
            "0000000000000000",
            "00000000ffffffff",
        ])
        .assert()
        .success();
}

#[test]
fn test_compare_rejects_invalid_threshold() {
    mintguard()
        .args([
            "compare",
            "--threshold",
            "1.5",
            "0000000000000000",
            "0000000000000000",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Threshold"));
}

// ============================================================================
// Scan Tests
// ============================================================================

#[test]
fn test_scan_finds_near_duplicates() {
    let temp = TempDir::new().unwrap();
    let image = write_gradient(temp.path(), "upload.png", true);
    let corpus = write_corpus(
        temp.path(),
        &[
            ("exact", "0000000000000000"),
            ("close", "000000000000000f"),
            ("opposite", "ffffffffffffffff"),
            ("broken", "zzzz"),
        ],
    );

    let output = mintguard()
        .args([
            "scan",
            "--json",
            "--corpus",
            corpus.to_str().unwrap(),
            image.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["query"], "0000000000000000");
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["title"], "exact");
    assert_eq!(matches[1]["title"], "close");
    assert_eq!(matches[1]["distance"], 4);
}

#[test]
fn test_scan_fail_on_match() {
    let temp = TempDir::new().unwrap();
    let image = write_gradient(temp.path(), "upload.png", true);
    let corpus = write_corpus(temp.path(), &[("exact", "0000000000000000")]);

    mintguard()
        .args([
            "scan",
            "--fail-on-match",
            "--corpus",
            corpus.to_str().unwrap(),
            image.to_str().unwrap(),
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Near-duplicate found"));
}

#[test]
fn test_scan_clean_image_passes() {
    let temp = TempDir::new().unwrap();
    let image = write_gradient(temp.path(), "upload.png", true);
    let corpus = write_corpus(temp.path(), &[("opposite", "ffffffffffffffff")]);

    mintguard()
        .args([
            "scan",
            "--fail-on-match",
            "--corpus",
            corpus.to_str().unwrap(),
            image.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No near-duplicates"));
}

#[test]
fn test_scan_invalid_corpus_returns_input_error() {
    let temp = TempDir::new().unwrap();
    let image = write_gradient(temp.path(), "upload.png", true);
    let corpus = temp.path().join("corpus.json");
    fs::write(&corpus, b"not json").unwrap();

    mintguard()
        .args([
            "scan",
            "--corpus",
            corpus.to_str().unwrap(),
            image.to_str().unwrap(),
        ])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to parse corpus"));
}

// ============================================================================
// Global Flag Tests
// ============================================================================

#[test]
fn test_color_never_no_ansi() {
    let temp = TempDir::new().unwrap();
    let path = write_gradient(temp.path(), "rising.png", true);

    let output = mintguard()
        .args(["--color=never", "hash", path.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let stderr = String::from_utf8_lossy(&output.get_output().stderr);

    // ANSI escape codes start with \x1b[
    assert!(
        !stdout.contains("\x1b["),
        "Color=never stdout should not contain ANSI codes"
    );
    assert!(
        !stderr.contains("\x1b["),
        "Color=never stderr should not contain ANSI codes"
    );
}

#[test]
fn test_conflicting_verbose_quiet_rejected() {
    mintguard()
        .args([
            "--verbose",
            "--quiet",
            "compare",
            "0000000000000000",
            "0000000000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
