//! Integration tests for `tangle inspect`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `tangle` binary.
fn tangle_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_inspect-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("tangle");
    path
}

/// Writes a script into a temp dir and returns (guard, path).
fn write_script(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("script.tgl");
    std::fs::write(&path, content).expect("write script");
    (dir, path)
}

const MIXED: &str = "\
node A 50 50
node B 200 50
node C 350 150
connect A B
connect A B
connect B C
connect C C
connect C C
";

#[test]
fn inspect_human_shows_counts() {
    let (_dir, path) = write_script(MIXED);
    let out = Command::new(tangle_bin())
        .args(["inspect", path.to_str().expect("path")])
        .output()
        .expect("run tangle inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("nodes:      3"), "stdout: {stdout}");
    assert!(stdout.contains("edges:      5"), "stdout: {stdout}");
    assert!(stdout.contains("self loops: 2"), "stdout: {stdout}");
    assert!(stdout.contains("A-B: 2"), "stdout: {stdout}");
    assert!(stdout.contains("C-C: 2"), "stdout: {stdout}");
    // Two multi-edge cycles: the doubled A-B pair and the doubled C self-pair.
    assert!(stdout.contains("cycles:     2"), "stdout: {stdout}");
}

#[test]
fn inspect_json_is_parseable() {
    let (_dir, path) = write_script(MIXED);
    let out = Command::new(tangle_bin())
        .args([
            "inspect",
            path.to_str().expect("path"),
            "--format",
            "json",
        ])
        .output()
        .expect("run tangle inspect");
    assert!(out.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["nodes"], 3);
    assert_eq!(value["edges"], 5);
    assert_eq!(value["self_loops"], 2);
    assert_eq!(value["pairs"]["A-B"], 2);
    assert_eq!(value["cycles"], 2);
}

#[test]
fn inspect_empty_script() {
    let (_dir, path) = write_script("");
    let out = Command::new(tangle_bin())
        .args(["inspect", path.to_str().expect("path")])
        .output()
        .expect("run tangle inspect");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("nodes:      0"), "stdout: {stdout}");
}

#[test]
fn inspect_malformed_script_exits_2() {
    let (_dir, path) = write_script("connect\n");
    let out = Command::new(tangle_bin())
        .args(["inspect", path.to_str().expect("path")])
        .output()
        .expect("run tangle inspect");
    assert_eq!(out.status.code(), Some(2));
}
