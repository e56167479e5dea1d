//! Integration tests for `tangle run` and `tangle version`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `tangle` binary.
fn tangle_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_run-<hash>
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

// ---------------------------------------------------------------------------
// run: human mode
// ---------------------------------------------------------------------------

#[test]
fn run_echoes_each_change() {
    let (_dir, path) = write_script("node A 0 0\nnode B 10 0\nconnect A B\n");
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path")])
        .output()
        .expect("run tangle run");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("node A added"), "stdout: {stdout}");
    assert!(stdout.contains("node B added"), "stdout: {stdout}");
    assert!(
        stdout.contains("edge #0 added: A - B (straight)"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("sketch: 2 nodes, 1 edges"), "stdout: {stdout}");
}

#[test]
fn run_echoes_curvature_hints_for_parallel_edges() {
    let (_dir, path) = write_script(
        "node A 0 0\nnode B 10 0\nconnect A B\nconnect A B\nconnect A B\n",
    );
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path")])
        .output()
        .expect("run tangle run");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("(straight)"), "stdout: {stdout}");
    assert!(stdout.contains("(curve-right)"), "stdout: {stdout}");
    assert!(stdout.contains("(curve-left)"), "stdout: {stdout}");
}

#[test]
fn run_quiet_suppresses_echo_but_keeps_the_summary() {
    let (_dir, path) = write_script("node A 0 0\nnode B 10 0\nconnect A B\n");
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path"), "--quiet"])
        .output()
        .expect("run tangle run");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("added"), "stdout: {stdout}");
    assert!(stdout.contains("sketch: 2 nodes, 1 edges"), "stdout: {stdout}");
}

#[test]
fn run_prints_inline_cycle_reports() {
    let (_dir, path) = write_script(
        "node A 0 0\nconnect A A\nconnect A A\ncycles\ndelete A\ncycles\n",
    );
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path"), "--quiet"])
        .output()
        .expect("run tangle run");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("A -> A"), "stdout: {stdout}");
    assert!(stdout.contains("no cycles detected"), "stdout: {stdout}");
}

#[test]
fn run_echoes_cascading_delete_as_one_event() {
    let (_dir, path) = write_script(
        "node A 0 0\nnode B 10 0\nconnect A B\nconnect A B\ndelete A\n",
    );
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path")])
        .output()
        .expect("run tangle run");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("node A removed"), "stdout: {stdout}");
    // Cascaded edges are folded into the node event.
    assert!(!stdout.contains("edge #0 removed"), "stdout: {stdout}");
    assert!(stdout.contains("sketch: 1 nodes, 0 edges"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// run: json mode
// ---------------------------------------------------------------------------

#[test]
fn run_json_emits_one_event_per_line() {
    let (_dir, path) = write_script("node A 0 0\nconnect A A\n");
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path"), "--format", "json"])
        .output()
        .expect("run tangle run");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "stdout: {stdout}");

    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
    assert_eq!(first["event"], "node_added");
    assert_eq!(first["label"], "A");

    let second: serde_json::Value = serde_json::from_str(lines[1]).expect("json");
    assert_eq!(second["event"], "edge_added");

    let summary: serde_json::Value = serde_json::from_str(lines[2]).expect("json");
    assert_eq!(summary["nodes"], 1);
    assert_eq!(summary["edges"], 1);
}

// ---------------------------------------------------------------------------
// run: failures
// ---------------------------------------------------------------------------

#[test]
fn run_duplicate_label_exits_1() {
    let (_dir, path) = write_script("node A 0 0\nnode A 5 5\n");
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path")])
        .output()
        .expect("run tangle run");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("duplicate label"), "stderr: {stderr}");
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

#[test]
fn run_delete_of_missing_node_exits_1() {
    let (_dir, path) = write_script("delete Q\n");
    let out = Command::new(tangle_bin())
        .args(["run", path.to_str().expect("path")])
        .output()
        .expect("run tangle run");
    assert_eq!(out.status.code(), Some(1));
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

#[test]
fn version_prints_the_core_version() {
    let out = Command::new(tangle_bin())
        .arg("version")
        .output()
        .expect("run tangle version");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "0.1.0");
}
