mod common;

use std::path::Path;
use std::process::{Command, Output};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_retrodex")
}

fn retrodex(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("RETRODEX_DATA_DIR")
        .env_remove("RETRODEX_OUT_DIR")
        .env("RUST_LOG", "off")
        .output()
        .expect("retrodex should run")
}

fn path(dir: &Path) -> &str {
    dir.to_str().expect("temp paths are utf-8")
}

fn compile_fixture(snapshot: &Path, out: &Path) {
    common::write_snapshot(snapshot);
    let output = retrodex(&[
        "compile",
        "--data-dir",
        path(snapshot),
        "--out-dir",
        path(out),
    ]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("compiled 5 creatures, 8 moves, 7 traits"));
    assert!(stdout.contains("skipped 1 moves, 0 traits"));
}

#[test]
fn compile_then_show_emits_resolved_json() {
    let snapshot = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    compile_fixture(snapshot.path(), out.path());

    let output = retrodex(&[
        "show",
        "magnemite",
        "--generation",
        "1",
        "--tables",
        path(out.path()),
    ]);
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show should emit json");
    assert_eq!(payload["id"], 81);
    assert_eq!(payload["generation"], 1);
    assert_eq!(payload["types"], serde_json::json!(["electric"]));

    let output = retrodex(&["show", "19", "-g", "2", "--tables", path(out.path())]);
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["name"], "rattata");
}

#[test]
fn compile_honours_explicit_ids() {
    let snapshot = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_snapshot(snapshot.path());
    let output = retrodex(&[
        "compile",
        "--data-dir",
        path(snapshot.path()),
        "--out-dir",
        path(out.path()),
        "--ids",
        "81,4",
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("compiled 2 creatures"));
}

#[test]
fn validate_passes_on_fresh_tables() {
    let snapshot = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    compile_fixture(snapshot.path(), out.path());

    let output = retrodex(&["validate", "--tables", path(out.path())]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validated 3 datasets, 3 ok, 0 errors"));
    assert!(stdout.contains("references move 204 absent from the move table"));
}

#[test]
fn show_rejects_out_of_range_generation() {
    let output = retrodex(&["show", "bulbasaur", "--generation", "4", "--tables", "missing"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: retrodex show"));
}

#[test]
fn show_reports_missing_tables() {
    let dir = tempfile::tempdir().unwrap();
    let output = retrodex(&["show", "bulbasaur", "--tables", path(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing source file"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = retrodex(&["simulate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

    let output = retrodex(&["compile", "--ids", "1,x"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn compile_without_snapshot_fails() {
    let out = tempfile::tempdir().unwrap();
    let output = retrodex(&[
        "compile",
        "--data-dir",
        "/nonexistent/api/v2",
        "--out-dir",
        path(out.path()),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("data directory"));
}
