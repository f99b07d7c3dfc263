//! Integration tests for Graphsync
//!
//! These tests drive the snapshot, policy and engine crates together and
//! exercise the CLI binary end to end.

use graphsync_core::{EventName, EventSource, Graph, GraphView, load_snapshot, save_snapshot};
use graphsync_core::test_utils::{Recorder, graph_from};
use graphsync_engine::{SyncPolicy, sync};
use serde_json::json;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_fixtures(dir: &Path) {
    let mut source = graph_from(
        &[
            ("a", &[("label", json!("A")), ("draft", json!(false))]),
            ("b", &[("label", json!("B")), ("draft", json!(true))]),
            ("c", &[("label", json!("C")), ("draft", json!(false))]),
        ],
        &[("ac", "a", "c")],
    );
    source.set_attribute("name", json!("upstream"));
    let target = graph_from(&[("b", &[("label", json!("stale"))]), ("keep", &[])], &[]);

    save_snapshot(&source, &dir.join("source.json")).unwrap();
    save_snapshot(&target, &dir.join("target.json")).unwrap();
    std::fs::write(
        dir.join("policy.toml"),
        r#"
sleep_events_target = ["nodeAdded"]
ignore_node_attributes = ["draft"]

[[merge_node]]
kind = "attribute_equals"
name = "draft"
value = false

[[merge_edge]]
kind = "always"

[[drop_node]]
kind = "attribute_equals"
name = "draft"
value = true
"#,
    )
    .unwrap();
}

fn assert_synced(target: &Graph) {
    assert!(target.has_node("a"));
    assert!(target.has_node("c"));
    assert!(!target.has_node("b"));
    assert!(target.has_node("keep"));
    assert!(target.has_edge("ac"));
    assert_eq!(target.node_attributes("a").unwrap().get("draft"), None);
    assert_eq!(target.attributes()["name"], json!("upstream"));
}

/// Snapshots, policy file and engine used together as a library
#[test]
fn test_library_pipeline() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let mut source = load_snapshot(&dir.path().join("source.json")).unwrap();
    let mut target = load_snapshot(&dir.path().join("target.json")).unwrap();
    let policy = SyncPolicy::load(&dir.path().join("policy.toml")).unwrap();

    let recorder = Recorder::new();
    recorder.attach(&mut target, EventName::NodeAdded);
    recorder.attach(&mut target, EventName::NodeDropped);

    let report = sync(&mut source, &mut target, &policy.to_options()).unwrap();

    assert_synced(&target);
    assert_eq!(report.nodes.created, 2);
    assert_eq!(report.nodes.dropped, 1);
    assert_eq!(recorder.names(), vec![EventName::NodeDropped]);
    assert_eq!(target.listeners(EventName::NodeAdded).len(), 1);
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_graphsync"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Policy-driven one-way graph reconciliation"));
}

/// Test that `sync` writes the reconciled target
#[test]
fn test_cli_sync_writes_output() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    let output_path = dir.path().join("out").join("target.json");

    let output = Command::new(env!("CARGO_BIN_EXE_graphsync"))
        .arg("sync")
        .arg("--source")
        .arg(dir.path().join("source.json"))
        .arg("--target")
        .arg(dir.path().join("target.json"))
        .arg("--policy")
        .arg(dir.path().join("policy.toml"))
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["nodes"]["created"], json!(2));

    assert_synced(&load_snapshot(&output_path).unwrap());
    let untouched = load_snapshot(&dir.path().join("target.json")).unwrap();
    assert!(untouched.has_node("b"));
}

/// Test that `--dry-run` leaves the target file alone
#[test]
fn test_cli_dry_run() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    let target_path = dir.path().join("target.json");
    let before = std::fs::read_to_string(&target_path).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_graphsync"))
        .args(["sync", "--dry-run", "--source"])
        .arg(dir.path().join("source.json"))
        .arg("--target")
        .arg(&target_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&target_path).unwrap(), before);
}

/// Test that a broken policy surfaces as a failed run
#[test]
fn test_cli_rejects_bad_policy() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    std::fs::write(dir.path().join("bad.toml"), "sleep_events_target = [\"nodeRenamed\"]").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_graphsync"))
        .arg("sync")
        .arg("--source")
        .arg(dir.path().join("source.json"))
        .arg("--target")
        .arg(dir.path().join("target.json"))
        .arg("--policy")
        .arg(dir.path().join("bad.toml"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

/// Test that `inspect` summarizes a snapshot
#[test]
fn test_cli_inspect() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_graphsync"))
        .arg("inspect")
        .arg(dir.path().join("source.json"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nodes: 3"));
    assert!(stdout.contains("edges: 1"));
    assert!(stdout.contains("attributes: name"));
}
