//! Integration tests for the `orthograph` CLI binary.
//!
//! These tests validate subcommand invocation, help text, error handling,
//! and basic smoke runs. They intentionally do NOT duplicate the core
//! algorithm tests — those live in `crates/core/tests/`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper: build the orthograph command.
fn orthograph() -> Command {
    Command::cargo_bin("orthograph").expect("binary should exist")
}

/// Helper: write a graph file into the temp dir.
fn write_graph(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write test input");
    path
}

const SQUARE: &str = "nodes:\n0\n1\n2\n3\nedges:\n0 1\n1 2\n2 3\n3 0\n";

// =========================================================================
// Top-level CLI
// =========================================================================

#[test]
fn no_args_shows_help() {
    orthograph()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    orthograph()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("orthograph"));
}

#[test]
fn help_flag() {
    orthograph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("orthogonal"))
        .stdout(predicate::str::contains("draw"))
        .stdout(predicate::str::contains("info"));
}

// =========================================================================
// draw
// =========================================================================

#[test]
fn draw_square_prints_stats() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "square.txt", SQUARE);
    orthograph()
        .arg("draw")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Area: 4"))
        .stdout(predicate::str::contains("Bends: 0"))
        .stdout(predicate::str::contains("Crossings: 0"));
}

#[test]
fn draw_writes_svg_and_graphml() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "square.txt", SQUARE);
    let svg_path = dir.path().join("out.svg");
    let graphml_path = dir.path().join("out.graphml");
    orthograph()
        .arg("draw")
        .arg(&input)
        .arg("--svg")
        .arg(&svg_path)
        .arg("--graphml")
        .arg(&graphml_path)
        .arg("--quiet")
        .assert()
        .success();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    let graphml = fs::read_to_string(&graphml_path).unwrap();
    assert!(graphml.contains("<graphml"));
    assert!(graphml.contains("edgedefault=\"undirected\""));
}

#[test]
fn draw_writes_stats_json() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "square.txt", SQUARE);
    let json_path = dir.path().join("stats.json");
    orthograph()
        .arg("draw")
        .arg(&input)
        .arg("--stats-json")
        .arg(&json_path)
        .arg("--quiet")
        .assert()
        .success();
    let json = fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"crossings\""));
    assert!(json.contains("\"area\""));
}

#[test]
fn draw_rejects_disconnected_graph() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "two.txt", "nodes:\n0\n1\nedges:\n");
    orthograph()
        .arg("draw")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not connected"));
}

#[test]
fn draw_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "bad.txt", "nodes:\n0\n0\n");
    orthograph()
        .arg("draw")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn draw_rejects_missing_file() {
    orthograph()
        .arg("draw")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// =========================================================================
// info
// =========================================================================

#[test]
fn info_reports_counts_and_planarity() {
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "square.txt", SQUARE);
    orthograph()
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes: 4"))
        .stdout(predicate::str::contains("Edges: 4"))
        .stdout(predicate::str::contains("Connected: true"))
        .stdout(predicate::str::contains("Planar: true"));
}

#[test]
fn info_detects_non_planar_input() {
    // K5
    let mut content = String::from("nodes:\n0\n1\n2\n3\n4\nedges:\n");
    for i in 0..5u32 {
        for j in i + 1..5u32 {
            content.push_str(&format!("{i} {j}\n"));
        }
    }
    let dir = TempDir::new().unwrap();
    let input = write_graph(&dir, "k5.txt", &content);
    orthograph()
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Planar: false"));
}

// =========================================================================
// gen
// =========================================================================

#[test]
fn gen_writes_parsable_graph() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("random.txt");
    orthograph()
        .arg("gen")
        .arg("--kind")
        .arg("random-deg4")
        .arg("-n")
        .arg("8")
        .arg("-e")
        .arg("10")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("nodes:"));
    // the generated graph feeds straight back into draw
    orthograph()
        .arg("draw")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();
}

#[test]
fn gen_to_stdout() {
    orthograph()
        .arg("gen")
        .arg("--kind")
        .arg("grid")
        .arg("-n")
        .arg("3")
        .arg("-e")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes:"))
        .stdout(predicate::str::contains("edges:"));
}
