//! Integration tests for crux-cli
//!
//! These tests load graph documents from disk the way the commands do.

use crux_cli::commands::load_graph;
use crux_cli::commands::walk::{load_snapshot, resume_state, save_snapshot};
use crux_cli::config::OutputFormat;
use crux_cli::{CliError, Config, Formatter};
use crux_domain::{ClaimId, Role};
use crux_traversal::{Answer, Traversal, TraversalSnapshot};
use std::fs;
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
  "total_perspectives": 4,
  "claims": [
    { "id": "pg", "label": "Use Postgres", "claim_type": "prescriptive", "supporters": [0, 1, 2] },
    { "id": "sqlite", "label": "Use SQLite", "claim_type": "prescriptive", "supporters": [3] },
    { "id": "replicas", "label": "Add read replicas", "claim_type": "prescriptive", "supporters": [0, 1] },
    { "id": "scale", "label": "Traffic will grow", "claim_type": "speculative", "supporters": [1] }
  ],
  "edges": [
    { "from": "pg", "to": "sqlite", "kind": "conflict", "question": "Server or embedded?" },
    { "from": "pg", "to": "replicas", "kind": "prerequisite" },
    { "from": "scale", "to": "nowhere", "kind": "prerequisite" }
  ],
  "gates": [
    {
      "id": "multi-host",
      "affected_claims": ["replicas"],
      "condition": "You run more than one host",
      "question": "More than one host?"
    }
  ]
}"#;

fn write_document(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("graph.json");
    fs::write(&path, DOCUMENT).unwrap();
    path
}

#[test]
fn test_load_graph_document() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(&write_document(&dir), &Config::default().graph).unwrap();

    assert_eq!(graph.len(), 4);
    assert_eq!(graph.tier(&ClaimId::new("replicas")), Some(1));
    assert_eq!(graph.role(&ClaimId::new("sqlite")), Some(Role::Challenger));
    assert_eq!(graph.diagnostics().len(), 1);
    assert_eq!(graph.tensions().len(), 1);
}

#[test]
fn test_malformed_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"claims\": 3 }").unwrap();

    let err = load_graph(&path, &Config::default().graph).unwrap_err();
    assert!(matches!(err, CliError::Serialization(_)));
}

#[test]
fn test_missing_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_graph(&dir.path().join("absent.json"), &Config::default().graph).unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

#[test]
fn test_inspect_and_points_output() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(&write_document(&dir), &Config::default().graph).unwrap();
    let traversal = Traversal::new(&graph);
    let formatter = Formatter::new(OutputFormat::Table, false);

    let report = formatter.format_graph(&graph).unwrap();
    assert!(report.contains("Add read replicas"));
    assert!(report.contains("scale -> nowhere references an unknown claim"));

    let points = formatter.format_points(traversal.forcing_points()).unwrap();
    assert!(points.contains("cond:multi-host"));
    assert!(points.contains("conflict:pg|sqlite"));
}

#[test]
fn test_walk_save_and_resume() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(&write_document(&dir), &Config::default().graph).unwrap();
    let traversal = Traversal::new(&graph);

    let state = traversal
        .resolve(&traversal.start(), &"cond:multi-host".into(), &Answer::condition(true))
        .unwrap();
    let snapshot_path = dir.path().join("snapshot.json");
    save_snapshot(&snapshot_path, &TraversalSnapshot::new("turn-2", state)).unwrap();

    let snapshot = load_snapshot(&snapshot_path).unwrap();
    let state = resume_state(&traversal, snapshot.state).unwrap();
    let point = traversal.next_point(&state).unwrap();
    assert_eq!(point.id.as_str(), "conflict:pg|sqlite");

    let state = traversal
        .resolve(&state, &point.id, &Answer::choice("sqlite"))
        .unwrap();
    let outcome = traversal.outcome(&state);
    assert!(outcome.complete);
    assert_eq!(
        outcome.pruned,
        vec![ClaimId::new("pg"), ClaimId::new("replicas")]
    );
    assert_eq!(
        outcome.summary,
        "1. ✓ You run more than one host\n2. → Use SQLite over Use Postgres (+1 dependent)"
    );
}
