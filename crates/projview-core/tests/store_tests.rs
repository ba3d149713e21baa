//! Tests for the record file

use pretty_assertions::assert_eq;
use projview_core::{ProjectMapping, ProjectStore, ViewLayout};
use projview_test_utils::TestWorkspace;
use std::fs;

fn store(ws: &TestWorkspace, profile: &str) -> ProjectStore {
    let layout = ViewLayout::new(&ws.storage(), &ws.view(), profile).unwrap();
    ProjectStore::new(&layout)
}

#[test]
fn test_missing_record_is_empty() {
    let ws = TestWorkspace::new();
    assert!(store(&ws, "projects").load().is_empty());
}

#[test]
fn test_malformed_record_is_empty() {
    let ws = TestWorkspace::new();
    ws.write_record("projects", "{ not json");
    assert!(store(&ws, "projects").load().is_empty());

    ws.write_record("projects", r#"{"alpha": "work"}"#);
    assert!(store(&ws, "projects").load().is_empty());
}

#[test]
fn test_save_is_pretty_json() {
    let ws = TestWorkspace::new();
    let mapping: ProjectMapping = [("beta", "b"), ("alpha", "work"), ("alpha", "")]
        .into_iter()
        .collect();

    store(&ws, "projects").save(&mapping).unwrap();

    let content = fs::read_to_string(ws.record_path("projects")).unwrap();
    assert_eq!(
        content,
        "{\n  \"alpha\": [\n    \"work\",\n    \"\"\n  ],\n  \"beta\": [\n    \"b\"\n  ]\n}\n"
    );
}

#[test]
fn test_profiles_are_separate_records() {
    let ws = TestWorkspace::new();
    let mapping: ProjectMapping = [("alpha", "work")].into_iter().collect();

    store(&ws, "work").save(&mapping).unwrap();

    assert_eq!(store(&ws, "work").load(), mapping);
    assert!(store(&ws, "home").load().is_empty());
    assert!(ws.record_path("work").is_file());
}

#[test]
fn test_save_replaces_whole_record() {
    let ws = TestWorkspace::new();
    ws.write_record("projects", r#"{"old": ["x"]}"#);
    let mapping: ProjectMapping = [("new", "y")].into_iter().collect();

    let store = store(&ws, "projects");
    store.save(&mapping).unwrap();

    assert_eq!(store.load(), mapping);
    assert_eq!(
        fs::read_dir(ws.storage()).unwrap().count(),
        1,
        "temp file left behind"
    );
}
