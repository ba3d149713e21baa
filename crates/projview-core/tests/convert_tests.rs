//! Tests for moving folders into storage

use pretty_assertions::assert_eq;
use projview_core::{ConvertTarget, Error, LinkMechanism, ViewLayout, ViewManager};
use projview_fs::NormalizedPath;
use projview_test_utils::TestWorkspace;
use serde_json::json;

fn manager(ws: &TestWorkspace) -> ViewManager {
    let layout = ViewLayout::new(&ws.storage(), &ws.view(), "projects").unwrap();
    ViewManager::with_mechanism(layout, LinkMechanism::Shortcut)
}

#[test]
fn test_convert_named_folder_from_view() {
    let ws = TestWorkspace::new();
    ws.write_view_file("work/alpha/main.rs", "fn main() {}");
    let cwd = ws.view().join("work");

    let report = manager(&ws)
        .convert(&cwd, &ConvertTarget::from("alpha"))
        .unwrap();

    assert_eq!(report.converted.len(), 1);
    let converted = &report.converted[0];
    assert_eq!(converted.project, "alpha");
    assert_eq!(converted.view_dir, NormalizedPath::new("work"));
    assert!(converted.moved);
    assert!(report.leftover.is_none());

    assert!(ws.storage().join("alpha/main.rs").is_file());
    ws.assert_view_link("work/alpha");
    assert!(!ws.view().join("work/alpha").exists());
    assert_eq!(ws.read_record("projects"), json!({ "alpha": ["work"] }));
}

#[test]
fn test_convert_all_subdirectories() {
    let ws = TestWorkspace::new();
    ws.write_view_file("inbox/alpha/a.txt", "a");
    ws.write_view_file("inbox/beta/b.txt", "b");
    ws.write_view_file("inbox/loose.txt", "not a project");
    let cwd = ws.view().join("inbox");

    let report = manager(&ws).convert(&cwd, &ConvertTarget::All).unwrap();

    let names: Vec<&str> = report
        .converted
        .iter()
        .map(|c| c.project.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(report.leftover, Some(cwd.clone()));
    assert!(ws.storage().join("alpha/a.txt").is_file());
    assert!(ws.storage().join("beta/b.txt").is_file());
    assert_eq!(
        ws.read_record("projects"),
        json!({ "alpha": ["inbox"], "beta": ["inbox"] })
    );
    ws.assert_view_link("inbox/alpha");
    ws.assert_view_link("inbox/beta");
    assert!(cwd.join("loose.txt").is_file());
}

#[test]
fn test_convert_all_moves_every_folder_before_linking() {
    let ws = TestWorkspace::new();
    ws.write_view_file("inbox/a/notes.md", "a");
    ws.write_view_file("inbox/b/notes.md", "b");
    ws.mkdir_view("inbox/b/empty_sub");
    let cwd = ws.view().join("inbox");

    let report = manager(&ws).convert(&cwd, &ConvertTarget::All).unwrap();

    assert_eq!(report.sync.created(), 2);
    assert!(ws.storage().join("b/empty_sub").is_dir());
    assert!(ws.storage().join("b/notes.md").is_file());
    ws.assert_view_link("inbox/a");
    ws.assert_view_link("inbox/b");
}

#[test]
fn test_convert_all_checks_every_name_before_moving() {
    let ws = TestWorkspace::new();
    ws.add_project("beta");
    ws.write_view_file("inbox/alpha/a.txt", "a");
    ws.write_view_file("inbox/beta/b.txt", "b");
    let cwd = ws.view().join("inbox");

    let result = manager(&ws).convert(&cwd, &ConvertTarget::All);

    assert!(matches!(result, Err(Error::ProjectExists { ref project, .. }) if project == "beta"));
    assert!(cwd.join("alpha/a.txt").is_file());
    assert!(!ws.storage().join("alpha").exists());
    assert!(!ws.record_path("projects").exists());
}

#[test]
fn test_convert_all_of_empty_folder_leaves_record_alone() {
    let ws = TestWorkspace::new();
    let cwd = ws.mkdir_view("inbox");

    let report = manager(&ws).convert(&cwd, &ConvertTarget::All).unwrap();

    assert!(report.converted.is_empty());
    assert!(report.sync.is_noop());
    assert!(!ws.record_path("projects").exists());
}

#[test]
fn test_convert_existing_storage_name_fails() {
    let ws = TestWorkspace::new();
    ws.add_project("alpha");
    ws.write_view_file("work/alpha/draft.md", "local");

    let result = manager(&ws).convert(&ws.view().join("work"), &ConvertTarget::from("alpha"));

    assert!(matches!(result, Err(Error::ProjectExists { ref project, .. }) if project == "alpha"));
    assert!(ws.view().join("work/alpha/draft.md").is_file());
    assert!(!ws.record_path("projects").exists());
}

#[test]
fn test_convert_outside_roots_fails() {
    let ws = TestWorkspace::new();
    let elsewhere = ws.root().join("elsewhere");
    std::fs::create_dir_all(elsewhere.join("alpha")).unwrap();

    let result = manager(&ws).convert(&elsewhere, &ConvertTarget::from("alpha"));

    assert!(matches!(result, Err(Error::OutsideRoots { .. })));
    assert!(elsewhere.join("alpha").is_dir());
}

#[test]
fn test_convert_project_already_in_storage_links_at_root() {
    let ws = TestWorkspace::new();
    ws.add_project("alpha");

    let report = manager(&ws)
        .convert(&ws.storage(), &ConvertTarget::from("alpha"))
        .unwrap();

    assert!(!report.converted[0].moved);
    assert_eq!(report.converted[0].view_dir, NormalizedPath::empty());
    ws.assert_view_link("alpha");
    assert_eq!(ws.read_record("projects"), json!({ "alpha": [""] }));
}

#[test]
fn test_convert_nested_storage_folder_moves_up() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(ws.storage().join("clients/alpha")).unwrap();

    let report = manager(&ws)
        .convert(&ws.storage().join("clients"), &ConvertTarget::from("alpha"))
        .unwrap();

    assert!(report.converted[0].moved);
    assert!(ws.storage().join("alpha").is_dir());
    ws.assert_view_link("clients/alpha");
}

#[test]
fn test_convert_all_in_root_is_protected() {
    let ws = TestWorkspace::new();
    ws.mkdir_view("alpha");

    let result = manager(&ws).convert(&ws.view(), &ConvertTarget::All);

    assert!(matches!(result, Err(Error::ProtectedPath { .. })));
}

#[test]
fn test_convert_missing_folder_fails() {
    let ws = TestWorkspace::new();

    let result = manager(&ws).convert(&ws.view(), &ConvertTarget::from("ghost"));
    assert!(matches!(result, Err(Error::NotADirectory { .. })));
}

#[cfg(unix)]
#[test]
fn test_failed_link_after_move_is_reported() {
    let ws = TestWorkspace::new();
    ws.write_view_file("work/alpha/a.txt", "a");
    let odd = ws.mkdir_view("odd");
    let _listener = std::os::unix::net::UnixListener::bind(odd.join("sock")).unwrap();

    let result = manager(&ws).convert(&ws.view().join("work"), &ConvertTarget::from("alpha"));

    match result {
        Err(Error::ConvertIncomplete { projects, source }) => {
            assert_eq!(projects, vec!["alpha".to_string()]);
            assert!(matches!(*source, Error::UnclassifiableEntry { .. }));
        }
        other => panic!("expected ConvertIncomplete, got {:?}", other.map(|r| r.converted.len())),
    }
    assert!(ws.storage().join("alpha/a.txt").is_file());
}
