//! Tests for settings resolution

use projview_core::config::{ConfigFile, Settings};
use projview_core::{ConfigKey, Error, LinkMechanism};
use projview_test_utils::TestWorkspace;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

mod template {
    use super::*;

    #[test]
    fn test_missing_config_seeds_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("projview.yaml");

        let result = Settings::load_with_env(&path, no_env);

        assert!(matches!(result, Err(Error::ConfigTemplateCreated { .. })));
        let written: ConfigFile = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, ConfigFile::template());
    }

    #[test]
    fn test_template_message_names_keys_and_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("projview.yaml");

        let message = Settings::load_with_env(&path, no_env).unwrap_err().to_string();

        assert!(message.contains("PROJECTS_ROOT"), "got: {}", message);
        assert!(message.contains("DOCS_VIEW_ROOT"), "got: {}", message);
        assert!(message.contains("projview.yaml"), "got: {}", message);
    }

    #[test]
    fn test_unfilled_template_is_incomplete() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("projview.yaml");
        let _ = Settings::load_with_env(&path, no_env);

        let result = Settings::load_with_env(&path, no_env);
        assert!(matches!(
            result,
            Err(Error::ConfigIncomplete {
                key: ConfigKey::ProjectsRoot,
                ..
            })
        ));
    }
}

mod resolution {
    use super::*;

    #[test]
    fn test_yaml_config_loads() {
        let ws = TestWorkspace::new();
        let path = ws.write_config("shortcut");

        let settings = Settings::load_with_env(&path, no_env).unwrap();

        assert_eq!(settings.storage_root, ws.storage());
        assert_eq!(settings.view_root, ws.view());
        assert_eq!(settings.profile, "projects");
        assert_eq!(settings.backend, LinkMechanism::Shortcut);
        assert!(settings.layout().is_ok());
    }

    #[test]
    fn test_env_overrides_roots() {
        let ws = TestWorkspace::new();
        let path = ws.write_config("junction");
        let other_view = ws.root().join("other-view");
        fs::create_dir(&other_view).unwrap();
        let other = other_view.to_string_lossy().into_owned();

        let settings = Settings::load_with_env(&path, |key| {
            (key == "DOCS_VIEW_ROOT").then(|| other.clone())
        })
        .unwrap();

        assert_eq!(settings.view_root, other_view);
        assert_eq!(settings.storage_root, ws.storage());
    }

    #[test]
    fn test_json_config_with_defaults() {
        let ws = TestWorkspace::new();
        let path = ws.root().join("projview.json");
        let content = serde_json::json!({
            "PROJECTS_ROOT": ws.storage(),
            "DOCS_VIEW_ROOT": ws.view(),
        });
        fs::write(&path, content.to_string()).unwrap();

        let settings = Settings::load_with_env(&path, no_env).unwrap();

        assert_eq!(settings.profile, "projects");
        assert_eq!(settings.backend, LinkMechanism::Junction);
    }

    #[test]
    fn test_unknown_backend_is_a_parse_error() {
        let ws = TestWorkspace::new();
        let path = ws.write_config("hardlink");

        let message = Settings::load_with_env(&path, no_env).unwrap_err().to_string();
        assert!(message.contains("hardlink"), "got: {}", message);
        assert!(message.contains("junction"), "got: {}", message);
    }

    #[test]
    fn test_backend_aliases_accepted() {
        let ws = TestWorkspace::new();

        let path = ws.write_config("symlink");
        let settings = Settings::load_with_env(&path, no_env).unwrap();
        assert_eq!(settings.backend, LinkMechanism::Junction);

        let path = ws.write_config("LNK");
        let settings = Settings::load_with_env(&path, no_env).unwrap();
        assert_eq!(settings.backend, LinkMechanism::Shortcut);
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_missing_root_is_invalid() {
        let ws = TestWorkspace::new();
        let path = ws.write_config("junction");
        fs::remove_dir(ws.view()).unwrap();

        let settings = Settings::load_with_env(&path, no_env).unwrap();
        let result = settings.layout();

        assert!(matches!(
            result,
            Err(Error::InvalidRoot {
                key: ConfigKey::DocsViewRoot,
                ..
            })
        ));
    }

    #[test]
    fn test_same_roots_rejected() {
        let ws = TestWorkspace::new();
        let path = ws.write_config("junction");
        let storage = ws.storage().to_string_lossy().into_owned();

        let settings = Settings::load_with_env(&path, |key| {
            (key == "DOCS_VIEW_ROOT").then(|| storage.clone())
        })
        .unwrap();

        assert!(matches!(settings.layout(), Err(Error::SameRoots { .. })));
    }
}
