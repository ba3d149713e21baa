//! Startup configuration: where storage and view live, which record profile
//! to use and which link mechanism to create.
//!
//! Resolution order for each root: environment variable, then config file.
//! A missing config file is seeded with a template and reported as an error
//! so the operator fills it in before anything touches the filesystem.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use projview_fs::{ConfigStore, NormalizedPath};

use crate::layout::ViewLayout;
use crate::link::LinkMechanism;
use crate::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PROJVIEW_CONFIG";

/// Config file name used in the home directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = ".projview_cli.yaml";

/// Profile used when the config leaves it out.
pub const DEFAULT_PROFILE: &str = "projects";

/// Recognized configuration keys.
///
/// The two root keys double as environment variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Storage root holding the real project folders
    ProjectsRoot,
    /// View root holding the tree of links
    DocsViewRoot,
    /// Basename of the record file inside the storage root
    Profile,
    /// Link mechanism (`junction` or `shortcut`)
    Backend,
}

impl ConfigKey {
    /// Get the string representation of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectsRoot => "PROJECTS_ROOT",
            Self::DocsViewRoot => "DOCS_VIEW_ROOT",
            Self::Profile => "profile",
            Self::Backend => "backend",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(rename = "PROJECTS_ROOT", default)]
    pub projects_root: Option<PathBuf>,

    #[serde(rename = "DOCS_VIEW_ROOT", default)]
    pub docs_view_root: Option<PathBuf>,

    #[serde(default)]
    pub backend: LinkMechanism,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

impl ConfigFile {
    /// The template written on first run.
    pub fn template() -> Self {
        Self {
            profile: default_profile(),
            projects_root: None,
            docs_view_root: None,
            backend: LinkMechanism::default(),
        }
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_root: PathBuf,
    pub view_root: PathBuf,
    pub profile: String,
    pub backend: LinkMechanism,
}

impl Settings {
    /// Load settings from `path`, letting the process environment override
    /// the root directories.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load settings from `path` with an explicit environment lookup.
    pub fn load_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = ConfigStore::new();
        let config_path = NormalizedPath::new(path);

        if !path.exists() {
            store.save(&config_path, &ConfigFile::template())?;
            info!("Wrote config template to {}", path.display());
            return Err(Error::ConfigTemplateCreated {
                path: path.to_path_buf(),
            });
        }

        let file: ConfigFile = store.load(&config_path)?;
        debug!("Loaded config from {}", path.display());

        let from_env = |key: ConfigKey| {
            env(key.as_str())
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let storage_root = from_env(ConfigKey::ProjectsRoot)
            .or(file.projects_root)
            .ok_or_else(|| Error::ConfigIncomplete {
                key: ConfigKey::ProjectsRoot,
                path: path.to_path_buf(),
            })?;
        let view_root = from_env(ConfigKey::DocsViewRoot)
            .or(file.docs_view_root)
            .ok_or_else(|| Error::ConfigIncomplete {
                key: ConfigKey::DocsViewRoot,
                path: path.to_path_buf(),
            })?;

        Ok(Self {
            storage_root,
            view_root,
            profile: file.profile,
            backend: file.backend,
        })
    }

    /// Validate the roots and build the layout handed to every component.
    pub fn layout(&self) -> Result<ViewLayout> {
        ViewLayout::new(&self.storage_root, &self.view_root, &self.profile)
    }
}

/// Resolve the config file location: explicit path, then `$PROJVIEW_CONFIG`,
/// then `~/.projview_cli.yaml`.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env(CONFIG_ENV).filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(Error::NoHomeDirectory)
}
