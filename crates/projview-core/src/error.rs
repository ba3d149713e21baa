//! Error types for projview-core

use std::path::PathBuf;

use crate::config::ConfigKey;

/// Result type for projview-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in projview-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation targeted the storage root or the view root itself
    #[error("You cannot perform this operation on the {key} folder ({path})")]
    ProtectedPath { key: ConfigKey, path: PathBuf },

    /// Project names must be a single path segment
    #[error("Invalid project name: {name:?}")]
    InvalidProjectName { name: String },

    /// The sweep met a filesystem node that is neither directory, link nor file
    #[error("Unexpected filesystem entry in view tree: {path}")]
    UnclassifiableEntry { path: PathBuf },

    /// Expected an existing directory
    #[error("Not an existing directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Path is under neither the storage root nor the view root
    #[error("{path} is not inside the projects or view folder")]
    OutsideRoots { path: PathBuf },

    /// Path must be inside the view root
    #[error("{path} is not inside the view folder")]
    NotInView { path: PathBuf },

    /// A storage directory with that name already exists
    #[error("Project {project} already exists in storage at {path}")]
    ProjectExists { project: String, path: PathBuf },

    /// Folders were moved into storage but linking them failed
    #[error("Moved into storage but not linked yet: {}: {source}", projects.join(", "))]
    ConvertIncomplete {
        projects: Vec<String>,
        #[source]
        source: Box<Error>,
    },

    /// Creating a link through the platform mechanism failed
    #[error("Failed to create link {destination}: {message}")]
    LinkFailed { destination: PathBuf, message: String },

    /// First run: a template config was written and must be filled in
    #[error("Must configure {} and {} in {path}", ConfigKey::ProjectsRoot, ConfigKey::DocsViewRoot)]
    ConfigTemplateCreated { path: PathBuf },

    /// A required key is unset
    #[error("Must configure {key} in {path}")]
    ConfigIncomplete { key: ConfigKey, path: PathBuf },

    /// A configured root is missing or not a directory
    #[error("{key} is not an existing directory: {path}")]
    InvalidRoot { key: ConfigKey, path: PathBuf },

    /// Storage and view roots resolve to the same directory
    #[error("{} and {} must be different folders ({path})", ConfigKey::ProjectsRoot, ConfigKey::DocsViewRoot)]
    SameRoots { path: PathBuf },

    /// Profile names become file names and may not contain separators
    #[error("Invalid profile name: {profile:?}")]
    InvalidProfile { profile: String },

    /// Unknown value for the `backend` key
    #[error("Unknown link backend {value:?} (expected \"junction\" or \"shortcut\")")]
    UnknownLinkMechanism { value: String },

    /// No config path given and no home directory to fall back to
    #[error("Could not determine the home directory; set PROJVIEW_CONFIG")]
    NoHomeDirectory,

    /// Filesystem error from projview-fs
    #[error(transparent)]
    Fs(#[from] projview_fs::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs(projview_fs::Error::io(path, source))
    }
}
