//! Outcome of a reconciliation pass

use std::path::PathBuf;

use projview_fs::NormalizedPath;

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Compute the report without touching the filesystem
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// A filesystem mutation performed (or planned, in a dry run).
///
/// Paths are relative to the view root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    CreatedLink {
        project: String,
        destination: NormalizedPath,
    },
    RemovedLink {
        path: NormalizedPath,
    },
    PrunedDirectory {
        path: NormalizedPath,
    },
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedLink {
                project,
                destination,
            } => write!(f, "link {} -> {}", destination, project),
            Self::RemovedLink { path } => write!(f, "delete {}", path),
            Self::PrunedDirectory { path } => write!(f, "delete empty directory {}", path),
        }
    }
}

/// Something the pass skipped without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncWarning {
    /// The record names a project with no storage folder
    MissingSource { project: String, source: PathBuf },
    /// The destination would sit inside another link
    NestedInLink {
        project: String,
        destination: NormalizedPath,
        link: NormalizedPath,
    },
    /// The record holds an absolute view directory
    OutsideView {
        project: String,
        view_dir: NormalizedPath,
    },
    /// Something that is not a link already occupies the destination
    Occupied { path: NormalizedPath },
    /// A stale directory still holds untracked content
    NonEmptyDirectory { path: NormalizedPath },
}

impl std::fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource { project, source } => write!(
                f,
                "project {} has no folder in storage ({})",
                project,
                source.display()
            ),
            Self::NestedInLink {
                project,
                destination,
                link,
            } => write!(
                f,
                "not linking {} at {}: {} is itself a link",
                project, destination, link
            ),
            Self::OutsideView { project, view_dir } => write!(
                f,
                "not linking {} at {}: view directories must be relative",
                project, view_dir
            ),
            Self::Occupied { path } => {
                write!(f, "{} already exists and is not a link", path)
            }
            Self::NonEmptyDirectory { path } => write!(f, "directory \"{}\" is not empty", path),
        }
    }
}

/// Report from a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Mutations, in the order they happened
    pub actions: Vec<SyncAction>,
    /// Skipped work
    pub warnings: Vec<SyncWarning>,
}

impl SyncReport {
    pub fn new(options: &SyncOptions) -> Self {
        Self {
            dry_run: options.dry_run,
            ..Self::default()
        }
    }

    /// True when the view already matched the record.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn created(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, SyncAction::CreatedLink { .. }))
            .count()
    }

    pub fn removed(&self) -> usize {
        self.actions.len() - self.created()
    }

    pub fn with_action(mut self, action: SyncAction) -> Self {
        self.actions.push(action);
        self
    }
}
