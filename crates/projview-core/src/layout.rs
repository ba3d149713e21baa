//! The two protected roots and the active profile.

use std::path::{Path, PathBuf};

use projview_fs::NormalizedPath;

use crate::config::ConfigKey;
use crate::{Error, Result};

/// Storage root, view root and record profile for one invocation.
///
/// Both roots are canonicalized on construction. Every component receives a
/// reference to a layout instead of reading process-wide state, so several
/// independent layouts can coexist (one per test, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLayout {
    storage_root: PathBuf,
    view_root: PathBuf,
    profile: String,
}

impl ViewLayout {
    /// Validate and canonicalize the roots.
    ///
    /// # Errors
    ///
    /// - `InvalidRoot` if either root is not an existing directory
    /// - `SameRoots` if both resolve to the same directory
    /// - `InvalidProfile` if the profile is empty or contains a separator
    pub fn new(storage_root: &Path, view_root: &Path, profile: &str) -> Result<Self> {
        let storage_root = canonical_dir(storage_root, ConfigKey::ProjectsRoot)?;
        let view_root = canonical_dir(view_root, ConfigKey::DocsViewRoot)?;

        if storage_root == view_root {
            return Err(Error::SameRoots { path: storage_root });
        }
        if profile.is_empty() || profile.contains(['/', '\\']) || profile == "." || profile == ".." {
            return Err(Error::InvalidProfile {
                profile: profile.to_string(),
            });
        }

        Ok(Self {
            storage_root,
            view_root,
            profile: profile.to_string(),
        })
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn view_root(&self) -> &Path {
        &self.view_root
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// `<storage>/<profile>.json`
    pub fn record_path(&self) -> PathBuf {
        self.storage_root.join(format!("{}.json", self.profile))
    }

    /// Which root `path` is, if any.
    pub fn protected_root(&self, path: &Path) -> Option<ConfigKey> {
        let forms = comparable_forms(path);
        if forms.contains(&NormalizedPath::new(&self.storage_root)) {
            Some(ConfigKey::ProjectsRoot)
        } else if forms.contains(&NormalizedPath::new(&self.view_root)) {
            Some(ConfigKey::DocsViewRoot)
        } else {
            None
        }
    }

    /// Fail with `ProtectedPath` if `path` is one of the roots.
    pub fn ensure_not_protected(&self, path: &Path) -> Result<()> {
        match self.protected_root(path) {
            Some(key) => Err(Error::ProtectedPath {
                key,
                path: path.to_path_buf(),
            }),
            None => Ok(()),
        }
    }

    /// `path` must be an existing directory other than the two roots.
    pub fn assert_valid_folder(&self, path: &Path) -> Result<()> {
        if !path.is_dir() {
            return Err(Error::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        self.ensure_not_protected(path)
    }

    /// Storage directory of `project`, after validating the name.
    ///
    /// The directory itself need not exist.
    pub fn source_for(&self, project: &str) -> Result<PathBuf> {
        let source = self.storage_root.join(project);
        self.ensure_not_protected(&source)?;
        if project.is_empty()
            || project == "."
            || project == ".."
            || project.contains(['/', '\\'])
        {
            return Err(Error::InvalidProjectName {
                name: project.to_string(),
            });
        }
        Ok(source)
    }

    /// Absolute path of a view-relative path.
    pub fn view_path(&self, relative: &NormalizedPath) -> PathBuf {
        if relative.is_empty() {
            self.view_root.clone()
        } else {
            self.view_root.join(relative.to_native())
        }
    }

    /// `path` relative to the view root, if it lies inside it.
    pub fn relative_to_view(&self, path: &Path) -> Option<NormalizedPath> {
        relative_to(path, &self.view_root)
    }

    /// `path` relative to the storage root, if it lies inside it.
    pub fn relative_to_storage(&self, path: &Path) -> Option<NormalizedPath> {
        relative_to(path, &self.storage_root)
    }
}

fn canonical_dir(path: &Path, key: ConfigKey) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(Error::InvalidRoot {
            key,
            path: path.to_path_buf(),
        });
    }
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// The lexical form of `path` plus, when it resolves, its canonical form.
///
/// Roots are stored canonicalized; paths coming from the user (cwd, CLI
/// arguments) may reach the same directory through a different spelling.
fn comparable_forms(path: &Path) -> Vec<NormalizedPath> {
    let mut forms = vec![NormalizedPath::new(dunce::simplified(path))];
    if let Ok(canonical) = dunce::canonicalize(path) {
        let canonical = NormalizedPath::new(canonical);
        if !forms.contains(&canonical) {
            forms.push(canonical);
        }
    }
    forms
}

fn relative_to(path: &Path, root: &Path) -> Option<NormalizedPath> {
    let root = NormalizedPath::new(root);
    let lexical = NormalizedPath::new(dunce::simplified(path));
    if let Some(rel) = lexical.strip_prefix(&root) {
        return Some(rel);
    }
    // Resolve the parent only, so a link inside the root keeps its own name
    let parent = path.parent()?;
    let name = path.file_name()?;
    let canonical = NormalizedPath::new(dunce::canonicalize(parent).ok()?.join(name));
    canonical.strip_prefix(&root)
}
