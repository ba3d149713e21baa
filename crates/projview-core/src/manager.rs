//! Command-level operations on a view

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use projview_fs::NormalizedPath;

use crate::capture::CaptureEngine;
use crate::config::Settings;
use crate::layout::ViewLayout;
use crate::link::{LinkBackend, LinkMechanism};
use crate::mapping::ProjectMapping;
use crate::store::ProjectStore;
use crate::sync::{ReconcileEngine, SyncOptions, SyncReport};
use crate::walker::ViewTreeWalker;
use crate::{Error, Result};

/// Ties a layout, a link backend and the record together.
///
/// Every mutation of the record goes through [`ViewManager::append`], which
/// saves and immediately reconciles, so the view is re-synced after each
/// change.
pub struct ViewManager {
    layout: ViewLayout,
    backend: Box<dyn LinkBackend>,
    store: ProjectStore,
}

impl ViewManager {
    pub fn new(layout: ViewLayout, backend: Box<dyn LinkBackend>) -> Self {
        let store = ProjectStore::new(&layout);
        Self {
            layout,
            backend,
            store,
        }
    }

    /// Manager for a layout using one of the built-in mechanisms.
    pub fn with_mechanism(layout: ViewLayout, mechanism: LinkMechanism) -> Self {
        Self::new(layout, mechanism.backend())
    }

    /// Validate settings and build a manager from them.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::with_mechanism(settings.layout()?, settings.backend))
    }

    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    pub fn backend(&self) -> &dyn LinkBackend {
        self.backend.as_ref()
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Current record, empty when missing or unreadable.
    pub fn load_mapping(&self) -> ProjectMapping {
        self.store.load()
    }

    /// Reconcile the view against an explicit mapping.
    pub fn apply(&self, mapping: &ProjectMapping, options: &SyncOptions) -> Result<SyncReport> {
        ReconcileEngine::new(&self.layout, self.backend.as_ref()).apply(mapping, options)
    }

    /// Reconcile the view against the record.
    pub fn reconcile(&self, options: &SyncOptions) -> Result<SyncReport> {
        let mapping = self.load_mapping();
        self.apply(&mapping, options)
    }

    /// Mapping derived from the links currently in the view.
    pub fn capture(&self) -> Result<ProjectMapping> {
        CaptureEngine::new(&self.layout, self.backend.link_suffix()).capture()
    }

    /// Capture the view into the record. Does not reconcile.
    pub fn save(&self) -> Result<ProjectMapping> {
        let mapping = self.capture()?;
        self.store.save(&mapping)?;
        info!(
            "Saved {} projects to {}",
            mapping.len(),
            self.store.path()
        );
        Ok(mapping)
    }

    /// Add `view_dir` to `project`'s list, save and reconcile.
    ///
    /// The project name is validated before the record is touched.
    pub fn append(&self, project: &str, view_dir: &str) -> Result<SyncReport> {
        self.append_all([(project, view_dir)])
    }

    /// Add every `(project, view_dir)` pair, then save and reconcile once.
    pub fn append_all<'p>(
        &self,
        pairs: impl IntoIterator<Item = (&'p str, &'p str)>,
    ) -> Result<SyncReport> {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        for (project, _) in &pairs {
            self.layout.source_for(project)?;
        }

        let mut mapping = self.load_mapping();
        for (project, view_dir) in pairs {
            mapping.append(project, view_dir);
            debug!("Appended {:?} to {}", view_dir, project);
        }
        self.store.save(&mapping)?;

        self.reconcile(&SyncOptions::default())
    }

    /// Link `project` into the view directory `cwd`.
    pub fn link(&self, cwd: &Path, project: &str) -> Result<SyncReport> {
        let view_dir = self
            .layout
            .relative_to_view(cwd)
            .ok_or_else(|| Error::NotInView {
                path: cwd.to_path_buf(),
            })?;
        self.append(project, view_dir.as_str())
    }

    /// Link the project named after `cwd` into `target`.
    ///
    /// `target` is either relative to the view root or an absolute path
    /// inside it.
    pub fn link_to(&self, cwd: &Path, target: &str) -> Result<SyncReport> {
        self.layout.assert_valid_folder(cwd)?;
        let project = project_name(cwd)?;

        let target_path = Path::new(target);
        let view_dir = if target_path.is_absolute() {
            self.layout
                .relative_to_view(target_path)
                .ok_or_else(|| Error::NotInView {
                    path: target_path.to_path_buf(),
                })?
        } else {
            NormalizedPath::new(target)
        };
        self.append(&project, view_dir.as_str())
    }

    /// Names of the project folders in storage, sorted.
    pub fn storage_projects(&self) -> Result<Vec<String>> {
        let root = self.layout.storage_root();
        let mut names = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| Error::io(root, e))? {
            let entry = entry.map_err(|e| Error::io(root, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Every place `project` appears in the view, as link or directory.
    pub fn find(&self, project: &str) -> Result<Vec<NormalizedPath>> {
        let walker = ViewTreeWalker::new(self.layout.view_root(), self.backend.link_suffix());
        let mut found = Vec::new();
        for entry in walker.walk() {
            let entry = entry?;
            if entry.stem == project {
                found.push(entry.relative);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Storage folder of `project`.
    pub fn source_for(&self, project: &str) -> Result<PathBuf> {
        self.layout.source_for(project)
    }
}

/// Final path segment of `path`, as a project name.
pub(crate) fn project_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::NotADirectory {
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> ViewManager {
        let storage = temp.path().join("storage");
        let view = temp.path().join("view");
        fs::create_dir_all(&storage).unwrap();
        fs::create_dir_all(&view).unwrap();
        let layout = ViewLayout::new(&storage, &view, "projects").unwrap();
        ViewManager::with_mechanism(layout, LinkMechanism::Shortcut)
    }

    #[test]
    fn append_rejects_bad_name_before_saving() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        let result = manager.append("a/b", "work");
        assert!(matches!(result, Err(Error::InvalidProjectName { .. })));
        assert!(!manager.store().path().exists());
    }

    #[test]
    fn link_outside_view_fails() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        let result = manager.link(temp.path(), "alpha");
        assert!(matches!(result, Err(Error::NotInView { .. })));
    }

    #[test]
    fn storage_projects_lists_only_directories() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        let storage = manager.layout().storage_root().to_path_buf();
        fs::create_dir(storage.join("beta")).unwrap();
        fs::create_dir(storage.join("alpha")).unwrap();
        fs::write(storage.join("projects.json"), "{}").unwrap();

        assert_eq!(manager.storage_projects().unwrap(), ["alpha", "beta"]);
    }
}
