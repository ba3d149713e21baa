//! [`TestWorkspace`] builder for projview test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a `storage/` and a `view/` root, with
/// helpers for arranging and inspecting both.
///
/// # Example
///
/// ```rust,no_run
/// use projview_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.add_project("alpha");
/// ws.write_record("projects", r#"{"alpha": ["work"]}"#);
/// ws.assert_view_missing("work/alpha");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create the temporary directory with empty `storage/` and `view/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("storage")).unwrap();
        fs::create_dir(temp_dir.path().join("view")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn storage(&self) -> PathBuf {
        self.root().join("storage")
    }

    pub fn view(&self) -> PathBuf {
        self.root().join("view")
    }

    /// Create `storage/<name>` with a marker file inside.
    pub fn add_project(&self, name: &str) -> PathBuf {
        let dir = self.storage().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("README.md"), format!("# {name}\n")).unwrap();
        dir
    }

    /// Create a plain directory inside the view.
    pub fn mkdir_view(&self, relative: &str) -> PathBuf {
        let dir = self.view().join(relative);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a regular file inside the view, creating parents.
    pub fn write_view_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.view().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Symlink `view/<view_dir>/<project>` to `storage/<project>`.
    #[cfg(unix)]
    pub fn link_native(&self, project: &str, view_dir: &str) -> PathBuf {
        let dir = self.mkdir_view(view_dir);
        let link = dir.join(project);
        std::os::unix::fs::symlink(self.storage().join(project), &link).unwrap_or_else(|e| {
            panic!("link_native: failed to link {}: {e}", link.display())
        });
        link
    }

    /// Write the indirection file `view/<view_dir>/<project>.lnk`.
    pub fn link_shortcut(&self, project: &str, view_dir: &str) -> PathBuf {
        let dir = self.mkdir_view(view_dir);
        let link = dir.join(format!("{project}.lnk"));
        let target = self.storage().join(project);
        fs::write(&link, format!("{}\n", target.display())).unwrap();
        link
    }

    pub fn record_path(&self, profile: &str) -> PathBuf {
        self.storage().join(format!("{profile}.json"))
    }

    /// Write raw record content for `profile`.
    pub fn write_record(&self, profile: &str, content: &str) {
        fs::write(self.record_path(profile), content).unwrap();
    }

    /// Parse the record of `profile`.
    ///
    /// # Panics
    /// Panics if the record is missing or not valid JSON.
    pub fn read_record(&self, profile: &str) -> serde_json::Value {
        let path = self.record_path(profile);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read_record: cannot read {}: {e}", path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("read_record: invalid JSON in {}: {e}", path.display()))
    }

    /// Write a YAML config pointing at this workspace and return its path.
    pub fn write_config(&self, backend: &str) -> PathBuf {
        let path = self.root().join("projview.yaml");
        let content = format!(
            "profile: projects\nPROJECTS_ROOT: {}\nDOCS_VIEW_ROOT: {}\nbackend: {}\n",
            self.storage().display(),
            self.view().display(),
            backend
        );
        fs::write(&path, content).unwrap();
        path
    }

    /// Every entry under the view, sorted, without following links.
    ///
    /// Directories end in `/`, symlinks in `@`, regular files are bare.
    pub fn view_snapshot(&self) -> Vec<String> {
        let mut entries = Vec::new();
        collect(&self.view(), "", &mut entries);
        entries.sort();
        entries
    }

    /// Assert that `relative` in the view is a symlink or a `.lnk` file.
    ///
    /// # Panics
    /// Panics with a descriptive message if it is neither.
    pub fn assert_view_link(&self, relative: &str) {
        let path = self.view().join(relative);
        let shortcut = self.view().join(format!("{relative}.lnk"));
        let is_symlink = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        assert!(
            is_symlink || shortcut.is_file(),
            "Expected a link at {}; view holds {:?}",
            path.display(),
            self.view_snapshot()
        );
    }

    /// Assert that nothing, link or otherwise, sits at `relative`.
    ///
    /// # Panics
    /// Panics with a descriptive message if the entry exists.
    pub fn assert_view_missing(&self, relative: &str) {
        let path = self.view().join(relative);
        let shortcut = self.view().join(format!("{relative}.lnk"));
        assert!(
            fs::symlink_metadata(&path).is_err() && !shortcut.exists(),
            "Expected nothing at {}; view holds {:?}",
            path.display(),
            self.view_snapshot()
        );
    }
}

fn collect(dir: &Path, prefix: &str, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let name = format!("{prefix}{}", entry.file_name().to_string_lossy());
        let file_type = entry.file_type().unwrap();
        if file_type.is_symlink() {
            out.push(format!("{name}@"));
        } else if file_type.is_dir() {
            out.push(format!("{name}/"));
            collect(&entry.path(), &format!("{name}/"), out);
        } else {
            out.push(name);
        }
    }
}
