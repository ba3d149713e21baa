//! Post-order walk of the view tree
//!
//! Children are always yielded before the directory that contains them, so
//! a sweep that deletes entries as it goes reaches every directory only
//! after it had the chance to empty it.
//!
//! Links are never entered; every real directory is.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use projview_fs::NormalizedPath;

use crate::{Error, Result};

/// What a view entry is, as far as reconciliation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Real directory
    Directory,
    /// Native link (symlink/junction) or indirection file carrying the suffix
    Link,
    /// Fifo, socket, device or anything else
    Other,
}

/// One entry discovered under the view root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the view root, as found on disk
    pub relative: NormalizedPath,
    pub kind: EntryKind,
    /// File name as found on disk
    pub name: String,
    /// Project name: the file name minus the link suffix for indirection files
    pub stem: String,
}

impl ViewEntry {
    pub fn is_link(&self) -> bool {
        self.kind == EntryKind::Link
    }

    /// View directory containing this entry, relative to the view root.
    pub fn parent_dir(&self) -> NormalizedPath {
        self.relative.parent().unwrap_or_else(NormalizedPath::empty)
    }
}

/// Walker over a view root.
///
/// Links are never followed and regular files without the link suffix are
/// ignored altogether. A junction counts as a link, so a link that looks like
/// a directory is never entered either.
#[derive(Debug, Clone)]
pub struct ViewTreeWalker {
    root: PathBuf,
    suffix: String,
}

impl ViewTreeWalker {
    pub fn new(root: impl Into<PathBuf>, suffix: &str) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.to_string(),
        }
    }

    /// Start a fresh walk. Each call restarts from the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            walker: self,
            stack: Vec::new(),
            started: false,
        }
    }

    fn list(&self, dir: &Path, relative: &NormalizedPath) -> Result<Vec<ViewEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

            let (kind, stem) = if file_type.is_symlink() {
                (EntryKind::Link, name.clone())
            } else if file_type.is_dir() {
                (EntryKind::Directory, name.clone())
            } else if file_type.is_file() {
                match self.strip_suffix(&name) {
                    Some(stem) => (EntryKind::Link, stem.to_string()),
                    None => {
                        trace!("Ignoring foreign file {}", path.display());
                        continue;
                    }
                }
            } else {
                (EntryKind::Other, name.clone())
            };

            entries.push(ViewEntry {
                relative: relative.join(&name),
                path,
                kind,
                name,
                stem,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn strip_suffix<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.suffix.is_empty() {
            return None;
        }
        name.strip_suffix(self.suffix.as_str())
            .filter(|stem| !stem.is_empty())
    }
}

struct Frame {
    entries: std::vec::IntoIter<ViewEntry>,
    /// Directory to yield once all of its entries are done (None for the root)
    dir: Option<ViewEntry>,
}

/// Lazy post-order iterator returned by [`ViewTreeWalker::walk`].
pub struct Walk<'w> {
    walker: &'w ViewTreeWalker,
    stack: Vec<Frame>,
    started: bool,
}

impl Iterator for Walk<'_> {
    type Item = Result<ViewEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            match self.walker.list(&self.walker.root, &NormalizedPath::empty()) {
                Ok(entries) => self.stack.push(Frame {
                    entries: entries.into_iter(),
                    dir: None,
                }),
                Err(e) => return Some(Err(e)),
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            match frame.entries.next() {
                Some(entry) if entry.kind == EntryKind::Directory => {
                    match self.walker.list(&entry.path, &entry.relative) {
                        Ok(children) => self.stack.push(Frame {
                            entries: children.into_iter(),
                            dir: Some(entry),
                        }),
                        Err(e) => return Some(Err(e)),
                    }
                }
                Some(entry) => return Some(Ok(entry)),
                None => {
                    let finished = self.stack.pop()?;
                    if let Some(dir) = finished.dir {
                        return Some(Ok(dir));
                    }
                }
            }
        }
    }
}
