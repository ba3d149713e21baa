//! ReconcileEngine implementation
//!
//! Mark and sweep over the view tree. The mark phase resolves every link the
//! record asks for into the path it occupies on disk; the sweep walks the view
//! bottom-up and deletes everything unmarked, so directories that lose their
//! last entry are pruned in the same pass. Missing links are created last,
//! once stale links that could stand in their way are gone.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use projview_fs::{NormalizedPath, io};

use crate::layout::ViewLayout;
use crate::link::{LinkBackend, link_entry};
use crate::mapping::ProjectMapping;
use crate::walker::{EntryKind, ViewTreeWalker};
use crate::{Error, Result};

use super::report::{SyncAction, SyncOptions, SyncReport, SyncWarning};

/// Makes the view tree match a [`ProjectMapping`].
///
/// Applying the same mapping twice is a no-op the second time: link creation
/// is existence-checked and the stale set is recomputed from scratch on
/// every pass.
pub struct ReconcileEngine<'a> {
    layout: &'a ViewLayout,
    backend: &'a dyn LinkBackend,
}

/// A wanted link, resolved against the layout.
struct Target<'m> {
    project: &'m str,
    source: PathBuf,
    view_dir: NormalizedPath,
    /// Destination as the record describes it, without the suffix
    logical: NormalizedPath,
    /// Destination as it appears on disk
    entry: NormalizedPath,
    /// Wanted native link this one would end up inside
    nested: Option<NormalizedPath>,
}

impl<'a> ReconcileEngine<'a> {
    pub fn new(layout: &'a ViewLayout, backend: &'a dyn LinkBackend) -> Self {
        Self { layout, backend }
    }

    /// Reconcile the view tree with `desired`.
    ///
    /// # Errors
    ///
    /// Fails on a protected root or invalid project name in the mapping, on
    /// an unclassifiable entry in the view tree and on I/O errors. Missing
    /// sources and non-empty stale directories are reported as warnings.
    pub fn apply(&self, desired: &ProjectMapping, options: &SyncOptions) -> Result<SyncReport> {
        let mut report = SyncReport::new(options);
        let targets = self.mark(desired, &mut report)?;
        let kept: BTreeSet<NormalizedPath> = targets
            .iter()
            .filter(|t| t.nested.is_none())
            .map(|t| t.entry.clone())
            .collect();
        let removed = self.sweep(&kept, options, &mut report)?;
        self.create(&targets, &removed, options, &mut report)?;

        info!(
            "Reconciled view: {} created, {} removed, {} warnings{}",
            report.created(),
            report.removed(),
            report.warnings.len(),
            if options.dry_run { " (dry run)" } else { "" }
        );
        Ok(report)
    }

    /// Validate every pair and resolve it to its destination.
    ///
    /// A native link is a directory to everything beneath it, so a target
    /// below another wanted native link is marked as nested. Wanted links
    /// count whether or not they exist yet: the outcome depends on the
    /// mapping alone, not on what an earlier pass left behind.
    fn mark<'m>(
        &self,
        desired: &'m ProjectMapping,
        report: &mut SyncReport,
    ) -> Result<Vec<Target<'m>>> {
        let suffix = self.backend.link_suffix();
        let mut targets = Vec::new();
        let mut seen: HashSet<NormalizedPath> = HashSet::new();

        for (project, view_dir) in desired.pairs() {
            let source = self.layout.source_for(project)?;
            let view_dir = NormalizedPath::new(view_dir);
            if view_dir.is_absolute() {
                debug!("Skipping {}: {} is not relative to the view", project, view_dir);
                report.warnings.push(SyncWarning::OutsideView {
                    project: project.to_string(),
                    view_dir,
                });
                continue;
            }

            let logical = view_dir.join(project);
            let entry = link_entry(&view_dir, project, suffix);
            if !seen.insert(entry.clone()) {
                debug!("Link {} listed more than once", logical);
                continue;
            }
            targets.push(Target {
                project,
                source,
                view_dir,
                logical,
                entry,
                nested: None,
            });
        }

        if suffix.is_empty() {
            let linked: BTreeSet<NormalizedPath> = targets
                .iter()
                .filter(|t| t.source.is_dir())
                .map(|t| t.logical.clone())
                .collect();
            for target in &mut targets {
                target.nested = ancestors(&target.view_dir).find(|dir| linked.contains(dir));
            }
        }

        Ok(targets)
    }

    /// Remove every entry not covered by `kept`, leaves first.
    ///
    /// Returns the absolute paths removed (or, in a dry run, that would be).
    fn sweep(
        &self,
        kept: &BTreeSet<NormalizedPath>,
        options: &SyncOptions,
        report: &mut SyncReport,
    ) -> Result<HashSet<PathBuf>> {
        let walker = ViewTreeWalker::new(self.layout.view_root(), self.backend.link_suffix());
        let mut removed: HashSet<PathBuf> = HashSet::new();

        for entry in walker.walk() {
            let entry = entry?;
            if is_kept(kept, &entry.relative, entry.kind) {
                debug!("Keeping {}", entry.relative);
                continue;
            }

            match entry.kind {
                EntryKind::Link => {
                    info!("Deleting {}", entry.relative);
                    if !options.dry_run {
                        io::remove_link(&entry.path)?;
                    }
                    removed.insert(entry.path);
                    report.actions.push(SyncAction::RemovedLink {
                        path: entry.relative,
                    });
                }
                EntryKind::Directory => {
                    let empty = if options.dry_run {
                        empty_after_removals(&entry.path, &removed)?
                    } else {
                        io::is_empty_dir(&entry.path)?
                    };

                    if !empty {
                        if kept.contains(&entry.relative) {
                            // Reported as Occupied once links are created
                            debug!("Directory \"{}\" sits on a link destination", entry.relative);
                        } else {
                            debug!("Directory \"{}\" is not empty", entry.relative);
                            report.warnings.push(SyncWarning::NonEmptyDirectory {
                                path: entry.relative,
                            });
                        }
                        continue;
                    }

                    info!("Deleting empty directory {}", entry.relative);
                    if !options.dry_run {
                        fs::remove_dir(&entry.path).map_err(|e| Error::io(&entry.path, e))?;
                    }
                    removed.insert(entry.path);
                    report.actions.push(SyncAction::PrunedDirectory {
                        path: entry.relative,
                    });
                }
                EntryKind::Other => {
                    return Err(Error::UnclassifiableEntry { path: entry.path });
                }
            }
        }

        Ok(removed)
    }

    /// Create the links that are still missing after the sweep.
    fn create(
        &self,
        targets: &[Target<'_>],
        removed: &HashSet<PathBuf>,
        options: &SyncOptions,
        report: &mut SyncReport,
    ) -> Result<()> {
        for target in targets {
            let project = target.project;
            if !target.source.is_dir() {
                debug!("Skipping {}: no folder at {}", project, target.source.display());
                report.warnings.push(SyncWarning::MissingSource {
                    project: project.to_string(),
                    source: target.source.clone(),
                });
                continue;
            }

            let nested = target
                .nested
                .clone()
                .or_else(|| self.link_on_the_way(&target.view_dir, removed));
            if let Some(link) = nested {
                debug!("Skipping {}: {} is a link", target.logical, link);
                report.warnings.push(SyncWarning::NestedInLink {
                    project: project.to_string(),
                    destination: target.logical.clone(),
                    link,
                });
                continue;
            }

            let destination = self.layout.view_path(&target.entry);
            if io::entry_exists(&destination) && !removed.contains(&destination) {
                if !self.is_link_entry(&destination) {
                    debug!("{} exists and is not a link", destination.display());
                    report.warnings.push(SyncWarning::Occupied {
                        path: target.logical.clone(),
                    });
                } else {
                    debug!("Link {} already present", target.logical);
                }
                continue;
            }

            if !options.dry_run {
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
                }
                self.backend.create_link(&target.source, &destination)?;
            }
            report.actions.push(SyncAction::CreatedLink {
                project: project.to_string(),
                destination: target.logical.clone(),
            });
        }

        Ok(())
    }

    /// First link left on disk on the way down to `view_dir`.
    fn link_on_the_way(
        &self,
        view_dir: &NormalizedPath,
        removed: &HashSet<PathBuf>,
    ) -> Option<NormalizedPath> {
        ancestors(view_dir).find(|dir| {
            let path = self.layout.view_path(dir);
            io::is_link(&path) && !removed.contains(&path)
        })
    }

    fn is_link_entry(&self, path: &Path) -> bool {
        io::is_link(path) || (!self.backend.link_suffix().is_empty() && path.is_file())
    }
}

/// Whether the entry at `relative` is justified by the wanted destinations.
///
/// Compared by whole segments on the on-disk path. A link must sit exactly on
/// a destination; a directory only on the way to one. A directory standing
/// on a destination is not kept: it goes if it is empty, so the link can
/// take its place.
fn is_kept(kept: &BTreeSet<NormalizedPath>, relative: &NormalizedPath, kind: EntryKind) -> bool {
    match kind {
        EntryKind::Link => kept.contains(relative),
        EntryKind::Directory => kept
            .iter()
            .any(|path| path != relative && path.starts_with(relative)),
        EntryKind::Other => false,
    }
}

/// `a`, `a/b`, `a/b/c` for `a/b/c`, top-down.
fn ancestors(path: &NormalizedPath) -> impl Iterator<Item = NormalizedPath> + '_ {
    path.segments().scan(NormalizedPath::empty(), |current, segment| {
        *current = current.join(segment);
        Some(current.clone())
    })
}

fn empty_after_removals(dir: &Path, removed: &HashSet<PathBuf>) -> Result<bool> {
    for child in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let child = child.map_err(|e| Error::io(dir, e))?;
        if !removed.contains(&child.path()) {
            return Ok(false);
        }
    }
    Ok(true)
}
