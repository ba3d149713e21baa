//! Move folders into storage and link them back where they were
//!
//! This is the only operation that changes the storage tree. Once a folder
//! has been moved, a failure to link it leaves it in storage but unlinked,
//! reported as [`Error::ConvertIncomplete`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use projview_fs::{NormalizedPath, io};

use crate::manager::{ViewManager, project_name};
use crate::sync::SyncReport;
use crate::{Error, Result};

/// What `convert` should operate on, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertTarget {
    /// Every subdirectory of the working directory (`*`)
    All,
    /// One subdirectory of the working directory
    Named(String),
}

impl From<&str> for ConvertTarget {
    fn from(value: &str) -> Self {
        if value == "*" {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

/// One converted folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedProject {
    pub project: String,
    /// View directory the project was linked into
    pub view_dir: NormalizedPath,
    /// False when the folder already sat directly in the storage root
    pub moved: bool,
}

/// Result of a `convert` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub converted: Vec<ConvertedProject>,
    /// The single reconciliation run once every folder was moved
    pub sync: SyncReport,
    /// Folder left behind by `*` that the operator must delete by hand
    pub leftover: Option<PathBuf>,
}

/// A candidate that passed validation, not moved yet.
struct Planned {
    path: PathBuf,
    destination: PathBuf,
    converted: ConvertedProject,
}

impl ViewManager {
    /// Move `target` (inside `cwd`) into storage and link it back.
    ///
    /// Every candidate is validated before the first move and every move
    /// happens before the view is reconciled, so folders still waiting to
    /// move are never touched by the reconciliation.
    ///
    /// # Errors
    ///
    /// - `NotADirectory` / `ProtectedPath` if a candidate is invalid
    /// - `OutsideRoots` if a candidate is under neither root
    /// - `ProjectExists` if storage already holds a folder of that name
    /// - `ConvertIncomplete` if linking fails after a move
    pub fn convert(&self, cwd: &Path, target: &ConvertTarget) -> Result<ConvertReport> {
        let base = match target {
            ConvertTarget::All => cwd.to_path_buf(),
            ConvertTarget::Named(name) => cwd.join(name),
        };
        self.layout().assert_valid_folder(&base)?;

        let candidates = match target {
            ConvertTarget::All => subdirectories(&base)?,
            ConvertTarget::Named(_) if io::is_link(&base) => {
                return Err(Error::NotADirectory { path: base });
            }
            ConvertTarget::Named(_) => vec![base.clone()],
        };

        let planned = candidates
            .iter()
            .map(|candidate| self.plan(candidate))
            .collect::<Result<Vec<_>>>()?;

        let mut converted = Vec::with_capacity(planned.len());
        let mut failure = None;
        for plan in planned {
            if plan.converted.moved {
                info!(
                    "Moving {} to {}",
                    plan.path.display(),
                    plan.destination.display()
                );
                if let Err(e) = io::move_dir(&plan.path, &plan.destination) {
                    failure = Some(match e {
                        projview_fs::Error::AlreadyExists { path } => Error::ProjectExists {
                            project: plan.converted.project,
                            path,
                        },
                        other => Error::Fs(other),
                    });
                    break;
                }
            }
            converted.push(plan.converted);
        }

        if !converted.iter().any(|c| c.moved) {
            if let Some(e) = failure {
                return Err(e);
            }
        }

        // Whatever was moved gets linked, even when a later move failed
        let sync = if converted.is_empty() {
            SyncReport::default()
        } else {
            self.append_all(
                converted
                    .iter()
                    .map(|c| (c.project.as_str(), c.view_dir.as_str())),
            )
            .map_err(|source| {
                let projects: Vec<String> = converted
                    .iter()
                    .filter(|c| c.moved)
                    .map(|c| c.project.clone())
                    .collect();
                if projects.is_empty() {
                    source
                } else {
                    Error::ConvertIncomplete {
                        projects,
                        source: Box::new(source),
                    }
                }
            })?
        };
        if let Some(e) = failure {
            return Err(e);
        }

        let leftover = (*target == ConvertTarget::All).then(|| {
            info!("Must manually delete {}", base.display());
            base
        });
        Ok(ConvertReport {
            converted,
            sync,
            leftover,
        })
    }

    fn plan(&self, path: &Path) -> Result<Planned> {
        let layout = self.layout();
        layout.assert_valid_folder(path)?;
        let project = project_name(path)?;

        let relative = layout
            .relative_to_storage(path)
            .or_else(|| layout.relative_to_view(path))
            .ok_or_else(|| Error::OutsideRoots {
                path: path.to_path_buf(),
            })?;
        let view_dir = relative.parent().unwrap_or_else(NormalizedPath::empty);

        let destination = layout.source_for(&project)?;
        let moved = layout.relative_to_storage(path) != Some(NormalizedPath::new(&project));
        if moved && io::entry_exists(&destination) {
            return Err(Error::ProjectExists {
                project,
                path: destination,
            });
        }

        Ok(Planned {
            path: path.to_path_buf(),
            destination,
            converted: ConvertedProject {
                project,
                view_dir,
                moved,
            },
        })
    }
}

/// Real subdirectories of `dir`, sorted by name. Links are skipped.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}
