//! Record file persistence

use tracing::{debug, warn};

use projview_fs::{ConfigStore, NormalizedPath};

use crate::Result;
use crate::layout::ViewLayout;
use crate::mapping::ProjectMapping;

/// Reads and writes the record file `<storage>/<profile>.json`.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: NormalizedPath,
    config: ConfigStore,
}

impl ProjectStore {
    pub fn new(layout: &ViewLayout) -> Self {
        Self::at(NormalizedPath::new(layout.record_path()))
    }

    /// Store backed by an arbitrary record path.
    pub fn at(path: NormalizedPath) -> Self {
        Self {
            path,
            config: ConfigStore::new(),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the record.
    ///
    /// A missing or unreadable record yields an empty mapping: the record can
    /// always be regenerated with a capture, so availability wins over strict
    /// validation here.
    pub fn load(&self) -> ProjectMapping {
        match self.config.load::<ProjectMapping>(&self.path) {
            Ok(mapping) => {
                debug!("Loaded {} projects from {}", mapping.len(), self.path);
                mapping
            }
            Err(e) if e.is_not_found() => {
                debug!("No record at {}, starting empty", self.path);
                ProjectMapping::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable record {}: {}", self.path, e);
                ProjectMapping::new()
            }
        }
    }

    /// Replace the record with `mapping`.
    pub fn save(&self, mapping: &ProjectMapping) -> Result<()> {
        self.config.save(&self.path, mapping)?;
        debug!("Saved {} projects to {}", mapping.len(), self.path);
        Ok(())
    }
}
