//! Derive a record from the links present in the view tree

use tracing::debug;

use crate::Result;
use crate::layout::ViewLayout;
use crate::mapping::ProjectMapping;
use crate::walker::ViewTreeWalker;

/// Freezes the current arrangement of the view into a [`ProjectMapping`].
///
/// Only links are captured. Plain directories, even when named like a
/// project, are left for the operator to reclassify.
pub struct CaptureEngine<'a> {
    layout: &'a ViewLayout,
    suffix: &'a str,
}

impl<'a> CaptureEngine<'a> {
    pub fn new(layout: &'a ViewLayout, suffix: &'a str) -> Self {
        Self { layout, suffix }
    }

    /// Walk the view and map every link's stem to its parent directory.
    ///
    /// Directory lists come out sorted and de-duplicated so the result does
    /// not depend on walk order.
    pub fn capture(&self) -> Result<ProjectMapping> {
        let walker = ViewTreeWalker::new(self.layout.view_root(), self.suffix);
        let mut mapping = ProjectMapping::new();

        for entry in walker.walk() {
            let entry = entry?;
            if !entry.is_link() {
                continue;
            }
            let parent = entry.parent_dir();
            debug!("Captured {} in {:?}", entry.stem, parent.as_str());
            mapping.append(entry.stem, parent.as_str());
        }

        mapping.normalize();
        Ok(mapping)
    }
}
