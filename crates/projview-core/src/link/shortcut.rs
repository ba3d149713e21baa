//! Indirection files standing in for links

use std::fs;
use std::path::Path;

use tracing::info;

use super::{LinkBackend, LinkMechanism};
use crate::{Error, Result};

/// File-name suffix of indirection files.
pub const SHORTCUT_SUFFIX: &str = ".lnk";

/// Writes `<project>.lnk` files whose single line is the absolute path of
/// the storage folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortcutBackend;

impl LinkBackend for ShortcutBackend {
    fn mechanism(&self) -> LinkMechanism {
        LinkMechanism::Shortcut
    }

    fn link_suffix(&self) -> &str {
        SHORTCUT_SUFFIX
    }

    fn create_link(&self, source: &Path, destination: &Path) -> Result<()> {
        info!(
            "Creating shortcut {} -> {}",
            destination.display(),
            source.display()
        );
        let target = dunce::simplified(source).to_string_lossy().into_owned();
        fs::write(destination, format!("{}\n", target)).map_err(|e| Error::io(destination, e))
    }
}
