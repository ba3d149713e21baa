//! Native directory links

use std::path::Path;

use tracing::info;

use super::{LinkBackend, LinkMechanism};
use crate::{Error, Result};

/// Creates native directory links: symbolic links on Unix, directory
/// junctions on Windows (no elevated privileges needed).
#[derive(Debug, Default, Clone, Copy)]
pub struct JunctionBackend;

impl LinkBackend for JunctionBackend {
    fn mechanism(&self) -> LinkMechanism {
        LinkMechanism::Junction
    }

    fn link_suffix(&self) -> &str {
        ""
    }

    fn create_link(&self, source: &Path, destination: &Path) -> Result<()> {
        info!("Linking {} -> {}", destination.display(), source.display());
        create_native_link(source, destination)
    }
}

#[cfg(unix)]
fn create_native_link(source: &Path, destination: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, destination).map_err(|e| Error::io(destination, e))
}

#[cfg(windows)]
fn create_native_link(source: &Path, destination: &Path) -> Result<()> {
    let output = std::process::Command::new("cmd")
        .args(["/c", "mklink", "/J"])
        .arg(destination)
        .arg(source)
        .output()
        .map_err(|e| Error::io(destination, e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(Error::LinkFailed {
            destination: destination.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(not(any(unix, windows)))]
fn create_native_link(_source: &Path, destination: &Path) -> Result<()> {
    Err(Error::LinkFailed {
        destination: destination.to_path_buf(),
        message: "native directory links are not supported on this platform".to_string(),
    })
}
