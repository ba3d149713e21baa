//! Link mechanisms
//!
//! A link makes a storage project folder appear at a location in the view
//! tree. The engine only needs two things from a mechanism: creating a link
//! and the file-name suffix its links carry.

mod junction;
mod shortcut;

pub use junction::JunctionBackend;
pub use shortcut::{SHORTCUT_SUFFIX, ShortcutBackend};

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use projview_fs::NormalizedPath;

use crate::{Error, Result};

/// Capability for creating links from a storage folder into the view tree.
pub trait LinkBackend: Send + Sync {
    /// Which mechanism this backend implements.
    fn mechanism(&self) -> LinkMechanism;

    /// Suffix appended to the destination file name (empty for native links).
    fn link_suffix(&self) -> &str;

    /// Create a link at `destination` pointing to `source`.
    ///
    /// Callers guarantee that the parent of `destination` exists and that
    /// nothing occupies `destination` itself.
    fn create_link(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// Link mechanism selected in the config (`backend` key).
///
/// The config accepts the same spellings as [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LinkMechanism {
    /// Native directory link: a symlink on Unix, a junction on Windows
    #[default]
    Junction,
    /// `.lnk` indirection file holding the target path
    Shortcut,
}

impl LinkMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junction => "junction",
            Self::Shortcut => "shortcut",
        }
    }

    /// Instantiate the backend for this mechanism.
    pub fn backend(self) -> Box<dyn LinkBackend> {
        match self {
            Self::Junction => Box::new(JunctionBackend),
            Self::Shortcut => Box::new(ShortcutBackend),
        }
    }
}

impl FromStr for LinkMechanism {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "junction" | "link" | "symlink" => Ok(Self::Junction),
            "shortcut" | "lnk" => Ok(Self::Shortcut),
            _ => Err(Error::UnknownLinkMechanism {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LinkMechanism {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl std::fmt::Display for LinkMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// View-relative path of the link to `project` inside `view_dir`, as it
/// appears on disk.
///
/// `work` + `my.project` + `.lnk` gives `work/my.project.lnk`.
pub fn link_entry(view_dir: &NormalizedPath, project: &str, suffix: &str) -> NormalizedPath {
    view_dir.join(&format!("{project}{suffix}"))
}
