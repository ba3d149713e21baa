//! Core of projview
//!
//! Keeps a "view" directory tree of links in step with a "storage"
//! directory of project folders, driven by a record that maps each project
//! name to the view directories it should appear in.
//!
//! - **ProjectStore**: loads and saves the record (`<storage>/<profile>.json`)
//! - **LinkBackend**: creates links, either native junctions or `.lnk`
//!   indirection files
//! - **ViewTreeWalker**: lazy post-order walk of the view tree that never
//!   descends into project folders
//! - **ReconcileEngine**: mark-and-sweep that creates missing links and
//!   removes stale entries, pruning emptied directories
//! - **CaptureEngine**: derives a record from the links currently in the view
//! - **ViewManager**: command-level operations (load, save, link, link-to,
//!   convert, find)
//!
//! # Architecture
//!
//! ```text
//!                 projview-cli
//!                      |
//!                projview-core
//!                      |
//!                 projview-fs
//! ```

pub mod capture;
pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod link;
pub mod manager;
pub mod mapping;
pub mod store;
pub mod sync;
pub mod walker;

pub use capture::CaptureEngine;
pub use config::{ConfigFile, ConfigKey, Settings};
pub use convert::{ConvertReport, ConvertTarget, ConvertedProject};
pub use error::{Error, Result};
pub use layout::ViewLayout;
pub use link::{JunctionBackend, LinkBackend, LinkMechanism, ShortcutBackend};
pub use manager::ViewManager;
pub use mapping::ProjectMapping;
pub use store::ProjectStore;
pub use sync::{ReconcileEngine, SyncAction, SyncOptions, SyncReport, SyncWarning};
pub use walker::{EntryKind, ViewEntry, ViewTreeWalker};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_protected_path_names_the_root() {
        let error = Error::ProtectedPath {
            key: ConfigKey::ProjectsRoot,
            path: PathBuf::from("/data/projects"),
        };

        let display = format!("{}", error);
        assert!(display.contains("PROJECTS_ROOT"), "got: {}", display);
        assert!(display.contains("/data/projects"), "got: {}", display);
    }
}
