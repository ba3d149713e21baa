//! Filesystem layer for projview
//!
//! Provides normalized path handling, atomic writes, link-aware helpers
//! and format-agnostic configuration files.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::NormalizedPath;
