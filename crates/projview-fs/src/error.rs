//! Error types for projview-fs

use std::path::PathBuf;

/// Result type for projview-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in projview-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} file {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Failed to write {format} file {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Unsupported file format: {extension:?} (expected json, yaml, yml or toml)")]
    UnsupportedFormat { extension: String },

    #[error("Destination already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the file was simply not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
