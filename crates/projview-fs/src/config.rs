//! Structured files: the projview config and the per-profile record
//!
//! The record is always JSON. The config is usually YAML, but the operator
//! may point `PROJVIEW_CONFIG` at a JSON or TOML file instead, so the format
//! follows the file extension.

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format of a structured file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Format implied by the extension of `path` (case-insensitive).
    pub fn of(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// JSON is pretty-printed with two-space indentation, matching records
    /// written by hand.
    fn encode<T: Serialize>(self, value: &T) -> std::result::Result<String, String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
        }
    }
}

/// Reads and writes structured files in the format their extension names.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Decode `content` as if it had been read from `path`.
    ///
    /// Callers that need to tell a missing file from a broken one read the
    /// file themselves and hand the text over here.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        let format = Format::of(path)?;
        format.decode(content).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: format.name(),
            message,
        })
    }

    /// Write `value` atomically, always ending the file with a newline.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = Format::of(path)?;
        let mut content = format.encode(value).map_err(|message| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.name(),
            message,
        })?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        io::write_atomic(path, content.as_bytes())
    }
}
