//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, empty and `.` segments are dropped and
/// `..` segments are resolved lexically. A leading `..` on a relative path is
/// dropped, so a relative path can never climb above its base. Conversion to
/// a platform-native path only happens at I/O boundaries.
///
/// The empty path is valid and denotes "the base itself" when used as a
/// relative path (for example the view root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self {
            inner: clean(&raw),
        }
    }

    /// The empty relative path.
    pub fn empty() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// True for the empty relative path.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True when the path carries a root (`/`, `//server`, or a drive letter).
    pub fn is_absolute(&self) -> bool {
        !split_root(&self.inner).0.is_empty()
    }

    /// Iterate the path segments, excluding any root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        split_root(&self.inner)
            .1
            .split('/')
            .filter(|s| !s.is_empty())
    }

    /// Join this path with a segment (or a relative path of several segments).
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    ///
    /// A single-segment relative path has the empty path as its parent; the
    /// empty path and bare roots have none.
    pub fn parent(&self) -> Option<Self> {
        let (root, rest) = split_root(&self.inner);
        if rest.is_empty() {
            return None;
        }
        let parent_rest = match rest.rfind('/') {
            Some(idx) => &rest[..idx],
            None => "",
        };
        Some(Self {
            inner: format!("{}{}", root, parent_rest),
        })
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Segment-wise prefix test: `work/alpha` starts with `work` but not with
    /// `wor`, and every path starts with the empty path.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        if split_root(&self.inner).0 != split_root(&base.inner).0 {
            return false;
        }
        let mut mine = self.segments();
        base.segments().all(|seg| mine.next() == Some(seg))
    }

    /// Express this path relative to `base`, if `base` is a segment-wise prefix.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<NormalizedPath> {
        if !self.starts_with(base) {
            return None;
        }
        let rest: Vec<&str> = self.segments().skip(base.segments().count()).collect();
        Some(Self {
            inner: rest.join("/"),
        })
    }

    /// Check if this path exists on the filesystem (following links).
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Split a cleaned or raw path into its root marker and the remainder.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with("//") && !path.starts_with("///") {
        return path.split_at(2);
    }
    if path.starts_with('/') {
        return path.split_at(1);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() >= 3 && bytes[2] == b'/' {
            return path.split_at(3);
        }
        return path.split_at(2);
    }
    ("", path)
}

fn clean(raw: &str) -> String {
    let (root, rest) = split_root(raw);
    let mut stack: Vec<&str> = Vec::new();
    for seg in rest.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    format!("{}{}", root, stack.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
