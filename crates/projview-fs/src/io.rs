//! Atomic writes and link-aware filesystem helpers

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// No lock is taken: concurrent writers race and the last rename wins.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Whether anything occupies `path`, without following links.
///
/// Unlike [`Path::exists`], a dangling link counts as present.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Whether `path` is a symbolic link or a directory junction.
pub fn is_link(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Remove a link (symbolic link, junction or plain file) without touching
/// whatever it points to.
pub fn remove_link(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        // Directory symlinks and junctions on Windows are removed as directories
        #[cfg(windows)]
        Err(_) if is_link(path) => fs::remove_dir(path).map_err(|e| Error::io(path, e)),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Whether `path` is a directory with no entries at all.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    Ok(entries.next().is_none())
}

/// Move a directory to `dest`, which must not exist yet.
///
/// Tries a rename first; when that fails (typically across filesystems or
/// drives) the tree is copied and the original removed.
pub fn move_dir(src: &Path, dest: &Path) -> Result<()> {
    if entry_exists(dest) {
        return Err(Error::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                "rename {} -> {} failed ({}), copying instead",
                src.display(),
                dest.display(),
                rename_err
            );
            copy_tree(src, dest)?;
            fs::remove_dir_all(src).map_err(|e| Error::io(src, e))
        }
    }
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| Error::io(&from, e))?;

        if file_type.is_symlink() {
            copy_link(&from, &to)?;
        } else if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(from: &Path, to: &Path) -> Result<()> {
    let target = fs::read_link(from).map_err(|e| Error::io(from, e))?;
    std::os::unix::fs::symlink(&target, to).map_err(|e| Error::io(to, e))
}

#[cfg(not(unix))]
fn copy_link(from: &Path, to: &Path) -> Result<()> {
    // Recreating junctions needs the link backend; copy the contents instead
    if from.is_dir() {
        copy_tree(from, to)
    } else {
        fs::copy(from, to).map(|_| ()).map_err(|e| Error::io(from, e))
    }
}
