/// Files and folders as seen by a single run.
///
/// Nothing here is persisted: a `FolderTarget` lives only as long as the run
/// that discovered it.
use crate::error::{CoverError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A directory confirmed eligible for processing during one scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderTarget {
    path: PathBuf,
    depth: usize,
}

impl FolderTarget {
    pub fn new(path: PathBuf, depth: usize) -> Self {
        Self { path, depth }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distance from the scan root (the root itself is 0).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A regular file inside a folder, captured at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File name only (NOT the full path).
    pub name: String,
    pub path: PathBuf,
    /// Extension including the leading dot, e.g. `.png`. Empty if none.
    pub extension: String,
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    pub fn from_path(path: PathBuf, modified: Option<SystemTime>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self {
            name,
            path,
            extension,
            modified,
        }
    }
}

/// List the regular files directly inside `folder`, in enumeration order.
///
/// Symlinks to regular files are listed; symlinks to directories and dangling
/// links are not. Entries whose metadata cannot be read are kept with
/// `modified = None`.
pub fn list_files(folder: &Path) -> Result<Vec<FileInfo>> {
    let entries = fs::read_dir(folder).map_err(|source| CoverError::Access {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoverError::Access {
            path: folder.to_path_buf(),
            source,
        })?;
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        // Symlinks are judged (and dated) by their target.
        let metadata = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => Some(meta),
                _ => continue,
            }
        } else if file_type.is_file() {
            entry.metadata().ok()
        } else {
            continue;
        };
        let modified = metadata.and_then(|m| m.modified().ok());
        files.push(FileInfo::from_path(path, modified));
    }
    Ok(files)
}
