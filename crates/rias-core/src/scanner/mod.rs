/// Scanner module: collects the folders a run will process.
///
/// The walk is a serial, name-sorted `jwalk` traversal that finishes before
/// any folder work starts so the coordinator knows the total up front.
///
/// A folder is **eligible** when it holds at least one file and either has
/// no subfolders or `include_parent_folders` is set. Folders deeper than
/// `max_depth` are neither collected nor listed, and folders that cannot be
/// listed are skipped without aborting the scan.
pub mod progress;

use crate::error::{CoverError, Result};
use crate::model::{FolderTarget, ScanOptions};
use jwalk::{DirEntry, Parallelism, WalkDir};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Everything a completed scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Eligible folders. Order follows the walk but is not a contract.
    pub targets: Vec<FolderTarget>,
    /// Number of directories that could not be listed.
    pub access_errors: u64,
    pub duration: Duration,
}

/// What one listed directory contains.
#[derive(Debug, Default, Clone, Copy)]
struct Listing {
    subdirs: usize,
    files: usize,
}

/// Scan `options.root_path` and return every eligible folder.
///
/// Fails only when the root itself is missing or not a directory.
pub fn scan(options: &ScanOptions) -> Result<ScanResult> {
    let root = &options.root_path;
    if !root.is_dir() {
        return Err(CoverError::RootNotFound { path: root.clone() });
    }

    let start = Instant::now();
    let mut result = ScanResult::default();

    // Children of the deepest listed folders are needed for their counts,
    // so the walk goes one level further than the deepest target.
    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .max_depth(options.max_depth.saturating_add(1))
        .parallelism(Parallelism::Serial);

    // Folders in walk order, and what each of them holds.
    let mut folders: Vec<(PathBuf, usize)> = Vec::new();
    let mut listings: HashMap<PathBuf, Listing> = HashMap::new();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                debug!("Skipping unreadable entry: {err}");
                result.access_errors += 1;
                continue;
            }
        };

        let depth = entry.depth();
        let path = entry.path();
        if let Some(err) = &entry.read_children_error {
            debug!("Skipping subtree: {err}");
            result.access_errors += 1;
        }

        if let Some(parent) = path.parent().filter(|_| depth > 0) {
            let listing = listings.entry(parent.to_path_buf()).or_default();
            match classify(&entry) {
                Kind::Dir => listing.subdirs += 1,
                Kind::File => listing.files += 1,
                Kind::Other => {}
            }
        }

        if depth <= options.max_depth && entry.file_type().is_dir() {
            folders.push((path, depth));
        }
    }

    for (path, depth) in folders {
        let listing = listings.get(&path).copied().unwrap_or_default();
        if listing.files == 0 {
            continue;
        }
        if listing.subdirs == 0 {
            trace!("Adding leaf folder {}", path.display());
        } else if options.include_parent_folders {
            trace!("Adding parent folder {}", path.display());
        } else {
            continue;
        }
        result.targets.push(FolderTarget::new(path, depth));
    }
    result.duration = start.elapsed();

    info!(
        "Collected {} folders under {} ({} unreadable)",
        result.targets.len(),
        root.display(),
        result.access_errors
    );
    debug!("Collect phase took {:?}", result.duration);
    Ok(result)
}

enum Kind {
    Dir,
    File,
    Other,
}

/// Directory symlinks are never descended into and do not count as
/// subfolders; symlinks to regular files count as files.
fn classify(entry: &DirEntry<((), ())>) -> Kind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        Kind::Dir
    } else if file_type.is_file() {
        Kind::File
    } else if file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
        Kind::File
    } else {
        Kind::Other
    }
}
