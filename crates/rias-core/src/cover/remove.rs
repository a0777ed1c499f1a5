/// Cover remover: deletes artifacts previously written by the applicator.
///
/// A folder counts as covered only when it holds a `desktop.ini`. The
/// descriptor is never parsed: with `remove_all_known_artifacts` and no
/// matching cover file, only the descriptor is deleted and an icon with a
/// different name stays behind.
use crate::error::{CoverError, Result};
use crate::model::file_info::list_files;
use crate::model::{FolderTarget, RemoveOutcome, RemovePolicy, DEFAULT_DESCRIPTOR_FILE_NAME};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn remove(folder: &FolderTarget, policy: &RemovePolicy) -> Result<RemoveOutcome> {
    let dir = folder.path();
    let files = list_files(dir)?;

    let Some(ini) = files.iter().find(|f| f.name == DEFAULT_DESCRIPTOR_FILE_NAME) else {
        return Ok(RemoveOutcome::NotCovered);
    };

    let covers: Vec<_> = files
        .iter()
        .filter(|f| f.name == policy.cover_file_name)
        .collect();

    if !covers.is_empty() {
        for cover in &covers {
            delete_file(&cover.path)?;
        }
        delete_file(&ini.path)?;
        debug!("Removed cover and descriptor from {}", dir.display());
        return Ok(RemoveOutcome::Removed {
            covers_deleted: covers.len(),
        });
    }

    if policy.remove_all_known_artifacts {
        delete_file(&ini.path)?;
        debug!("Removed orphaned descriptor from {}", dir.display());
        return Ok(RemoveOutcome::Removed { covers_deleted: 0 });
    }

    Ok(RemoveOutcome::NotCovered)
}

/// Delete a file, clearing a read-only flag first so Windows lets it go.
fn delete_file(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|err| CoverError::io(path, err))?;
    let mut perms = meta.permissions();
    if perms.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        fs::set_permissions(path, perms).map_err(|err| CoverError::io(path, err))?;
    }
    fs::remove_file(path).map_err(|err| CoverError::io(path, err))
}
