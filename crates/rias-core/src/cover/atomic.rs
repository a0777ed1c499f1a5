/// Atomic file replacement: write to a scratch file, then rename over the
/// destination so readers never see a half-written file.
///
/// The scratch file lives in the destination's own folder, which keeps the
/// rename on one volume. If anything fails before the rename, dropping the
/// `NamedTempFile` deletes the scratch file.
use crate::error::{CoverError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

pub fn write_atomic(dest: &Path, contents: &[u8]) -> Result<()> {
    let dir = dest
        .parent()
        .ok_or_else(|| CoverError::io(dest, std::io::Error::other("destination has no parent")))?;

    let mut tmp = Builder::new()
        .prefix(".rias-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|err| CoverError::io(dir, err))?;

    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| CoverError::io(tmp.path(), err))?;

    tmp.persist(dest)
        .map_err(|err| CoverError::io(dest, err.error))?;
    Ok(())
}
