/// File attribute store: hidden, system and read-only flags.
///
/// Explorer only honours a folder's `desktop.ini` when the folder carries the
/// read-only or system attribute, and the generated files are normally kept
/// out of sight with hidden + system.
use crate::error::Result;
use std::ops::BitOr;
use std::path::Path;

/// The subset of OS file attributes Rias manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileAttributes {
    pub hidden: bool,
    pub system: bool,
    pub read_only: bool,
}

impl FileAttributes {
    pub const NONE: Self = Self {
        hidden: false,
        system: false,
        read_only: false,
    };
    pub const HIDDEN: Self = Self {
        hidden: true,
        ..Self::NONE
    };
    pub const SYSTEM: Self = Self {
        system: true,
        ..Self::NONE
    };
    pub const READ_ONLY: Self = Self {
        read_only: true,
        ..Self::NONE
    };

    /// `true` if every flag set in `other` is also set in `self`.
    pub fn contains(self, other: Self) -> bool {
        (!other.hidden || self.hidden)
            && (!other.system || self.system)
            && (!other.read_only || self.read_only)
    }
}

impl BitOr for FileAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            hidden: self.hidden || rhs.hidden,
            system: self.system || rhs.system,
            read_only: self.read_only || rhs.read_only,
        }
    }
}

/// Reads and adds OS-level attributes on paths.
pub trait AttributeStore: Send + Sync {
    /// Current attributes of `path`.
    fn attributes(&self, path: &Path) -> Result<FileAttributes>;

    /// OR `attrs` into the existing attributes of `path`; nothing is cleared.
    fn add_attributes(&self, path: &Path, attrs: FileAttributes) -> Result<()>;
}

/// The host OS attribute store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAttributes;

#[cfg(windows)]
mod imp {
    use super::FileAttributes;
    use crate::error::{CoverError, Result};
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::{
        GetFileAttributesW, SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_READONLY,
        FILE_ATTRIBUTE_SYSTEM, FILE_FLAGS_AND_ATTRIBUTES, INVALID_FILE_ATTRIBUTES,
    };

    fn to_wide(path: &Path) -> Vec<u16> {
        path.as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    fn read_raw(path: &Path, wide: &[u16]) -> Result<u32> {
        let raw = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };
        if raw == INVALID_FILE_ATTRIBUTES {
            return Err(CoverError::io(path, std::io::Error::last_os_error()));
        }
        Ok(raw)
    }

    pub fn attributes(path: &Path) -> Result<FileAttributes> {
        let raw = read_raw(path, &to_wide(path))?;
        Ok(FileAttributes {
            hidden: raw & FILE_ATTRIBUTE_HIDDEN.0 != 0,
            system: raw & FILE_ATTRIBUTE_SYSTEM.0 != 0,
            read_only: raw & FILE_ATTRIBUTE_READONLY.0 != 0,
        })
    }

    pub fn add_attributes(path: &Path, attrs: FileAttributes) -> Result<()> {
        let wide = to_wide(path);
        let mut raw = read_raw(path, &wide)?;
        if attrs.hidden {
            raw |= FILE_ATTRIBUTE_HIDDEN.0;
        }
        if attrs.system {
            raw |= FILE_ATTRIBUTE_SYSTEM.0;
        }
        if attrs.read_only {
            raw |= FILE_ATTRIBUTE_READONLY.0;
        }
        unsafe { SetFileAttributesW(PCWSTR(wide.as_ptr()), FILE_FLAGS_AND_ATTRIBUTES(raw)) }
            .map_err(|err| CoverError::io(path, std::io::Error::other(err)))
    }
}

#[cfg(not(windows))]
mod imp {
    use super::FileAttributes;
    use crate::error::{CoverError, Result};
    use std::path::Path;
    use tracing::trace;

    // Hidden and system have no portable equivalent, and a read-only Unix
    // directory would block later removal, so only `read_only` is reported.
    pub fn attributes(path: &Path) -> Result<FileAttributes> {
        let meta = std::fs::metadata(path).map_err(|err| CoverError::io(path, err))?;
        Ok(FileAttributes {
            read_only: meta.permissions().readonly(),
            ..FileAttributes::NONE
        })
    }

    pub fn add_attributes(path: &Path, attrs: FileAttributes) -> Result<()> {
        if !path.exists() {
            return Err(CoverError::io(
                path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        trace!("Ignoring {attrs:?} on {} (not supported here)", path.display());
        Ok(())
    }
}

impl AttributeStore for NativeAttributes {
    fn attributes(&self, path: &Path) -> Result<FileAttributes> {
        imp::attributes(path)
    }

    fn add_attributes(&self, path: &Path, attrs: FileAttributes) -> Result<()> {
        imp::add_attributes(path, attrs)
    }
}
