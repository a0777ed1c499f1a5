//! Error taxonomy for scanning and per-folder cover operations.
//!
//! Every variant except [`CoverError::RootNotFound`] and
//! [`CoverError::InvalidPolicy`] is contained at the folder boundary: the run
//! logs it, counts it, and moves on to the next folder.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    /// A directory could not be listed (usually access denied).
    #[error("cannot read directory {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No file in the folder matched the source extension filter.
    #[error("no cover source image found in {folder}")]
    NoCandidate { folder: PathBuf },

    /// The source image could not be decoded or the icon could not be rendered.
    #[error("cannot render cover from {path}: {reason}")]
    Codec { path: PathBuf, reason: String },

    /// Temp write, rename, attribute change or delete failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan root does not exist or is not a directory.
    #[error("root folder not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A policy value is out of range (e.g. an icon resolution above 256).
    #[error("invalid policy: {reason}")]
    InvalidPolicy { reason: String },
}

impl CoverError {
    /// Wrap an `io::Error` with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoverError>;
