/// Per-folder results reported back to the run coordinator.
use std::path::PathBuf;

/// Result of applying a cover to one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Icon and descriptor were written.
    Applied {
        /// The image the cover was rendered from.
        source: PathBuf,
    },
    /// A cover already existed and overwriting was not requested.
    Skipped,
}

/// Result of removing a cover from one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// At least the descriptor was deleted.
    Removed {
        /// Number of cover files deleted alongside the descriptor.
        covers_deleted: usize,
    },
    /// No descriptor, or a descriptor with no matching cover and no `everything` flag.
    NotCovered,
}
