/// Data model for a Rias run.
///
/// Re-exports scan options, apply/remove policies, folder targets and the
/// per-folder outcome types.
pub mod file_info;
pub mod options;
pub mod outcome;

pub use file_info::{FileInfo, FolderTarget};
pub use options::{
    parse_extension_filter, parse_resolutions, ApplyPolicy, RemovePolicy, ScanOptions, SortPolicy,
    DEFAULT_COVER_FILE_NAME, DEFAULT_DESCRIPTOR_FILE_NAME, DEFAULT_EXTENSION_FILTER,
    DEFAULT_RESOLUTIONS, MAX_ICON_RESOLUTION,
};
pub use outcome::{ApplyOutcome, RemoveOutcome};
