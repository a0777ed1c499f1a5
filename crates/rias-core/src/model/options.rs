/// Scan options and the apply/remove policies that drive a run.
///
/// Every struct has a `Default` matching the CLI defaults, so the library
/// can be driven without going through argument parsing.
use crate::error::{CoverError, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// File name of the generated icon inside a covered folder.
pub const DEFAULT_COVER_FILE_NAME: &str = "icon.ico";

/// File name of the Explorer descriptor; its presence marks a covered folder.
pub const DEFAULT_DESCRIPTOR_FILE_NAME: &str = "desktop.ini";

/// Icon sizes rendered into the bundle, largest first.
pub const DEFAULT_RESOLUTIONS: &[u32] = &[256, 48, 32, 24, 16];

/// Source image extensions considered when picking a representative file.
pub const DEFAULT_EXTENSION_FILTER: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// The ICO directory stores width/height in one byte (0 means 256).
pub const MAX_ICON_RESOLUTION: u32 = 256;

/// Where and how deep to look for folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub root_path: PathBuf,
    /// Depth 0 is the root itself.
    pub max_depth: usize,
    /// Also collect folders that have subfolders, as long as they hold files.
    pub include_parent_folders: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            max_depth: 1,
            include_parent_folders: false,
        }
    }
}

/// Ordering used to pick the representative image of a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortPolicy {
    #[default]
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    Random,
}

impl SortPolicy {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "name ascending",
            Self::NameDesc => "name descending",
            Self::DateAsc => "date ascending",
            Self::DateDesc => "date descending",
            Self::Random => "random",
        }
    }
}

/// How covers are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyPolicy {
    /// Regenerate covers for folders that already have one.
    pub overwrite_existing: bool,
    pub sort_policy: SortPolicy,
    /// Extensions including the leading dot, matched case-sensitively.
    pub source_extension_filter: BTreeSet<String>,
    /// Icon sizes in pixels, in the order they are written to the bundle.
    pub icon_resolutions: Vec<u32>,
    pub cover_visible: bool,
    pub descriptor_visible: bool,
    pub cover_file_name: String,
}

impl Default for ApplyPolicy {
    fn default() -> Self {
        Self {
            overwrite_existing: false,
            sort_policy: SortPolicy::default(),
            source_extension_filter: DEFAULT_EXTENSION_FILTER
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            icon_resolutions: DEFAULT_RESOLUTIONS.to_vec(),
            cover_visible: false,
            descriptor_visible: false,
            cover_file_name: DEFAULT_COVER_FILE_NAME.to_string(),
        }
    }
}

impl ApplyPolicy {
    /// Reject policies that cannot produce a valid icon bundle.
    pub fn validate(&self) -> Result<()> {
        if self.icon_resolutions.is_empty() {
            return Err(CoverError::InvalidPolicy {
                reason: "at least one icon resolution is required".into(),
            });
        }
        if let Some(bad) = self
            .icon_resolutions
            .iter()
            .find(|&&r| r == 0 || r > MAX_ICON_RESOLUTION)
        {
            return Err(CoverError::InvalidPolicy {
                reason: format!("icon resolution {bad} is outside 1..={MAX_ICON_RESOLUTION}"),
            });
        }
        if self.source_extension_filter.is_empty() {
            return Err(CoverError::InvalidPolicy {
                reason: "the source extension filter is empty".into(),
            });
        }
        if self.cover_file_name.trim().is_empty() {
            return Err(CoverError::InvalidPolicy {
                reason: "the cover file name is empty".into(),
            });
        }
        Ok(())
    }
}

/// How covers are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePolicy {
    pub cover_file_name: String,
    /// Delete an orphaned descriptor even when no matching cover file exists.
    pub remove_all_known_artifacts: bool,
}

impl Default for RemovePolicy {
    fn default() -> Self {
        Self {
            cover_file_name: DEFAULT_COVER_FILE_NAME.to_string(),
            remove_all_known_artifacts: false,
        }
    }
}

/// Parse a comma-separated resolution list such as `"256, 48, 32"`.
///
/// Order is preserved; every entry must be in `1..=256`.
pub fn parse_resolutions(input: &str) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let value: u32 = part.parse().map_err(|_| CoverError::InvalidPolicy {
            reason: format!("'{part}' is not a valid icon resolution"),
        })?;
        if value == 0 || value > MAX_ICON_RESOLUTION {
            return Err(CoverError::InvalidPolicy {
                reason: format!("icon resolution {value} is outside 1..={MAX_ICON_RESOLUTION}"),
            });
        }
        out.push(value);
    }
    if out.is_empty() {
        return Err(CoverError::InvalidPolicy {
            reason: "at least one icon resolution is required".into(),
        });
    }
    Ok(out)
}

/// Parse a comma-separated extension list such as `".jpg, .png"`.
///
/// Entries are trimmed but their case is kept.
pub fn parse_extension_filter(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
