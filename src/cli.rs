//! Command-line interface for Rias.
//!
//! Two subcommands share the scan options; each maps onto a core policy.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rias_core::model::{
    parse_extension_filter, parse_resolutions, ApplyPolicy, RemovePolicy, ScanOptions, SortPolicy,
    DEFAULT_COVER_FILE_NAME,
};
use std::path::PathBuf;

/// Rias - give picture folders their own Explorer icon
#[derive(Parser, Debug)]
#[command(name = "rias")]
#[command(about = "Generate folder icons from the pictures inside each folder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create covers for folders containing pictures
    Apply(ApplyArgs),
    /// Remove covers of folders
    Remove(RemoveArgs),
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Apply(args) => &args.common,
            Self::Remove(args) => &args.common,
        }
    }
}

/// Options shared by both subcommands.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Where to start applying cover to folders
    #[arg(short = 'f', long = "folder", default_value = ".")]
    pub folder: PathBuf,

    /// Maximum search depth for nested folders
    #[arg(short = 'd', long = "depth", default_value_t = 1)]
    pub depth: usize,

    /// Regenerate cover for folder with existing covers
    #[arg(short = 'o', long = "overwrite")]
    pub overwrite: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Also process folders that have subfolders
    #[arg(long = "folder-with-subfolders", hide = true)]
    pub include_parent_folders: bool,
}

impl CommonArgs {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            root_path: self.folder.clone(),
            max_depth: self.depth,
            include_parent_folders: self.include_parent_folders,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    #[value(name = "name-asc", alias = "nameAsc")]
    NameAsc,
    #[value(name = "name-des", alias = "nameDes")]
    NameDes,
    #[value(name = "date-asc", alias = "dateAsc")]
    DateAsc,
    #[value(name = "date-des", alias = "dateDes")]
    DateDes,
    #[value(name = "random")]
    Random,
}

impl From<SortArg> for SortPolicy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::NameAsc => Self::NameAsc,
            SortArg::NameDes => Self::NameDesc,
            SortArg::DateAsc => Self::DateAsc,
            SortArg::DateDes => Self::DateDesc,
            SortArg::Random => Self::Random,
        }
    }
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Which picture becomes the cover
    #[arg(short = 's', long = "sort", value_enum, default_value = "name-asc")]
    pub sort: SortArg,

    /// Number of folders processed in parallel (defaults to the CPU count)
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,

    #[arg(long = "cover-visible", hide = true)]
    pub cover_visible: bool,

    #[arg(long = "ini-visible", hide = true)]
    pub ini_visible: bool,

    #[arg(long = "ico-resolutions", hide = true, default_value = "256, 48, 32, 24, 16")]
    pub resolutions: String,

    #[arg(long = "cover-source-filter", hide = true, default_value = ".jpg, .jpeg, .png, .webp")]
    pub filter: String,
}

impl ApplyArgs {
    pub fn policy(&self) -> rias_core::Result<ApplyPolicy> {
        Ok(ApplyPolicy {
            overwrite_existing: self.common.overwrite,
            sort_policy: self.sort.into(),
            source_extension_filter: parse_extension_filter(&self.filter),
            icon_resolutions: parse_resolutions(&self.resolutions)?,
            cover_visible: self.cover_visible,
            descriptor_visible: self.ini_visible,
            cover_file_name: DEFAULT_COVER_FILE_NAME.to_string(),
        })
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Remove the cover file with this name
    #[arg(long = "ico", default_value = DEFAULT_COVER_FILE_NAME)]
    pub cover_file: String,

    /// Also delete desktop.ini when no matching cover file is present
    #[arg(long = "everything", alias = "everyhing", hide = true)]
    pub everything: bool,
}

impl RemoveArgs {
    pub fn policy(&self) -> RemovePolicy {
        RemovePolicy {
            cover_file_name: self.cover_file.clone(),
            remove_all_known_artifacts: self.everything,
        }
    }
}
