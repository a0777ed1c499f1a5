/// Representative selection: picks the one image a folder's cover is made from.
use crate::error::{CoverError, Result};
use crate::model::{ApplyPolicy, FileInfo, SortPolicy};
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::path::Path;

/// Pick exactly one file from `files` according to `policy`.
///
/// Only files whose extension (with the dot, case-sensitive) is in the
/// policy's filter are candidates. Sorting is stable, so ties keep the
/// enumeration order of `files`. `Random` draws from a fresh thread-local
/// generator on every call.
pub fn select<'a>(
    files: &'a [FileInfo],
    policy: &ApplyPolicy,
    folder: &Path,
) -> Result<&'a FileInfo> {
    let mut candidates: Vec<&FileInfo> = files
        .iter()
        .filter(|f| policy.source_extension_filter.contains(&f.extension))
        .collect();

    let no_candidate = || CoverError::NoCandidate {
        folder: folder.to_path_buf(),
    };

    let compare: fn(&&FileInfo, &&FileInfo) -> Ordering = match policy.sort_policy {
        SortPolicy::NameAsc => |a, b| a.name.cmp(&b.name),
        SortPolicy::NameDesc => |a, b| b.name.cmp(&a.name),
        SortPolicy::DateAsc => |a, b| a.modified.cmp(&b.modified),
        SortPolicy::DateDesc => |a, b| b.modified.cmp(&a.modified),
        SortPolicy::Random => {
            return candidates
                .choose(&mut rand::thread_rng())
                .copied()
                .ok_or_else(no_candidate);
        }
    };

    candidates.sort_by(compare);
    candidates.first().copied().ok_or_else(no_candidate)
}
