/// Cover applicator: materialises `icon.ico` + `desktop.ini` in one folder.
///
/// Steps run strictly in order for a folder:
///
/// 1. Pick the representative image.
/// 2. Render it into a multi-resolution ICO bundle.
/// 3. Atomically replace the icon file.
/// 4. Mark the icon system (+ hidden unless visible).
/// 5. Atomically replace the descriptor and mark it the same way.
/// 6. Mark the folder read-only + system so Explorer honours the descriptor.
///
/// Counting applied folders is left to the caller, which sees the
/// [`ApplyOutcome`].
use crate::codec::ImageCodec;
use crate::cover::{atomic, descriptor, select};
use crate::error::Result;
use crate::model::file_info::list_files;
use crate::model::{ApplyOutcome, ApplyPolicy, FolderTarget, DEFAULT_DESCRIPTOR_FILE_NAME};
use crate::platform::{AttributeStore, FileAttributes};
use std::path::Path;
use tracing::{debug, trace};

pub struct CoverApplicator<'a> {
    codec: &'a dyn ImageCodec,
    attributes: &'a dyn AttributeStore,
}

impl<'a> CoverApplicator<'a> {
    pub fn new(codec: &'a dyn ImageCodec, attributes: &'a dyn AttributeStore) -> Self {
        Self { codec, attributes }
    }

    /// Apply a cover to `folder`.
    ///
    /// Returns `Skipped` without touching anything when a cover file already
    /// exists and `overwrite_existing` is off.
    pub fn apply(&self, folder: &FolderTarget, policy: &ApplyPolicy) -> Result<ApplyOutcome> {
        let dir = folder.path();
        let files = list_files(dir)?;

        let has_cover = files.iter().any(|f| f.name == policy.cover_file_name);
        if has_cover && !policy.overwrite_existing {
            debug!("Skipping {} (cover exists)", dir.display());
            return Ok(ApplyOutcome::Skipped);
        }

        let source = select::select(&files, policy, dir)?;
        debug!(
            "Rendering cover for {} from {} ({})",
            dir.display(),
            source.name,
            policy.sort_policy.label()
        );
        let icon = self.codec.render(&source.path, &policy.icon_resolutions)?;

        let icon_path = dir.join(&policy.cover_file_name);
        atomic::write_atomic(&icon_path, &icon)?;
        self.mark(&icon_path, hidden_unless(policy.cover_visible))?;

        let ini_path = dir.join(DEFAULT_DESCRIPTOR_FILE_NAME);
        let ini = descriptor::render(&policy.cover_file_name);
        atomic::write_atomic(&ini_path, ini.as_bytes())?;
        self.mark(&ini_path, hidden_unless(policy.descriptor_visible))?;

        self.mark(dir, FileAttributes::READ_ONLY | FileAttributes::SYSTEM)?;

        Ok(ApplyOutcome::Applied {
            source: source.path.clone(),
        })
    }

    /// Add `attrs` to `path` unless it already carries all of them.
    fn mark(&self, path: &Path, attrs: FileAttributes) -> Result<()> {
        if self.attributes.attributes(path)?.contains(attrs) {
            trace!("{} already marked {attrs:?}", path.display());
            return Ok(());
        }
        self.attributes.add_attributes(path, attrs)
    }
}

/// System always, hidden unless the file should stay visible.
fn hidden_unless(visible: bool) -> FileAttributes {
    if visible {
        FileAttributes::SYSTEM
    } else {
        FileAttributes::SYSTEM | FileAttributes::HIDDEN
    }
}
