//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use rias_core::codec::ImageCodec;
use rias_core::platform::{AttributeStore, FileAttributes, ShellNotifier};
use rias_core::run::RunContext;
use rias_core::{CoverError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Codec that "renders" by echoing the source bytes and the resolution list,
/// so tests can tell which file was picked. Sources starting with `BAD` fail.
#[derive(Default)]
pub struct EchoCodec;

impl ImageCodec for EchoCodec {
    fn render(&self, source: &Path, resolutions: &[u32]) -> Result<Vec<u8>> {
        let bytes = fs::read(source).map_err(|err| CoverError::io(source, err))?;
        if bytes.starts_with(b"BAD") {
            return Err(CoverError::Codec {
                path: source.to_path_buf(),
                reason: "corrupt test image".into(),
            });
        }
        let mut out = format!("ICO{resolutions:?}:").into_bytes();
        out.extend_from_slice(&bytes);
        Ok(out)
    }
}

/// Attribute store that only records what it was asked to do.
#[derive(Default)]
pub struct RecordingAttributes {
    applied: Mutex<HashMap<PathBuf, FileAttributes>>,
    adds: Mutex<HashMap<PathBuf, usize>>,
}

impl RecordingAttributes {
    pub fn get(&self, path: &Path) -> FileAttributes {
        self.applied.lock().get(path).copied().unwrap_or_default()
    }

    /// How many times `add_attributes` was called for `path`.
    pub fn adds(&self, path: &Path) -> usize {
        self.adds.lock().get(path).copied().unwrap_or_default()
    }
}

impl AttributeStore for RecordingAttributes {
    fn attributes(&self, path: &Path) -> Result<FileAttributes> {
        Ok(self.get(path))
    }

    fn add_attributes(&self, path: &Path, attrs: FileAttributes) -> Result<()> {
        if !path.exists() {
            return Err(CoverError::io(
                path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        *self.adds.lock().entry(path.to_path_buf()).or_default() += 1;
        let mut applied = self.applied.lock();
        let entry = applied.entry(path.to_path_buf()).or_default();
        *entry = *entry | attrs;
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingShell {
    pub calls: AtomicUsize,
}

impl ShellNotifier for CountingShell {
    fn notify_folders_changed(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

/// Test context plus handles to its fakes.
pub struct Fakes {
    pub attributes: Arc<RecordingAttributes>,
    pub shell: Arc<CountingShell>,
    pub ctx: RunContext,
}

pub fn fakes(workers: usize) -> Fakes {
    let attributes = Arc::new(RecordingAttributes::default());
    let shell = Arc::new(CountingShell::default());
    let ctx = RunContext {
        codec: Arc::new(EchoCodec),
        attributes: attributes.clone(),
        shell: shell.clone(),
        workers,
    };
    Fakes {
        attributes,
        shell,
        ctx,
    }
}

pub fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
