/// Run coordinator: scan, dispatch, report.
///
/// A run moves through `Scanning -> Dispatching -> Reporting`. Apply runs
/// fan targets out over a fixed worker pool; remove runs walk the targets
/// sequentially. Per-folder errors are logged, counted and never abort the
/// run. Only a missing root or an invalid policy fails it, before any folder
/// is touched.
///
/// Progress is reported through an optional crossbeam channel so a frontend
/// can draw a live line without the core knowing about terminals.
pub mod pool;

use crate::codec::{IcoCodec, ImageCodec};
use crate::cover::{self, CoverApplicator};
use crate::error::{CoverError, Result};
use crate::model::{
    ApplyOutcome, ApplyPolicy, FolderTarget, RemoveOutcome, RemovePolicy, ScanOptions,
};
use crate::platform::{AttributeStore, NativeAttributes, NativeShell, ShellNotifier};
use crate::scanner::{self, progress::ProgressCounter};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Collaborators and knobs shared by every folder of a run.
#[derive(Clone)]
pub struct RunContext {
    pub codec: Arc<dyn ImageCodec>,
    pub attributes: Arc<dyn AttributeStore>,
    pub shell: Arc<dyn ShellNotifier>,
    /// Apply-mode worker count; values below 1 are treated as 1.
    pub workers: usize,
}

impl RunContext {
    /// Real codec, native attributes and shell, one worker per CPU.
    pub fn native() -> Self {
        Self {
            codec: Arc::new(IcoCodec),
            attributes: Arc::new(NativeAttributes),
            shell: Arc::new(NativeShell),
            workers: num_cpus::get(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Apply,
    Remove,
}

/// Coarse run phase, reported as it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Scanning,
    Dispatching,
    Reporting,
}

/// Messages sent from the run to a frontend.
#[derive(Debug)]
pub enum RunProgress {
    Phase(RunPhase),
    /// The scan finished and found `total` targets.
    Collected { total: u64 },
    /// The progress counter moved to `done`.
    Advanced { done: u64, total: u64 },
    /// A folder failed; the run continues.
    Failed { folder: PathBuf, message: String },
    /// The run finished.
    Complete { summary: RunSummary },
}

/// A folder whose operation was aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderFailure {
    pub folder: PathBuf,
    pub message: String,
}

/// Aggregate counts of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: RunKind,
    /// Number of targets the scan produced.
    pub total: u64,
    /// Final progress counter: applied folders, or visited folders for remove.
    pub completed: u64,
    /// Folders whose files were actually written or deleted.
    pub changed: u64,
    /// Apply: cover already present. Remove: folder not covered.
    pub skipped: u64,
    pub failed: u64,
    /// Directories the scan could not list.
    pub unreadable: u64,
    pub failures: Vec<FolderFailure>,
    pub duration: Duration,
}

/// Per-run bookkeeping shared by workers.
struct Tally<'a> {
    counter: ProgressCounter,
    changed: AtomicU64,
    skipped: AtomicU64,
    failures: Mutex<Vec<FolderFailure>>,
    progress: Option<&'a Sender<RunProgress>>,
}

impl<'a> Tally<'a> {
    fn new(total: u64, progress: Option<&'a Sender<RunProgress>>) -> Self {
        Self {
            counter: ProgressCounter::new(total),
            changed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            failures: Mutex::new(Vec::new()),
            progress,
        }
    }

    fn send(&self, msg: RunProgress) {
        if let Some(tx) = self.progress {
            let _ = tx.send(msg);
        }
    }

    fn advance(&self) {
        let done = self.counter.increment();
        self.send(RunProgress::Advanced {
            done,
            total: self.counter.total(),
        });
    }

    fn skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    fn change(&self) {
        self.changed.fetch_add(1, Ordering::Relaxed);
    }

    fn fail(&self, folder: &FolderTarget, err: &CoverError) {
        warn!("{}: {err}", folder.path().display());
        let failure = FolderFailure {
            folder: folder.path().to_path_buf(),
            message: err.to_string(),
        };
        self.send(RunProgress::Failed {
            folder: failure.folder.clone(),
            message: failure.message.clone(),
        });
        self.failures.lock().push(failure);
    }

    fn finish(self, kind: RunKind, unreadable: u64, start: Instant) -> RunSummary {
        let failures = self.failures.into_inner();
        RunSummary {
            kind,
            total: self.counter.total(),
            completed: self.counter.get(),
            changed: self.changed.into_inner(),
            skipped: self.skipped.into_inner(),
            failed: failures.len() as u64,
            unreadable,
            failures,
            duration: start.elapsed(),
        }
    }
}

/// Scan and apply covers to every target, `ctx.workers` folders at a time.
pub fn run_apply(
    options: &ScanOptions,
    policy: &ApplyPolicy,
    ctx: &RunContext,
    progress: Option<&Sender<RunProgress>>,
) -> Result<RunSummary> {
    policy.validate()?;
    let start = Instant::now();
    let (targets, unreadable) = collect(options, progress)?;

    let tally = Tally::new(targets.len() as u64, progress);
    tally.send(RunProgress::Phase(RunPhase::Dispatching));
    info!(
        "Applying covers to {} folders with {} workers",
        targets.len(),
        ctx.workers.max(1)
    );

    let applicator = CoverApplicator::new(ctx.codec.as_ref(), ctx.attributes.as_ref());
    pool::run_pool(targets, ctx.workers, |folder| {
        match applicator.apply(&folder, policy) {
            Ok(ApplyOutcome::Applied { source }) => {
                debug!("Applied {} <- {}", folder.path().display(), source.display());
                tally.change();
                tally.advance();
            }
            Ok(ApplyOutcome::Skipped) => tally.skip(),
            Err(err) => tally.fail(&folder, &err),
        }
    });

    Ok(report(tally, RunKind::Apply, unreadable, start, ctx))
}

/// Scan and remove covers from every target, one folder after another.
pub fn run_remove(
    options: &ScanOptions,
    policy: &RemovePolicy,
    ctx: &RunContext,
    progress: Option<&Sender<RunProgress>>,
) -> Result<RunSummary> {
    let start = Instant::now();
    let (targets, unreadable) = collect(options, progress)?;

    let tally = Tally::new(targets.len() as u64, progress);
    tally.send(RunProgress::Phase(RunPhase::Dispatching));
    info!("Removing covers from {} folders", targets.len());

    for folder in &targets {
        match cover::remove(folder, policy) {
            Ok(RemoveOutcome::Removed { covers_deleted }) => {
                debug!(
                    "Removed descriptor and {covers_deleted} cover file(s) from {}",
                    folder.path().display()
                );
                tally.change();
            }
            Ok(RemoveOutcome::NotCovered) => tally.skip(),
            Err(err) => tally.fail(folder, &err),
        }
        tally.advance();
    }

    Ok(report(tally, RunKind::Remove, unreadable, start, ctx))
}

/// Scanning phase shared by both run kinds.
fn collect(
    options: &ScanOptions,
    progress: Option<&Sender<RunProgress>>,
) -> Result<(Vec<FolderTarget>, u64)> {
    if let Some(tx) = progress {
        let _ = tx.send(RunProgress::Phase(RunPhase::Scanning));
    }
    let scanned = scanner::scan(options)?;
    if let Some(tx) = progress {
        let _ = tx.send(RunProgress::Collected {
            total: scanned.targets.len() as u64,
        });
    }
    Ok((scanned.targets, scanned.access_errors))
}

/// Reporting phase: refresh the shell once and emit the summary.
fn report(
    tally: Tally<'_>,
    kind: RunKind,
    unreadable: u64,
    start: Instant,
    ctx: &RunContext,
) -> RunSummary {
    tally.send(RunProgress::Phase(RunPhase::Reporting));
    ctx.shell.notify_folders_changed();

    let progress = tally.progress;
    let summary = tally.finish(kind, unreadable, start);
    info!(
        "{kind:?} finished: {}/{} completed, {} skipped, {} failed in {:?}",
        summary.completed, summary.total, summary.skipped, summary.failed, summary.duration
    );
    if let Some(tx) = progress {
        let _ = tx.send(RunProgress::Complete {
            summary: summary.clone(),
        });
    }
    summary
}
