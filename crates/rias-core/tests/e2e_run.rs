/// End-to-end run coordinator tests: scan + dispatch + report.
mod common;

use common::{fakes, file_names, write};
use rias_core::model::{ApplyPolicy, RemovePolicy, ScanOptions};
use rias_core::run::{run_apply, run_remove, RunKind, RunPhase, RunProgress};
use rias_core::CoverError;
use std::path::Path;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn options(root: &Path) -> ScanOptions {
    ScanOptions {
        root_path: root.to_path_buf(),
        max_depth: 1,
        include_parent_folders: false,
    }
}

/// `n` independent album folders, each with one image.
fn build_albums(root: &Path, n: usize) {
    for i in 0..n {
        write(&root.join(format!("album{i:03}/photo.jpg")), format!("img{i}").as_bytes());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// N folders end with the counter at exactly N for any pool size.
#[test]
fn apply_counts_every_folder_once_for_any_pool_size() {
    for workers in [1, 2, 4, 16] {
        let tmp = TempDir::new().unwrap();
        build_albums(tmp.path(), 25);

        let fx = fakes(workers);
        let summary =
            run_apply(&options(tmp.path()), &ApplyPolicy::default(), &fx.ctx, None).unwrap();

        assert_eq!(summary.kind, RunKind::Apply);
        assert_eq!(summary.total, 25, "workers = {workers}");
        assert_eq!(summary.completed, 25, "workers = {workers}");
        assert_eq!(summary.changed, 25);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(fx.shell.calls.load(Ordering::Relaxed), 1);

        for i in 0..25 {
            let album = tmp.path().join(format!("album{i:03}"));
            assert_eq!(file_names(&album), vec!["desktop.ini", "icon.ico", "photo.jpg"]);
        }
    }
}

#[test]
fn apply_progress_messages_are_complete_and_monotonic_per_value() {
    let tmp = TempDir::new().unwrap();
    build_albums(tmp.path(), 10);

    let fx = fakes(3);
    let (tx, rx) = crossbeam_channel::unbounded();
    let summary =
        run_apply(&options(tmp.path()), &ApplyPolicy::default(), &fx.ctx, Some(&tx)).unwrap();
    drop(tx);

    let messages: Vec<RunProgress> = rx.iter().collect();
    assert!(matches!(messages.first(), Some(RunProgress::Phase(RunPhase::Scanning))));
    assert!(messages
        .iter()
        .any(|m| matches!(m, RunProgress::Collected { total: 10 })));
    assert!(messages
        .iter()
        .any(|m| matches!(m, RunProgress::Phase(RunPhase::Reporting))));

    let mut done: Vec<u64> = messages
        .iter()
        .filter_map(|m| match m {
            RunProgress::Advanced { done, total: 10 } => Some(*done),
            _ => None,
        })
        .collect();
    done.sort_unstable();
    assert_eq!(done, (1..=10).collect::<Vec<_>>());

    match messages.last() {
        Some(RunProgress::Complete { summary: last }) => assert_eq!(last, &summary),
        other => panic!("expected Complete last, got {other:?}"),
    }
}

/// Skipped and failed folders do not advance the apply counter.
#[test]
fn apply_mixed_outcomes_are_counted_separately() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("fresh/a.png"), b"ok");
    write(&tmp.path().join("covered/a.png"), b"ok");
    write(&tmp.path().join("covered/icon.ico"), b"existing");
    write(&tmp.path().join("broken/a.png"), b"BAD");
    write(&tmp.path().join("no_images/readme.txt"), b"text");

    let fx = fakes(2);
    let summary = run_apply(&options(tmp.path()), &ApplyPolicy::default(), &fx.ctx, None).unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 2);
    let mut failed: Vec<String> = summary
        .failures
        .iter()
        .map(|f| f.folder.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    failed.sort();
    assert_eq!(failed, vec!["broken", "no_images"]);
    assert_eq!(file_names(&tmp.path().join("covered")), vec!["a.png", "icon.ico"]);
}

#[test]
fn apply_missing_root_fails_before_any_work() {
    let tmp = TempDir::new().unwrap();
    let fx = fakes(2);
    let err = run_apply(
        &options(&tmp.path().join("missing")),
        &ApplyPolicy::default(),
        &fx.ctx,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CoverError::RootNotFound { .. }));
    assert_eq!(fx.shell.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn apply_invalid_policy_fails_before_any_work() {
    let tmp = TempDir::new().unwrap();
    build_albums(tmp.path(), 2);

    let policy = ApplyPolicy {
        icon_resolutions: Vec::new(),
        ..ApplyPolicy::default()
    };
    let fx = fakes(2);
    let err = run_apply(&options(tmp.path()), &policy, &fx.ctx, None).unwrap_err();
    assert!(matches!(err, CoverError::InvalidPolicy { .. }));
    assert_eq!(file_names(&tmp.path().join("album000")), vec!["photo.jpg"]);
}

/// Remove counts every visited folder, covered or not.
#[test]
fn remove_counts_every_visited_folder() {
    let tmp = TempDir::new().unwrap();
    build_albums(tmp.path(), 6);

    let fx = fakes(4);
    run_apply(&options(tmp.path()), &ApplyPolicy::default(), &fx.ctx, None).unwrap();
    write(&tmp.path().join("plain/photo.jpg"), b"never covered");

    let summary =
        run_remove(&options(tmp.path()), &RemovePolicy::default(), &fx.ctx, None).unwrap();
    assert_eq!(summary.kind, RunKind::Remove);
    assert_eq!(summary.total, 7);
    assert_eq!(summary.completed, 7);
    assert_eq!(summary.changed, 6);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(fx.shell.calls.load(Ordering::Relaxed), 2);

    for i in 0..6 {
        let album = tmp.path().join(format!("album{i:03}"));
        assert_eq!(file_names(&album), vec!["photo.jpg"]);
    }
}

#[test]
fn remove_on_empty_tree_reports_zero() {
    let tmp = TempDir::new().unwrap();
    let fx = fakes(1);
    let summary =
        run_remove(&options(tmp.path()), &RemovePolicy::default(), &fx.ctx, None).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.completed, 0);
    assert_eq!(fx.shell.calls.load(Ordering::Relaxed), 1);
}
