/// Rias Core: folder scanning, cover generation and removal.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, shell extension).
///
/// # Modules
///
/// - [`model`]: Scan options, apply/remove policies and per-folder outcomes.
/// - [`scanner`]: Depth-bounded folder collection and the shared progress counter.
/// - [`cover`]: Representative selection, cover application and removal.
/// - [`codec`]: Image codec service that renders multi-resolution ICO bundles.
/// - [`platform`]: File attribute store and shell change notification.
/// - [`run`]: Run coordinator: worker pool, progress messages and summary.
pub mod codec;
pub mod cover;
pub mod error;
pub mod model;
pub mod platform;
pub mod run;
pub mod scanner;

pub use error::{CoverError, Result};
