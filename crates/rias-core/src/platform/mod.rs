/// Platform-specific functionality: file attributes and shell change
/// notification.
///
/// Both concerns sit behind traits so the cover pipeline stays portable and
/// testable; the native implementations talk to the Windows API and fall
/// back to logged no-ops on other targets.
pub mod attributes;
pub mod shell;

pub use attributes::{AttributeStore, FileAttributes, NativeAttributes};
pub use shell::{NativeShell, ShellNotifier};
