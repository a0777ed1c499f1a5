/// Shell change notification: asks Explorer to drop its cached folder icons.
///
/// Fire-and-forget: the call has no result worth checking.
use tracing::debug;

pub trait ShellNotifier: Send + Sync {
    /// Tell the file browser that folder icons may have changed.
    fn notify_folders_changed(&self);
}

/// The host OS shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeShell;

impl ShellNotifier for NativeShell {
    #[cfg(windows)]
    fn notify_folders_changed(&self) {
        use windows::Win32::UI::Shell::{SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNF_IDLIST};

        debug!("Broadcasting SHCNE_ASSOCCHANGED");
        unsafe { SHChangeNotify(SHCNE_ASSOCCHANGED, SHCNF_IDLIST, None, None) };
    }

    #[cfg(not(windows))]
    fn notify_folders_changed(&self) {
        debug!("No shell icon cache to refresh on this platform");
    }
}
