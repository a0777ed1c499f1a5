//! `desktop.ini` descriptor content.
//!
//! Explorer reads the `[.ShellClassInfo]` section to find the folder icon.
//! The trailing comment records which Rias version wrote the file.

/// Version marker written as the last line of every descriptor.
pub const VERSION_MARKER: &str = concat!(";rias ", env!("CARGO_PKG_VERSION"));

/// Build the descriptor text pointing at `cover_file_name`, icon index 0.
///
/// Lines end in CRLF, as Explorer writes them.
pub fn render(cover_file_name: &str) -> String {
    let lines = [
        "[.ShellClassInfo]".to_string(),
        format!("IconResource=.\\{cover_file_name},0"),
        format!("IconFile=.\\{cover_file_name}"),
        "IconIndex=0".to_string(),
        VERSION_MARKER.to_string(),
    ];
    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}
