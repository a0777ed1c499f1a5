/// Cover module: everything that happens inside one target folder.
///
/// - [`select`] picks the representative image.
/// - [`apply`] renders and writes the icon and descriptor.
/// - [`remove`] deletes them again.
pub mod apply;
pub mod atomic;
pub mod descriptor;
pub mod remove;
pub mod select;

pub use apply::CoverApplicator;
pub use remove::remove;
pub use select::select;
