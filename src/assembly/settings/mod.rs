//! Configuration structures for source archive assembly.
//!
//! [`Settings`] is the complete, immutable input of one packaging invocation.
//! [`ArchiverConfig`] is the ambient configuration shared with the descriptor
//! reader and the archiver; [`ConfigView`] is the read-only view of it that
//! collaborators actually receive, optionally with the archive root folder
//! overlaid.

mod archiver;
mod builder;
mod core;
mod mode;
mod package;
mod view;

pub use archiver::ArchiverConfig;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use mode::TarLongFileMode;
pub use package::ProjectUnit;
pub use view::ConfigView;
