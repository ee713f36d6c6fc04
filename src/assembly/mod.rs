//! Source archive assembly.
//!
//! Resolves the built-in `project` descriptor into an [`AssemblyJob`],
//! produces one archive per requested format and attaches each archive as a
//! build output classified `project-sources`.
//!
//! The descriptor reader, the archiver and the artifact attacher are traits
//! ([`DescriptorReader`], [`Archiver`], [`ArtifactAttacher`]) so the driver
//! can be embedded in other build tools; [`DefaultDescriptorReader`],
//! [`FileTreeArchiver`] and [`ManifestAttacher`] are the implementations the
//! CLI uses.

pub mod archiver;
pub mod attach;
pub mod builder;
pub mod descriptor;
pub mod error;
pub mod formats;
pub mod job;
pub mod settings;
pub mod utils;

/// Built-in descriptor covering the whole project tree.
pub const PROJECT_DESCRIPTOR: &str = "project";

/// Classifier of every archive this crate attaches.
pub const CLASSIFIER: &str = "project-sources";

pub use archiver::{ArchiveError, ArchiveFormat, Archiver, FileTreeArchiver};
pub use attach::{ArtifactAttacher, ArtifactManifest, AttachedArtifact, ManifestAttacher};
pub use builder::{Outcome, ProducedArchive, ProjectSources, SkipReason, is_execution_root};
pub use descriptor::{DefaultDescriptorReader, Descriptor, DescriptorReader, FileSet, ReadError};
pub use error::{Error, Result};
pub use formats::{Formats, parse_formats};
pub use job::{AssemblyJob, distribution_name};
pub use settings::{
    ArchiverConfig, ConfigView, ProjectUnit, Settings, SettingsBuilder, TarLongFileMode,
};
