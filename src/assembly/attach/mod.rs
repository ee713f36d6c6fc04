//! Attaching produced archives to the build's result set.
//!
//! - [`checksum`] - SHA256 checksum calculation for attached files
//! - [`manifest`] - [`ManifestAttacher`], recording attachments in a JSON manifest

mod checksum;
mod manifest;

pub use checksum::calculate_sha256;
pub use manifest::{AttachedArtifact, ArtifactManifest, ManifestAttacher};

use crate::assembly::settings::ProjectUnit;
use std::path::Path;

/// Registers a produced archive as a named build output.
///
/// Failure semantics belong to the implementation; the driver treats any
/// error as fatal.
pub trait ArtifactAttacher {
    /// Attaches `path` to `project` under `format` and `classifier`.
    fn attach(
        &mut self,
        project: &ProjectUnit,
        format: &str,
        classifier: &str,
        path: &Path,
    ) -> anyhow::Result<()>;
}
