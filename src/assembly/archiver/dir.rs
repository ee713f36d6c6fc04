//! Exploded directory output.

use super::{ArchiveEntry, ArchiveError, ErrorExt};
use crate::assembly::utils::fs;
use std::path::Path;

/// Copies `entries` below `staging`, recreating the entry names as paths.
pub(super) fn write_directory(entries: &[ArchiveEntry], staging: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(staging, true).fs_context("creating", staging)?;

    for entry in entries {
        let dest = entry
            .name
            .split('/')
            .fold(staging.to_path_buf(), |path, segment| path.join(segment));
        fs::copy_file(&entry.source, &dest).fs_context("copying", &entry.source)?;
    }

    Ok(())
}
