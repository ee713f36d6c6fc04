//! Zip archive writing.

use super::{ArchiveEntry, ArchiveError, ErrorExt};
use crate::assembly::settings::ConfigView;
use std::fs::{File, Metadata};
use std::io::{Seek, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes `entries` as a deflated zip archive into `writer`.
pub(super) fn write_zip<W: Write + Seek>(
    writer: W,
    entries: &[ArchiveEntry],
    config: &ConfigView<'_>,
    archive_path: &Path,
) -> Result<W, ArchiveError> {
    let zip_error = |e: zip::result::ZipError| {
        ArchiveError::Creation(format!(
            "Failed to write zip archive {}: {}",
            archive_path.display(),
            e
        ))
    };

    let mut zip = ZipWriter::new(writer);

    for entry in entries {
        let mut source = File::open(&entry.source).fs_context("opening", &entry.source)?;
        let metadata = source.metadata().fs_context("reading metadata of", &entry.source)?;

        let mut options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(metadata.len() >= u64::from(u32::MAX));
        if !config.is_ignore_permissions() {
            if let Some(mode) = unix_mode(&metadata) {
                options = options.unix_permissions(mode);
            }
        }

        zip.start_file(entry.name.as_str(), options).map_err(zip_error)?;
        std::io::copy(&mut source, &mut zip).fs_context("compressing", &entry.source)?;
    }

    zip.finish().map_err(zip_error)
}

#[cfg(unix)]
fn unix_mode(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &Metadata) -> Option<u32> {
    None
}
