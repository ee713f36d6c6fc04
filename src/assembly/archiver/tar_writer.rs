//! Tar archive writing.

use super::{ArchiveEntry, ArchiveError, ErrorExt};
use crate::assembly::settings::{ConfigView, TarLongFileMode};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tar::{Builder, Header, HeaderMode};

/// Writes `entries` as a tar stream into `writer` and returns the writer.
///
/// Headers come from file metadata; with permissions ignored they are
/// normalized (fixed owner, mtime and 0644/0755 modes).
pub(super) fn write_tar<W: Write>(
    writer: W,
    entries: &[ArchiveEntry],
    config: &ConfigView<'_>,
    archive_path: &Path,
) -> Result<W, ArchiveError> {
    let header_mode = if config.is_ignore_permissions() {
        HeaderMode::Deterministic
    } else {
        HeaderMode::Complete
    };
    let long_file_mode = config.tar_long_file_mode();

    let mut builder = Builder::new(writer);

    for entry in entries {
        check_name_length(&entry.name, long_file_mode)?;

        let file = File::open(&entry.source).fs_context("opening", &entry.source)?;
        let metadata = file.metadata().fs_context("reading metadata of", &entry.source)?;

        let mut header = Header::new_gnu();
        header.set_metadata_in_mode(&metadata, header_mode);
        builder
            .append_data(&mut header, &entry.name, file)
            .fs_context("appending", &entry.source)?;
    }

    builder.into_inner().fs_context("finishing", archive_path)
}

fn check_name_length(name: &str, mode: TarLongFileMode) -> Result<(), ArchiveError> {
    if name.len() <= TarLongFileMode::USTAR_NAME_LIMIT {
        return Ok(());
    }
    match mode {
        TarLongFileMode::Gnu => Ok(()),
        TarLongFileMode::Warn => {
            log::warn!(
                "Entry name exceeds {} bytes, writing GNU long name record: {}",
                TarLongFileMode::USTAR_NAME_LIMIT,
                name
            );
            Ok(())
        }
        TarLongFileMode::Fail => Err(ArchiveError::Creation(format!(
            "Entry name exceeds {} bytes and long file mode is 'fail': {}",
            TarLongFileMode::USTAR_NAME_LIMIT,
            name
        ))),
    }
}
