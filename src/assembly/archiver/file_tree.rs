//! The file tree archiver: validation, staging and placement.

use super::selection::{collect_entries, relative_directory};
use super::{ArchiveEntry, ArchiveError, ArchiveFormat, Archiver, ErrorExt};
use super::{dir, tar_writer, zip_writer};
use crate::assembly::job::AssemblyJob;
use crate::assembly::settings::ConfigView;
use crate::assembly::utils::fs;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Archiver that walks the project tree and writes tar, zip or directory
/// outputs.
///
/// Archives are assembled inside the temporary root directory and moved
/// into the output directory only once complete, so a failed run never
/// leaves a truncated archive at the final path. Staging files are removed
/// on both success and failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTreeArchiver;

impl FileTreeArchiver {
    /// Creates a new archiver.
    pub fn new() -> Self {
        Self
    }

    /// Computes the final path of an archive.
    pub fn destination(
        config: &ConfigView<'_>,
        distribution_name: &str,
        format: &str,
        kind: ArchiveFormat,
    ) -> PathBuf {
        let file_name = match kind {
            ArchiveFormat::Dir if config.is_ignore_dir_format_extensions() => {
                distribution_name.to_string()
            }
            _ => format!("{}.{}", distribution_name, format),
        };
        config.output_directory().join(file_name)
    }

    fn write_staged(
        &self,
        kind: ArchiveFormat,
        entries: &[ArchiveEntry],
        config: &ConfigView<'_>,
        staging: &Path,
    ) -> Result<(), ArchiveError> {
        match kind {
            ArchiveFormat::Dir => dir::write_directory(entries, staging),
            ArchiveFormat::Zip | ArchiveFormat::Jar => {
                let file = File::create(staging).fs_context("creating", staging)?;
                let file = zip_writer::write_zip(file, entries, config, staging)?;
                file.sync_all().fs_context("flushing", staging)
            }
            ArchiveFormat::Tar => {
                let file = File::create(staging).fs_context("creating", staging)?;
                let file = tar_writer::write_tar(file, entries, config, staging)?;
                file.sync_all().fs_context("flushing", staging)
            }
            ArchiveFormat::TarGz => {
                let file = File::create(staging).fs_context("creating", staging)?;
                let encoder = GzEncoder::new(file, Compression::default());
                let encoder = tar_writer::write_tar(encoder, entries, config, staging)?;
                let file = encoder.finish().fs_context("compressing", staging)?;
                file.sync_all().fs_context("flushing", staging)
            }
        }
    }
}

impl Archiver for FileTreeArchiver {
    fn create_archive(
        &self,
        job: &AssemblyJob,
        distribution_name: &str,
        format: &str,
        config: &ConfigView<'_>,
        create_parent_dirs: bool,
    ) -> Result<PathBuf, ArchiveError> {
        validate_job(job, config)?;

        let kind: ArchiveFormat = format.parse()?;
        let destination = Self::destination(config, distribution_name, format, kind);
        let entries = collect_entries(job, config)?;

        if config.is_dry_run() {
            log::info!(
                "[dry run] {} would contain {} entries:",
                destination.display(),
                entries.len()
            );
            for entry in &entries {
                log::info!("[dry run]   {}", entry.name);
            }
            return Ok(destination);
        }

        let output = config.output_directory();
        if create_parent_dirs {
            fs::create_dir_all(output, false).fs_context("creating", output)?;
        } else if !output.is_dir() {
            return Err(ArchiveError::Creation(format!(
                "Output directory does not exist: {}",
                output.display()
            )));
        }

        let temp_root = config.temporary_root_directory();
        fs::create_dir_all(temp_root, false).fs_context("creating", temp_root)?;
        let staging = temp_root.join(format!("{}.{}.part", uuid::Uuid::new_v4(), kind));

        log::info!("Building {}: {}", format, destination.display());

        let result = self
            .write_staged(kind, &entries, config, &staging)
            .and_then(|()| {
                fs::move_into_place(&staging, &destination).fs_context("moving", &destination)
            });

        if result.is_err() {
            let cleanup = if staging.is_dir() {
                fs::remove_dir_all(&staging)
            } else {
                fs::remove_file(&staging)
            };
            if let Err(e) = cleanup {
                log::warn!("Failed to remove staging path {}: {}", staging.display(), e);
            }
        }
        // Only succeeds when no other archive is being staged.
        let _ = std::fs::remove_dir(temp_root);

        result?;
        log::debug!(
            "Wrote {} entries to {}",
            entries.len(),
            destination.display()
        );
        Ok(destination)
    }
}

/// Structural checks that no amount of retrying would fix.
fn validate_job(job: &AssemblyJob, config: &ConfigView<'_>) -> Result<(), ArchiveError> {
    let identity = job.identity();
    if identity.is_empty() {
        return Err(ArchiveError::InvalidConfiguration(
            "assembly identity must not be empty".to_string(),
        ));
    }
    if identity.contains(['/', '\\']) || identity.chars().any(char::is_whitespace) {
        return Err(ArchiveError::InvalidConfiguration(format!(
            "assembly identity '{}' must not contain path separators or whitespace",
            identity
        )));
    }

    let template = job.template();
    if template.file_sets.is_empty() {
        return Err(ArchiveError::InvalidConfiguration(
            "descriptor declares no file sets".to_string(),
        ));
    }
    for file_set in &template.file_sets {
        relative_directory(&file_set.directory)?;
        if file_set.output_directory.split(['/', '\\']).any(|s| s == "..") {
            return Err(ArchiveError::InvalidConfiguration(format!(
                "output directory '{}' must stay inside the archive",
                file_set.output_directory
            )));
        }
    }
    if let Some(base) = &template.base_directory {
        if base.is_empty() || base.split(['/', '\\']).any(|s| s == "..") {
            return Err(ArchiveError::InvalidConfiguration(format!(
                "base directory '{}' is not a valid folder name",
                base
            )));
        }
    }

    if let Some(encoding) = config.encoding() {
        let normalized = encoding.to_ascii_lowercase().replace('-', "");
        if normalized != "utf8" {
            return Err(ArchiveError::InvalidConfiguration(format!(
                "unsupported encoding '{}'; archive entry names are always UTF-8",
                encoding
            )));
        }
    }

    Ok(())
}
