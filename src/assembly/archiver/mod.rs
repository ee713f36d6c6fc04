//! Archive production.
//!
//! The [`Archiver`] trait is the seam between the packaging driver and the
//! code that walks a file tree and writes archive bytes. [`FileTreeArchiver`]
//! is the implementation used by the CLI.
//!
//! # Module Organization
//!
//! - [`file_tree`] - [`FileTreeArchiver`]: validation, staging and placement
//! - [`selection`] - Which files of the base directory become entries
//! - [`tar_writer`] - Plain and gzip-compressed tar writing
//! - [`zip_writer`] - Zip writing
//! - [`dir`] - Exploded directory output

mod dir;
mod file_tree;
mod selection;
mod tar_writer;
mod zip_writer;

pub use file_tree::FileTreeArchiver;
pub use selection::{ArchiveEntry, DEFAULT_EXCLUDES, collect_entries};

use crate::assembly::job::AssemblyJob;
use crate::assembly::settings::ConfigView;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Produces one archive file for one format of a job.
pub trait Archiver {
    /// Writes the archive and returns the path of the produced file.
    ///
    /// `distribution_name` is the base file name; the format decides the
    /// extension. With `create_parent_dirs` the output directory is created
    /// when missing.
    fn create_archive(
        &self,
        job: &AssemblyJob,
        distribution_name: &str,
        format: &str,
        config: &ConfigView<'_>,
        create_parent_dirs: bool,
    ) -> Result<PathBuf, ArchiveError>;
}

/// Failures of archive production.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive could not be created.
    #[error("{0}")]
    Creation(String),

    /// Filesystem failure while creating the archive.
    #[error("Failed {action} {}: {source}", path.display())]
    Io {
        /// What was being done
        action: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The distribution name could not be formatted.
    #[error("Formatting error: {0}")]
    Formatting(String),

    /// The job or configuration is structurally invalid.
    #[error("{0}")]
    InvalidConfiguration(String),
}

/// Attaches path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`ArchiveError::Io`] naming the action and path.
    fn fs_context(self, action: &str, path: &Path) -> Result<T, ArchiveError>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T, ArchiveError> {
        self.map_err(|source| ArchiveError::Io {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Archive formats understood by [`FileTreeArchiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Jar,
    Tar,
    TarGz,
    Dir,
}

impl FromStr for ArchiveFormat {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zip" => Ok(Self::Zip),
            "jar" => Ok(Self::Jar),
            "tar" => Ok(Self::Tar),
            "tar.gz" | "tgz" => Ok(Self::TarGz),
            "dir" => Ok(Self::Dir),
            other => Err(ArchiveError::Creation(format!(
                "Unrecognized archive format: {}. Supported formats: zip, jar, tar, tar.gz, tgz, dir",
                other
            ))),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zip => "zip",
            Self::Jar => "jar",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::Dir => "dir",
        };
        f.write_str(name)
    }
}
