//! Assembly descriptors: which files go into an archive.
//!
//! A [`Descriptor`] is a reusable template. The [`DescriptorReader`] seam
//! loads templates for a configuration view; [`resolve`] turns the first one
//! into a concrete [`AssemblyJob`](crate::assembly::AssemblyJob).

mod builtin;
mod reader;
mod resolver;

pub use builtin::builtin_descriptor;
pub use reader::DefaultDescriptorReader;
pub use resolver::resolve;

use crate::assembly::settings::ConfigView;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Declarative description of an archive's contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Descriptor {
    /// Descriptor id; replaced by the job identity on resolution.
    pub id: String,

    /// Formats named by the template; replaced on resolution.
    #[serde(default)]
    pub formats: Vec<String>,

    /// Nest all entries under a single root folder.
    #[serde(default = "default_true")]
    pub include_base_directory: bool,

    /// Explicit root folder name. None means the configured final name.
    #[serde(default)]
    pub base_directory: Option<String>,

    /// File sets contributing entries, in order.
    #[serde(default)]
    pub file_sets: Vec<FileSet>,
}

/// One directory tree contributing entries to an archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSet {
    /// Source directory, relative to the base directory.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Destination inside the archive root folder.
    #[serde(default)]
    pub output_directory: String,

    /// Glob patterns selecting files. Empty selects everything.
    #[serde(default)]
    pub includes: Vec<String>,

    /// Glob patterns removing files from the selection.
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Apply the standard SCM and editor excludes.
    #[serde(default = "default_true")]
    pub use_default_excludes: bool,
}

fn default_true() -> bool {
    true
}

fn default_directory() -> String {
    ".".to_string()
}

/// Loads descriptor templates.
pub trait DescriptorReader {
    /// Returns every template available for the given view, in order.
    fn read_descriptors(&self, config: &ConfigView<'_>) -> Result<Vec<Descriptor>, ReadError>;
}

/// Failures of a descriptor reader.
#[derive(Error, Debug)]
pub enum ReadError {
    /// A referenced descriptor could not be found or loaded.
    #[error("Cannot read descriptor '{reference}': {reason}")]
    Read {
        /// Descriptor reference or file
        reference: String,
        /// Reason for the error
        reason: String,
    },

    /// A descriptor file is not valid TOML for the descriptor model.
    #[error("Failed to parse descriptor {}: {source}", path.display())]
    Parse {
        /// Descriptor file
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// IO failure while reading descriptor files.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// File or directory being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The reader was asked for nothing it can serve.
    #[error("Invalid descriptor configuration: {0}")]
    InvalidConfiguration(String),
}
