//! Error taxonomy for the archive assembly pipeline.
//!
//! Every variant is fatal for the current invocation. The two skip conditions
//! (explicit skip flag, not the execution root) are outcomes, not errors, and
//! never appear here.

use thiserror::Error;

use super::archiver::ArchiveError;
use super::descriptor::ReadError;

/// Result type alias for assembly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the packaging driver to the invoking build.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing required input, detected before any I/O.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The descriptor reader failed.
    #[error("Error reading assemblies: {source}")]
    DescriptorRead {
        /// Underlying reader failure
        #[source]
        source: ReadError,
    },

    /// The descriptor reader returned nothing.
    #[error("Cannot read '{reference}' assembly descriptor!")]
    MissingDescriptor {
        /// Descriptor reference that produced no result
        reference: String,
    },

    /// Writing the archive for one format failed.
    #[error("Failed to create assembly in format '{format}': {source}")]
    ArchiveCreation {
        /// Format whose production failed
        format: String,
        /// Underlying archiver failure
        #[source]
        source: ArchiveError,
    },

    /// The resolved job is structurally inconsistent.
    ///
    /// Fixing the descriptor is the remedy; retrying the build is not.
    #[error("Assembly: {identity} is not configured correctly: {reason}")]
    InvalidJob {
        /// Identity of the offending job
        identity: String,
        /// What is wrong with it
        reason: String,
    },

    /// The artifact attacher rejected a produced archive.
    #[error("Failed to attach '{format}' artifact: {reason}")]
    ArtifactAttachment {
        /// Format of the archive being attached
        format: String,
        /// Attacher's failure message
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure is a configuration problem rather than an
    /// execution problem.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::InvalidJob { .. })
    }
}

/// Convenience trait for turning absent values into configuration errors.
pub trait Context<T> {
    /// Converts `None` into [`Error::Configuration`] with the given message.
    fn context(self, message: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: &str) -> Result<T> {
        self.ok_or_else(|| Error::Configuration(message.to_string()))
    }
}
