//! Top-level error types for the project-sources tool.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, SourcesError>;

/// Main error type for all tool operations
#[derive(Error, Debug)]
pub enum SourcesError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Archive assembly errors
    #[error("Assembly error: {0}")]
    Assembly(#[from] crate::assembly::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl SourcesError {
    /// Whether the failure stems from configuration rather than execution.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            SourcesError::Cli(CliError::InvalidArguments { .. }) | SourcesError::Toml(_) => true,
            SourcesError::Assembly(e) => e.is_configuration_error(),
            _ => false,
        }
    }

    /// Process exit code: 2 for configuration errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration_error() { 2 } else { 1 }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::assembly::Error as AssemblyError;

        match self {
            SourcesError::Assembly(AssemblyError::Configuration(_)) => vec![
                "Check the --formats value (or [package.metadata.project-sources] formats)".to_string(),
                "Every comma-separated format must be non-empty, e.g. \"tar.gz,zip\"".to_string(),
            ],
            SourcesError::Assembly(AssemblyError::InvalidJob { .. }) => vec![
                "Fix the assembly descriptor; retrying the build will not help".to_string(),
            ],
            SourcesError::Assembly(
                AssemblyError::DescriptorRead { .. } | AssemblyError::MissingDescriptor { .. },
            ) => vec![
                "Check the descriptor references and the --descriptor-dir contents".to_string(),
            ],
            SourcesError::Assembly(AssemblyError::ArchiveCreation { .. }) => vec![
                "Check free disk space and write permissions on the output directory".to_string(),
                "Archives produced for earlier formats are left in place".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
