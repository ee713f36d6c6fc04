//! Source archive packager for Rust projects
//!
//! This library packages the complete source tree of a project into one or
//! more archives and records each archive as a build output classified
//! `project-sources`. Packaging only fires for the execution root of a build,
//! so every member of a workspace can run it and exactly one archive set is
//! produced.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod assembly;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, Result, SourcesError};
