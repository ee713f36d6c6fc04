//! Packaging orchestration.
//!
//! This module provides the [`ProjectSources`] driver that turns one
//! invocation's [`Settings`](crate::assembly::Settings) into attached archives.
//!
//! # Overview
//!
//! The driver:
//! 1. Honors the skip flag and the execution root gate
//! 2. Parses and validates the requested formats
//! 3. Resolves the descriptor template into an assembly job
//! 4. Produces one archive per format, in order
//! 5. Attaches each archive as soon as it exists
//!
//! # Module Organization
//!
//! - [`gate`] - Execution root detection
//! - [`orchestrator`] - The [`ProjectSources`] driver and its [`Outcome`]

mod gate;
mod orchestrator;

pub use gate::is_execution_root;
pub use orchestrator::{Outcome, ProducedArchive, ProjectSources, SkipReason};
