//! Shared helpers for archive production.

pub mod fs;
