//! Built-in descriptor templates.

use super::{Descriptor, FileSet};
use crate::assembly::PROJECT_DESCRIPTOR;

/// Returns the built-in descriptor registered under `reference`.
///
/// Only `project` is built in: the entire project tree minus log files and
/// build output.
pub fn builtin_descriptor(reference: &str) -> Option<Descriptor> {
    match reference {
        PROJECT_DESCRIPTOR => Some(Descriptor {
            id: PROJECT_DESCRIPTOR.to_string(),
            formats: vec!["tar.gz".into(), "zip".into()],
            include_base_directory: true,
            base_directory: None,
            file_sets: vec![FileSet {
                directory: ".".into(),
                output_directory: "/".into(),
                includes: Vec::new(),
                excludes: vec!["**/*.log".into(), "**/target/**".into()],
                use_default_excludes: true,
            }],
        }),
        _ => None,
    }
}
