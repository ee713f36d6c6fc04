//! Default descriptor reader: built-in references plus descriptor files.

use super::{Descriptor, DescriptorReader, ReadError, builtin_descriptor};
use crate::assembly::settings::ConfigView;
use std::path::{Path, PathBuf};

/// Reads built-in descriptors by reference, then every `*.toml` descriptor
/// file in the configured source directory, sorted by file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDescriptorReader;

impl DefaultDescriptorReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorReader for DefaultDescriptorReader {
    fn read_descriptors(&self, config: &ConfigView<'_>) -> Result<Vec<Descriptor>, ReadError> {
        let references = config.descriptor_references();
        let source_directory = config.descriptor_source_directory();

        if references.is_empty() && source_directory.is_none() {
            return Err(ReadError::InvalidConfiguration(
                "No descriptor references or descriptor source directory configured".to_string(),
            ));
        }

        let mut descriptors = Vec::with_capacity(references.len());

        for reference in references {
            let descriptor = builtin_descriptor(reference).ok_or_else(|| ReadError::Read {
                reference: reference.clone(),
                reason: "no built-in descriptor with this name".to_string(),
            })?;
            log::debug!("Loaded built-in descriptor '{}'", reference);
            descriptors.push(descriptor);
        }

        if let Some(dir) = source_directory {
            for path in descriptor_files(dir)? {
                descriptors.push(read_descriptor_file(&path)?);
            }
        }

        Ok(descriptors)
    }
}

/// Lists descriptor files in `dir`, sorted by file name.
fn descriptor_files(dir: &Path) -> Result<Vec<PathBuf>, ReadError> {
    let io_error = |source| ReadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_descriptor_file(path: &Path) -> Result<Descriptor, ReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptor = toml::from_str(&content).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded descriptor file {}", path.display());
    Ok(descriptor)
}
