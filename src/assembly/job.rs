//! The resolved unit of work and its distribution name.

use super::archiver::ArchiveError;
use super::descriptor::Descriptor;
use super::formats::Formats;
use super::settings::ConfigView;

/// A descriptor template stamped with identity and formats.
///
/// Built once per invocation by [`resolve`](super::descriptor::resolve) and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct AssemblyJob {
    template: Descriptor,
    formats: Formats,
}

impl AssemblyJob {
    /// Stamps `identity` and `formats` onto `template`.
    pub fn new(mut template: Descriptor, identity: impl Into<String>, formats: Formats) -> Self {
        template.id = identity.into();
        template.formats = formats.to_vec();
        Self { template, formats }
    }

    /// Classifier distinguishing this job's outputs.
    pub fn identity(&self) -> &str {
        &self.template.id
    }

    /// Requested formats, in order.
    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    /// The stamped descriptor.
    pub fn template(&self) -> &Descriptor {
        &self.template
    }
}

/// Computes the base file name of the archives produced for `job`.
///
/// `<final-name>-<identity>` when the assembly id is appended and non-empty,
/// `<final-name>-<classifier>` when it is not appended but a classifier is
/// configured, otherwise the bare final name.
pub fn distribution_name(job: &AssemblyJob, config: &ConfigView<'_>) -> Result<String, ArchiveError> {
    let final_name = config.final_name();

    if final_name.is_empty() {
        return Err(ArchiveError::Formatting(
            "final name must not be empty".to_string(),
        ));
    }
    if final_name.contains(['/', '\\']) {
        return Err(ArchiveError::Formatting(format!(
            "final name '{}' must not contain path separators",
            final_name
        )));
    }

    let name = if config.is_assembly_id_appended() {
        if job.identity().is_empty() {
            final_name.to_string()
        } else {
            format!("{}-{}", final_name, job.identity())
        }
    } else if let Some(classifier) = config.classifier() {
        format!("{}-{}", final_name, classifier)
    } else {
        final_name.to_string()
    };

    Ok(name)
}
