//! Resolution of a descriptor template into an assembly job.

use super::DescriptorReader;
use crate::assembly::error::{Error, Result};
use crate::assembly::formats::Formats;
use crate::assembly::job::AssemblyJob;
use crate::assembly::settings::ConfigView;
use crate::assembly::{CLASSIFIER, PROJECT_DESCRIPTOR};

/// Reads the configured templates and stamps the first one into a job.
///
/// Any further templates returned by the reader are ignored. Both a reader
/// failure and an empty result abort the invocation; the templates are
/// static configuration, so nothing is retried.
pub fn resolve(
    reader: &dyn DescriptorReader,
    config: &ConfigView<'_>,
    formats: Formats,
) -> Result<AssemblyJob> {
    let descriptors = reader.read_descriptors(config).map_err(|source| match source {
        super::ReadError::InvalidConfiguration(reason) => {
            Error::Configuration(format!("Descriptor configuration is invalid: {}", reason))
        }
        source => Error::DescriptorRead { source },
    })?;

    let total = descriptors.len();
    let template = descriptors
        .into_iter()
        .next()
        .ok_or_else(|| Error::MissingDescriptor {
            reference: template_name(config),
        })?;

    if total > 1 {
        log::debug!(
            "Descriptor reader returned {} templates; using '{}'",
            total,
            template.id
        );
    }

    Ok(AssemblyJob::new(template, CLASSIFIER, formats))
}

fn template_name(config: &ConfigView<'_>) -> String {
    match config.descriptor_references() {
        [] => PROJECT_DESCRIPTOR.to_string(),
        references => references.join(", "),
    }
}
