//! Main packaging orchestration.
//!
//! This module provides the [`ProjectSources`] driver that gates, resolves,
//! produces and attaches source archives.

use super::gate::is_execution_root;
use crate::assembly::archiver::{ArchiveError, Archiver};
use crate::assembly::attach::ArtifactAttacher;
use crate::assembly::descriptor::{DescriptorReader, resolve};
use crate::assembly::error::{Error, Result};
use crate::assembly::formats::parse_formats;
use crate::assembly::job::{AssemblyJob, distribution_name};
use crate::assembly::settings::{ConfigView, Settings};
use std::fmt;
use std::path::PathBuf;

/// Why an invocation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The skip flag is set.
    Configuration,
    /// The invoking build unit is not the execution root.
    NotExecutionRoot,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => {
                f.write_str("Assemblies have been skipped per configuration of the skip parameter.")
            }
            Self::NotExecutionRoot => f.write_str(
                "Skipping the assembly in this project because it's not the execution root",
            ),
        }
    }
}

/// One archive produced and attached by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedArchive {
    /// Format the archive was produced in
    pub format: String,
    /// Classifier it was attached under
    pub classifier: String,
    /// Produced file
    pub path: PathBuf,
}

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was done; not an error.
    Skipped(SkipReason),
    /// Every requested format was produced and attached, in order.
    Completed(Vec<ProducedArchive>),
}

impl Outcome {
    /// Returns true for either skip condition.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    /// Archives produced by a completed run.
    pub fn archives(&self) -> &[ProducedArchive] {
        match self {
            Outcome::Skipped(_) => &[],
            Outcome::Completed(archives) => archives,
        }
    }
}

/// Packaging driver for one build unit.
///
/// Runs strictly sequentially: each format's archive is produced and
/// attached before the next format starts. The first error aborts the run;
/// archives already written for earlier formats stay on disk and stay
/// attached.
///
/// # Examples
///
/// ```no_run
/// use project_sources::assembly::{
///     DefaultDescriptorReader, FileTreeArchiver, ManifestAttacher, ProjectSources,
///     ProjectUnit, SettingsBuilder,
/// };
///
/// # fn example() -> project_sources::assembly::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project(ProjectUnit::new("myapp", Some("1.0.0".into())))
///     .basedir("/work/myapp")
///     .execution_root_directory("/work/myapp")
///     .formats("tar.gz,zip")
///     .build()?;
///
/// let reader = DefaultDescriptorReader::new();
/// let archiver = FileTreeArchiver::new();
/// let mut attacher = ManifestAttacher::new("/work/myapp/target/project-sources.artifacts.json");
///
/// let outcome = ProjectSources::new(&settings, &reader, &archiver, &mut attacher).execute()?;
/// for archive in outcome.archives() {
///     println!("{} -> {}", archive.format, archive.path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProjectSources<'a> {
    settings: &'a Settings,
    reader: &'a dyn DescriptorReader,
    archiver: &'a dyn Archiver,
    attacher: &'a mut dyn ArtifactAttacher,
}

impl<'a> ProjectSources<'a> {
    /// Creates a driver over the given settings and collaborators.
    pub fn new(
        settings: &'a Settings,
        reader: &'a dyn DescriptorReader,
        archiver: &'a dyn Archiver,
        attacher: &'a mut dyn ArtifactAttacher,
    ) -> Self {
        Self {
            settings,
            reader,
            archiver,
            attacher,
        }
    }

    /// Runs the packaging pipeline.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for a missing or malformed format list
    /// - [`Error::DescriptorRead`] / [`Error::MissingDescriptor`] when no
    ///   template can be obtained
    /// - [`Error::ArchiveCreation`] / [`Error::InvalidJob`] when producing an
    ///   archive fails
    /// - [`Error::ArtifactAttachment`] when attaching an archive fails
    pub fn execute(&mut self) -> Result<Outcome> {
        if self.settings.is_skip() {
            let reason = SkipReason::Configuration;
            log::info!("{}", reason);
            return Ok(Outcome::Skipped(reason));
        }

        let config = self.settings.archiver_config();
        let basedir = config.basedir().to_string_lossy();
        if !is_execution_root(&basedir, self.settings.execution_root_directory()) {
            let reason = SkipReason::NotExecutionRoot;
            log::info!("{}", reason);
            return Ok(Outcome::Skipped(reason));
        }

        let formats = parse_formats(self.settings.formats())?;
        formats.validate()?;
        log::debug!("Requested formats: {}", formats);

        let ambient = ConfigView::ambient(config);
        let job = resolve(self.reader, &ambient, formats)?;

        let full_name = distribution_name(&job, &ambient)
            .map_err(|e| archive_error(&job, &job.formats().to_string(), e))?;

        let root_folder = self.settings.root_folder_override();
        if let Some(folder) = root_folder {
            log::debug!(
                "Using archive root folder '{}' instead of '{}'",
                folder,
                config.final_name()
            );
        }

        let mut archives = Vec::with_capacity(job.formats().len());

        for format in job.formats() {
            let view = ConfigView::for_format(config, root_folder);

            let path = self
                .archiver
                .create_archive(&job, &full_name, format, &view, true)
                .map_err(|e| archive_error(&job, format, e))?;

            self.attacher
                .attach(config.project(), format, job.identity(), &path)
                .map_err(|e| Error::ArtifactAttachment {
                    format: format.clone(),
                    reason: format!("{:#}", e),
                })?;

            archives.push(ProducedArchive {
                format: format.clone(),
                classifier: job.identity().to_string(),
                path,
            });
        }

        Ok(Outcome::Completed(archives))
    }
}

fn archive_error(job: &AssemblyJob, format: &str, error: ArchiveError) -> Error {
    match error {
        ArchiveError::InvalidConfiguration(reason) => Error::InvalidJob {
            identity: job.identity().to_string(),
            reason,
        },
        source => Error::ArchiveCreation {
            format: format.to_string(),
            source,
        },
    }
}
