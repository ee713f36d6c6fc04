//! Builder for constructing Settings.

use super::{ArchiverConfig, ProjectUnit, Settings, TarLongFileMode};
use crate::assembly::PROJECT_DESCRIPTOR;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Directories that are not set explicitly are derived from the base
/// directory: `<basedir>/target` for output, with the temporary and working
/// directories nested below it.
///
/// # Examples
///
/// ```no_run
/// use project_sources::assembly::{ProjectUnit, SettingsBuilder, TarLongFileMode};
///
/// # fn example() -> project_sources::assembly::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project(ProjectUnit::new("myapp", Some("1.0.0".into())))
///     .basedir("/work/myapp")
///     .execution_root_directory("/work/myapp")
///     .formats("tar.gz")
///     .assembly_root_folder("myapp")
///     .tar_long_file_mode(TarLongFileMode::Fail)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project: Option<ProjectUnit>,
    basedir: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    temporary_root_directory: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    final_name: Option<String>,
    classifier: Option<String>,
    assembly_id_appended: Option<bool>,
    encoding: Option<String>,
    tar_long_file_mode: TarLongFileMode,
    ignore_permissions: bool,
    dry_run: bool,
    site_included: bool,
    site_directory: Option<PathBuf>,
    descriptor_references: Option<Vec<String>>,
    descriptor_source_directory: Option<PathBuf>,
    ignore_dir_format_extensions: bool,
    skip: bool,
    formats: Option<String>,
    assembly_root_folder: Option<String>,
    execution_root_directory: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the owning build unit.
    ///
    /// # Required
    pub fn project(mut self, project: ProjectUnit) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the base directory of the build unit.
    ///
    /// # Required
    pub fn basedir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.basedir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory of the whole build's execution root.
    ///
    /// # Required
    pub fn execution_root_directory(mut self, dir: impl Into<String>) -> Self {
        self.execution_root_directory = Some(dir.into());
        self
    }

    /// Sets the output directory.
    ///
    /// Default: `<basedir>/target`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the temporary root directory.
    ///
    /// Default: `<output>/projectsrc-archive-tmp`
    pub fn temporary_root_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temporary_root_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the working directory.
    ///
    /// Default: `<output>/projectsrc-work`
    pub fn working_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the final name.
    ///
    /// Default: `<name>-<version>`
    pub fn final_name(mut self, name: impl Into<String>) -> Self {
        self.final_name = Some(name.into());
        self
    }

    pub fn classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Default: true
    pub fn assembly_id_appended(mut self, appended: bool) -> Self {
        self.assembly_id_appended = Some(appended);
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Default: [`TarLongFileMode::Gnu`]
    pub fn tar_long_file_mode(mut self, mode: TarLongFileMode) -> Self {
        self.tar_long_file_mode = mode;
        self
    }

    pub fn ignore_permissions(mut self, ignore: bool) -> Self {
        self.ignore_permissions = ignore;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Includes the site directory in the archives.
    pub fn site_included(mut self, included: bool) -> Self {
        self.site_included = included;
        self
    }

    /// Default: `<output>/site`
    pub fn site_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.site_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: `["project"]`
    pub fn descriptor_references(mut self, references: Vec<String>) -> Self {
        self.descriptor_references = Some(references);
        self
    }

    pub fn descriptor_source_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.descriptor_source_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn ignore_dir_format_extensions(mut self, ignore: bool) -> Self {
        self.ignore_dir_format_extensions = ignore;
        self
    }

    /// Disables packaging.
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the raw comma-separated format list.
    ///
    /// Left unset, the driver fails with a configuration error.
    pub fn formats(mut self, formats: impl Into<String>) -> Self {
        self.formats = Some(formats.into());
        self
    }

    /// Sets the root folder name used inside the archives.
    pub fn assembly_root_folder(mut self, folder: impl Into<String>) -> Self {
        self.assembly_root_folder = Some(folder.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if required fields are missing:
    /// - `project`
    /// - `basedir`
    /// - `execution_root_directory`
    pub fn build(self) -> crate::assembly::Result<Settings> {
        use crate::assembly::error::Context;

        let project = self.project.context("project is required")?;
        let basedir = self.basedir.context("basedir is required")?;
        let execution_root_directory = self
            .execution_root_directory
            .context("execution_root_directory is required")?;

        let output_directory = self
            .output_directory
            .unwrap_or_else(|| basedir.join("target"));
        let temporary_root_directory = self
            .temporary_root_directory
            .unwrap_or_else(|| output_directory.join("projectsrc-archive-tmp"));
        let working_directory = self
            .working_directory
            .unwrap_or_else(|| output_directory.join("projectsrc-work"));
        let site_directory = self
            .site_directory
            .or_else(|| self.site_included.then(|| output_directory.join("site")));
        let final_name = self
            .final_name
            .unwrap_or_else(|| project.default_final_name());

        let archiver = ArchiverConfig {
            project,
            basedir,
            output_directory,
            temporary_root_directory,
            working_directory,
            final_name,
            classifier: self.classifier,
            assembly_id_appended: self.assembly_id_appended.unwrap_or(true),
            encoding: self.encoding,
            tar_long_file_mode: self.tar_long_file_mode,
            ignore_permissions: self.ignore_permissions,
            dry_run: self.dry_run,
            site_included: self.site_included,
            site_directory,
            descriptor_references: self
                .descriptor_references
                .unwrap_or_else(|| vec![PROJECT_DESCRIPTOR.to_string()]),
            descriptor_source_directory: self.descriptor_source_directory,
            ignore_dir_format_extensions: self.ignore_dir_format_extensions,
        };

        Ok(Settings::new(
            archiver,
            self.skip,
            self.formats,
            self.assembly_root_folder,
            execution_root_directory,
        ))
    }
}
