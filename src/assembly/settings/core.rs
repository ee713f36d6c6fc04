//! Core Settings struct and implementations.

use super::ArchiverConfig;

/// Complete input of one packaging invocation.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use project_sources::assembly::{ProjectUnit, SettingsBuilder};
///
/// # fn example() -> project_sources::assembly::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project(ProjectUnit::new("myapp", Some("1.0.0".into())))
///     .basedir("/work/myapp")
///     .execution_root_directory("/work/myapp")
///     .formats("tar.gz,zip")
///     .build()?;
/// assert_eq!(settings.archiver_config().final_name(), "myapp-1.0.0");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Ambient archiver configuration.
    archiver: ArchiverConfig,

    /// Skip packaging entirely.
    skip: bool,

    /// Raw comma-separated format list, as supplied.
    formats: Option<String>,

    /// Root folder name inside the archives.
    ///
    /// None means the final name is used.
    assembly_root_folder: Option<String>,

    /// Directory the whole build was invoked against.
    execution_root_directory: String,
}

impl Settings {
    /// Returns the ambient archiver configuration.
    pub fn archiver_config(&self) -> &ArchiverConfig {
        &self.archiver
    }

    /// Returns true if packaging is disabled by configuration.
    pub fn is_skip(&self) -> bool {
        self.skip
    }

    /// Returns the raw format list.
    pub fn formats(&self) -> Option<&str> {
        self.formats.as_deref()
    }

    /// Returns the configured archive root folder.
    pub fn assembly_root_folder(&self) -> Option<&str> {
        self.assembly_root_folder.as_deref()
    }

    /// Returns the execution root directory.
    pub fn execution_root_directory(&self) -> &str {
        &self.execution_root_directory
    }

    /// Returns the root folder overlay, if one differs from the final name.
    pub fn root_folder_override(&self) -> Option<&str> {
        self.assembly_root_folder
            .as_deref()
            .filter(|folder| !folder.is_empty() && *folder != self.archiver.final_name())
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        archiver: ArchiverConfig,
        skip: bool,
        formats: Option<String>,
        assembly_root_folder: Option<String>,
        execution_root_directory: String,
    ) -> Self {
        Self {
            archiver,
            skip,
            formats,
            assembly_root_folder,
            execution_root_directory,
        }
    }
}
