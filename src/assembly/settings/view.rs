//! Read-only configuration view with an optional root folder overlay.

use super::{ArchiverConfig, ProjectUnit, TarLongFileMode};
use std::path::Path;

/// The configuration handed to collaborators.
///
/// Every accessor delegates to the ambient [`ArchiverConfig`] except
/// [`final_name`](Self::final_name), which returns the overlay when one is
/// present. The ambient configuration is only borrowed, never modified.
#[derive(Debug, Clone, Copy)]
pub struct ConfigView<'a> {
    ambient: &'a ArchiverConfig,
    final_name: Option<&'a str>,
}

impl<'a> ConfigView<'a> {
    /// View of the ambient configuration with nothing overlaid.
    pub fn ambient(config: &'a ArchiverConfig) -> Self {
        Self {
            ambient: config,
            final_name: None,
        }
    }

    /// View used for producing one archive format.
    ///
    /// An absent or empty override, or one equal to the ambient final name,
    /// yields the plain ambient view.
    pub fn for_format(config: &'a ArchiverConfig, override_name: Option<&'a str>) -> Self {
        let final_name = override_name.filter(|name| !name.is_empty() && *name != config.final_name());
        Self {
            ambient: config,
            final_name,
        }
    }

    /// Whether the final name is overlaid.
    pub fn is_overridden(&self) -> bool {
        self.final_name.is_some()
    }

    /// The ambient configuration behind this view.
    pub fn ambient_config(&self) -> &'a ArchiverConfig {
        self.ambient
    }

    /// Final name, which doubles as the archive root folder.
    pub fn final_name(&self) -> &'a str {
        self.final_name.unwrap_or_else(|| self.ambient.final_name())
    }

    /// Owning build unit.
    pub fn project(&self) -> &'a ProjectUnit {
        self.ambient.project()
    }

    /// Base directory of the packaged tree.
    pub fn basedir(&self) -> &'a Path {
        self.ambient.basedir()
    }

    /// Directory receiving the archives.
    pub fn output_directory(&self) -> &'a Path {
        self.ambient.output_directory()
    }

    /// Directory holding staged archives.
    pub fn temporary_root_directory(&self) -> &'a Path {
        self.ambient.temporary_root_directory()
    }

    /// Unpack work directory.
    pub fn working_directory(&self) -> &'a Path {
        self.ambient.working_directory()
    }

    /// Configured classifier.
    pub fn classifier(&self) -> Option<&'a str> {
        self.ambient.classifier()
    }

    /// Whether the job identity is appended to the distribution name.
    pub fn is_assembly_id_appended(&self) -> bool {
        self.ambient.is_assembly_id_appended()
    }

    /// Entry name encoding.
    pub fn encoding(&self) -> Option<&'a str> {
        self.ambient.encoding()
    }

    /// Tar long file name handling mode.
    pub fn tar_long_file_mode(&self) -> TarLongFileMode {
        self.ambient.tar_long_file_mode()
    }

    /// Whether on-disk permissions are replaced by normalized modes.
    pub fn is_ignore_permissions(&self) -> bool {
        self.ambient.is_ignore_permissions()
    }

    /// Whether archives are only listed, not written.
    pub fn is_dry_run(&self) -> bool {
        self.ambient.is_dry_run()
    }

    /// Whether the site directory is packaged.
    pub fn is_site_included(&self) -> bool {
        self.ambient.is_site_included()
    }

    /// Site directory, if any.
    pub fn site_directory(&self) -> Option<&'a Path> {
        self.ambient.site_directory()
    }

    /// Built-in descriptor references, in order.
    pub fn descriptor_references(&self) -> &'a [String] {
        self.ambient.descriptor_references()
    }

    /// Directory holding additional descriptor files.
    pub fn descriptor_source_directory(&self) -> Option<&'a Path> {
        self.ambient.descriptor_source_directory()
    }

    /// Whether `dir` outputs drop the `.dir` extension.
    pub fn is_ignore_dir_format_extensions(&self) -> bool {
        self.ambient.is_ignore_dir_format_extensions()
    }
}

impl<'a> From<&'a ArchiverConfig> for ConfigView<'a> {
    fn from(config: &'a ArchiverConfig) -> Self {
        Self::ambient(config)
    }
}
