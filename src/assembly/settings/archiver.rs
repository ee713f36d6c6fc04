//! Ambient archiver configuration.

use super::{ProjectUnit, TarLongFileMode};
use std::path::{Path, PathBuf};

/// Ambient configuration consumed by the descriptor reader and the archiver.
///
/// Constructed once per invocation by [`SettingsBuilder`](super::SettingsBuilder)
/// and never mutated afterwards. Collaborators see it through a
/// [`ConfigView`](super::ConfigView).
#[derive(Clone, Debug)]
pub struct ArchiverConfig {
    /// Build unit owning the produced archives.
    pub(super) project: ProjectUnit,

    /// Base directory of the build unit.
    pub(super) basedir: PathBuf,

    /// Directory receiving the finished archives.
    ///
    /// Default: `<basedir>/target`
    pub(super) output_directory: PathBuf,

    /// Scratch directory for archives under construction.
    ///
    /// Default: `<output>/projectsrc-archive-tmp`
    pub(super) temporary_root_directory: PathBuf,

    /// Directory for unpacked inputs.
    ///
    /// Default: `<output>/projectsrc-work`
    pub(super) working_directory: PathBuf,

    /// Base name of the produced archives and default archive root folder.
    pub(super) final_name: String,

    /// Classifier appended to the distribution name when the assembly id is
    /// not appended.
    pub(super) classifier: Option<String>,

    /// Whether the assembly id is appended to the distribution name.
    pub(super) assembly_id_appended: bool,

    /// Character encoding of archive entry names.
    pub(super) encoding: Option<String>,

    /// Long file name handling for tar formats.
    pub(super) tar_long_file_mode: TarLongFileMode,

    /// Write normalized permissions instead of the on-disk modes.
    pub(super) ignore_permissions: bool,

    /// Log the archive contents without writing anything.
    pub(super) dry_run: bool,

    /// Include the generated site directory.
    pub(super) site_included: bool,

    /// Location of the generated site.
    pub(super) site_directory: Option<PathBuf>,

    /// Built-in descriptors to read, in order.
    pub(super) descriptor_references: Vec<String>,

    /// Directory holding additional descriptor files.
    pub(super) descriptor_source_directory: Option<PathBuf>,

    /// Name `dir` outputs without the `.dir` extension.
    pub(super) ignore_dir_format_extensions: bool,
}

impl ArchiverConfig {
    /// Returns the owning build unit.
    pub fn project(&self) -> &ProjectUnit {
        &self.project
    }

    /// Returns the base directory.
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// Returns the output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the temporary root directory.
    pub fn temporary_root_directory(&self) -> &Path {
        &self.temporary_root_directory
    }

    /// Returns the working directory.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Returns the final name.
    pub fn final_name(&self) -> &str {
        &self.final_name
    }

    /// Returns the configured classifier.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Returns whether the job identity is appended to the distribution name.
    pub fn is_assembly_id_appended(&self) -> bool {
        self.assembly_id_appended
    }

    /// Returns the configured entry name encoding.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Returns the tar long file name handling mode.
    pub fn tar_long_file_mode(&self) -> TarLongFileMode {
        self.tar_long_file_mode
    }

    /// Returns whether on-disk permissions are replaced by normalized modes.
    pub fn is_ignore_permissions(&self) -> bool {
        self.ignore_permissions
    }

    /// Returns whether archives are only listed, not written.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether the site directory is packaged.
    pub fn is_site_included(&self) -> bool {
        self.site_included
    }

    /// Returns the site directory, if any.
    pub fn site_directory(&self) -> Option<&Path> {
        self.site_directory.as_deref()
    }

    /// Returns the built-in descriptor references, in order.
    pub fn descriptor_references(&self) -> &[String] {
        &self.descriptor_references
    }

    /// Returns the directory holding additional descriptor files.
    pub fn descriptor_source_directory(&self) -> Option<&Path> {
        self.descriptor_source_directory.as_deref()
    }

    /// Returns whether `dir` outputs drop the `.dir` extension.
    pub fn is_ignore_dir_format_extensions(&self) -> bool {
        self.ignore_dir_format_extensions
    }
}
