//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation of paths that must exist before packaging starts.

use crate::assembly::TarLongFileMode;
use clap::Parser;
use std::path::PathBuf;

/// Source archive packager for Rust projects
#[derive(Parser, Debug)]
#[command(
    name = "project-sources",
    version,
    about = "Packages a project's full source tree into distributable archives",
    long_about = "Packages the complete source tree of a project into one or more archives
(tar.gz by default) and records each one in an attached-artifact manifest.

Runs only when the project directory is the execution root of the build, so it
can be invoked from every workspace member and still fire exactly once.

Usage:
  project-sources
  project-sources --formats tar.gz,zip --root-folder myapp
  project-sources --basedir crates/core --execution-root .

Exit code 0 = archives produced, or packaging skipped."
)]
pub struct Args {
    /// Base directory of the project to package
    #[arg(short = 'b', long, value_name = "DIR", default_value = ".")]
    pub basedir: PathBuf,

    /// Directory the whole build was invoked against (default: current directory)
    #[arg(long, value_name = "DIR", env = "PROJECT_SRC_EXECUTION_ROOT")]
    pub execution_root: Option<PathBuf>,

    /// Comma-separated archive formats: zip, jar, tar, tar.gz, tgz, dir (default: tar.gz)
    #[arg(short, long, value_name = "FORMATS", env = "PROJECT_SRC_FORMATS")]
    pub formats: Option<String>,

    /// Skip packaging entirely
    #[arg(long, env = "PROJECT_SRC_SKIP")]
    pub skip: bool,

    /// Root folder name inside the archives (default: the final name)
    #[arg(long, value_name = "NAME", env = "PROJECT_SRC_ROOT_FOLDER")]
    pub root_folder: Option<String>,

    /// Base name of the archives (default: <name>-<version>)
    #[arg(long, value_name = "NAME")]
    pub final_name: Option<String>,

    /// Directory receiving the archives (default: <basedir>/target)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List archive contents without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Store normalized permissions instead of on-disk modes
    #[arg(long)]
    pub ignore_permissions: bool,

    /// Directory with additional *.toml assembly descriptors
    #[arg(long, value_name = "DIR")]
    pub descriptor_dir: Option<PathBuf>,

    /// Tar long file name handling: gnu, warn, fail
    #[arg(long, value_name = "MODE", default_value = "gnu")]
    pub tar_long_file_mode: TarLongFileMode,

    /// Attached-artifact manifest path (default: <output>/project-sources.artifacts.json)
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.basedir.is_dir() {
            return Err(format!(
                "Base directory does not exist: {}",
                self.basedir.display()
            ));
        }

        if let Some(dir) = &self.descriptor_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Descriptor directory does not exist: {}",
                    dir.display()
                ));
            }
        }

        if let Some(name) = &self.final_name {
            if name.trim().is_empty() {
                return Err("Final name cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
