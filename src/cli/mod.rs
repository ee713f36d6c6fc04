//! Command line interface for project-sources.
//!
//! Wires the manifest options, the command line flags and the default
//! collaborators into a single packaging run.

mod args;

pub use args::Args;

use crate::assembly::{
    DefaultDescriptorReader, FileTreeArchiver, ManifestAttacher, Outcome, ProjectSources, Settings,
    SettingsBuilder,
};
use crate::error::{CliError, Result, SourcesError};
use crate::metadata::{self, ProjectManifest};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Formats produced when neither the command line nor the manifest name any.
pub const DEFAULT_FORMATS: &str = "tar.gz";

/// File name of the attached-artifact manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "project-sources.artifacts.json";

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args)
}

/// Run one packaging invocation for already-parsed arguments.
pub fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| SourcesError::Cli(CliError::InvalidArguments { reason }))?;

    let basedir = absolute(&args.basedir)?;
    let cargo_toml = basedir.join("Cargo.toml");
    if !cargo_toml.is_file() {
        return Err(SourcesError::Cli(CliError::InvalidArguments {
            reason: format!("No Cargo.toml found in {}", basedir.display()),
        }));
    }

    let manifest = metadata::load_manifest(&cargo_toml)?;
    let settings = build_settings(args, &basedir, &manifest)?;
    let config = settings.archiver_config();

    let manifest_path = match &args.manifest {
        Some(path) => absolute(path)?,
        None => config.output_directory().join(MANIFEST_FILE_NAME),
    };
    if manifest_path.starts_with(&basedir) && !manifest_path.starts_with(config.output_directory()) {
        return Err(SourcesError::Cli(CliError::InvalidArguments {
            reason: format!(
                "Manifest {} lies inside the packaged tree; place it under the output directory",
                manifest_path.display()
            ),
        }));
    }

    let reader = DefaultDescriptorReader::new();
    let archiver = FileTreeArchiver::new();
    let mut attacher = ManifestAttacher::new(&manifest_path).dry_run(config.is_dry_run());

    let outcome = ProjectSources::new(&settings, &reader, &archiver, &mut attacher).execute()?;

    match outcome {
        Outcome::Skipped(reason) => println!("{}", reason),
        Outcome::Completed(archives) => {
            for archive in &archives {
                println!("{:<8} {}", archive.format, archive.path.display());
            }
            if !config.is_dry_run() {
                println!("Manifest: {}", manifest_path.display());
            }
        }
    }

    Ok(0)
}

/// Merge command line flags over manifest options over built-in defaults.
pub fn build_settings(args: &Args, basedir: &Path, manifest: &ProjectManifest) -> Result<Settings> {
    let options = &manifest.options;

    let execution_root = match &args.execution_root {
        Some(dir) => absolute(dir)?,
        None => absolute(&std::env::current_dir()?)?,
    };

    let formats = args
        .formats
        .clone()
        .or_else(|| options.formats.as_ref().map(|f| f.to_raw()))
        .unwrap_or_else(|| DEFAULT_FORMATS.to_string());

    let mut builder = SettingsBuilder::new()
        .project(manifest.project.clone())
        .basedir(basedir)
        .execution_root_directory(execution_root.to_string_lossy().into_owned())
        .formats(formats)
        .skip(args.skip || options.skip.unwrap_or(false))
        .tar_long_file_mode(args.tar_long_file_mode)
        .ignore_permissions(args.ignore_permissions)
        .dry_run(args.dry_run);

    if let Some(name) = args.final_name.as_ref().or(options.final_name.as_ref()) {
        builder = builder.final_name(name.as_str());
    }

    if let Some(folder) = args.root_folder.as_ref().or(options.root_folder.as_ref()) {
        builder = builder.assembly_root_folder(folder.as_str());
    }

    if let Some(dir) = &args.output_dir {
        builder = builder.output_directory(absolute(dir)?);
    } else if let Some(dir) = &options.output_directory {
        builder = builder.output_directory(absolute(&basedir.join(dir))?);
    }

    if let Some(dir) = &args.descriptor_dir {
        builder = builder.descriptor_source_directory(absolute(dir)?);
    }

    Ok(builder.build()?)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}
