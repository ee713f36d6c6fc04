//! Project identity and packaging options from a single Cargo.toml

use crate::assembly::ProjectUnit;
use crate::error::{CliError, Result, SourcesError};
use serde::Deserialize;
use std::path::Path;

/// Packaging options from `[package.metadata.project-sources]` or
/// `[workspace.metadata.project-sources]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SourcesMetadata {
    /// Output formats, as a comma-separated string or an array
    pub formats: Option<FormatsValue>,

    /// Disable packaging for this project
    pub skip: Option<bool>,

    /// Root folder name inside the archives
    pub root_folder: Option<String>,

    /// Base name of the produced archives
    pub final_name: Option<String>,

    /// Output directory, relative to the manifest's directory
    pub output_directory: Option<String>,
}

/// Formats as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormatsValue {
    /// `formats = "tar.gz,zip"`
    Single(String),
    /// `formats = ["tar.gz", "zip"]`
    List(Vec<String>),
}

impl FormatsValue {
    /// Comma-separated form understood by the format parser
    pub fn to_raw(&self) -> String {
        match self {
            FormatsValue::Single(raw) => raw.clone(),
            FormatsValue::List(list) => list.join(","),
        }
    }
}

/// Complete manifest data from Cargo.toml
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    /// Owning build unit
    pub project: ProjectUnit,

    /// Packaging options, defaulted when the table is absent
    pub options: SourcesMetadata,
}

/// Load project identity and packaging options from Cargo.toml (single read + parse)
///
/// A virtual workspace manifest has no `[package]`; the directory name then
/// stands in for the project name and `[workspace.package].version` for the
/// version.
pub fn load_manifest(cargo_toml_path: &Path) -> Result<ProjectManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        SourcesError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    let toml_value: toml::Value = toml::from_str(&manifest).map_err(|e| {
        SourcesError::Cli(CliError::ExecutionFailed {
            command: "parse_cargo_toml".to_string(),
            reason: format!("Failed to parse {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    let package = toml_value.get("package");
    let workspace = toml_value.get("workspace");

    if package.is_none() && workspace.is_none() {
        return Err(SourcesError::Cli(CliError::InvalidArguments {
            reason: format!(
                "No [package] or [workspace] section in {}",
                cargo_toml_path.display()
            ),
        }));
    }

    let name = match package {
        Some(package) => package
            .get("name")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| {
                SourcesError::Cli(CliError::InvalidArguments {
                    reason: "Missing 'name' in [package]".to_string(),
                })
            })?,
        None => directory_name(cargo_toml_path)?,
    };

    // `version.workspace = true` is a table, so it falls through to the workspace version
    let version = package
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .or_else(|| {
            workspace
                .and_then(|w| w.get("package"))
                .and_then(|p| p.get("version"))
                .and_then(|v| v.as_str())
        })
        .map(String::from);

    let options = parse_sources_metadata(package, workspace)?;

    Ok(ProjectManifest {
        project: ProjectUnit::new(name, version),
        options,
    })
}

/// Parse the `project-sources` metadata table, package level first
fn parse_sources_metadata(
    package: Option<&toml::Value>,
    workspace: Option<&toml::Value>,
) -> Result<SourcesMetadata> {
    let table = [package, workspace]
        .into_iter()
        .flatten()
        .find_map(|section| section.get("metadata").and_then(|m| m.get("project-sources")));

    match table {
        Some(table) => table.clone().try_into().map_err(|e: toml::de::Error| {
            SourcesError::Cli(CliError::InvalidArguments {
                reason: format!("Invalid [metadata.project-sources] table: {}", e),
            })
        }),
        None => {
            log::debug!("No project-sources metadata table; using defaults");
            Ok(SourcesMetadata::default())
        }
    }
}

fn directory_name(cargo_toml_path: &Path) -> Result<String> {
    cargo_toml_path
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SourcesError::Cli(CliError::InvalidArguments {
                reason: format!(
                    "Cannot derive a project name from {}",
                    cargo_toml_path.display()
                ),
            })
        })
}
