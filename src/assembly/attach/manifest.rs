//! JSON manifest of attached artifacts.

use super::{ArtifactAttacher, calculate_sha256};
use crate::assembly::settings::ProjectUnit;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One attached archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedArtifact {
    /// Owning project name
    pub project: String,
    /// Owning project version
    pub version: Option<String>,
    /// Archive format, which doubles as the artifact type
    pub format: String,
    /// Artifact classifier
    pub classifier: String,
    /// Location of the archive
    pub path: PathBuf,
    /// Size in bytes; None in dry runs
    pub size: Option<u64>,
    /// Hex SHA-256; None in dry runs
    pub sha256: Option<String>,
    /// When the artifact was attached
    pub attached_at: DateTime<Utc>,
}

/// Serialized form of the manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Attached artifacts in attachment order
    pub artifacts: Vec<AttachedArtifact>,
}

/// Attacher that records every attachment in a JSON manifest.
///
/// The manifest file is rewritten after each attachment, so an aborted run
/// still describes exactly the archives that were attached before the
/// failure. In dry-run mode nothing is hashed or written.
#[derive(Debug)]
pub struct ManifestAttacher {
    manifest_path: PathBuf,
    manifest: ArtifactManifest,
    dry_run: bool,
}

impl ManifestAttacher {
    /// Creates an attacher writing to `manifest_path`.
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            manifest: ArtifactManifest::default(),
            dry_run: false,
        }
    }

    /// Records attachments without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the manifest file location.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the artifacts attached so far.
    pub fn artifacts(&self) -> &[AttachedArtifact] {
        &self.manifest.artifacts
    }

    fn write_manifest(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.manifest_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.manifest)?;
        std::fs::write(&self.manifest_path, json)
            .with_context(|| format!("writing {}", self.manifest_path.display()))
    }
}

impl ArtifactAttacher for ManifestAttacher {
    fn attach(
        &mut self,
        project: &ProjectUnit,
        format: &str,
        classifier: &str,
        path: &Path,
    ) -> anyhow::Result<()> {
        let (size, sha256) = if self.dry_run {
            (None, None)
        } else {
            let size = artifact_size(path)?;
            let sha256 = calculate_sha256(path)
                .with_context(|| format!("hashing {}", path.display()))?;
            (Some(size), Some(sha256))
        };

        self.manifest.artifacts.push(AttachedArtifact {
            project: project.name.clone(),
            version: project.version.clone(),
            format: format.to_string(),
            classifier: classifier.to_string(),
            path: path.to_path_buf(),
            size,
            sha256,
            attached_at: Utc::now(),
        });

        if self.dry_run {
            log::info!("[dry run] would attach {} ({}:{})", path.display(), format, classifier);
            return Ok(());
        }

        self.write_manifest()?;
        log::info!("Attached {} as {}:{}", path.display(), format, classifier);
        Ok(())
    }
}

fn artifact_size(path: &Path) -> anyhow::Result<u64> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("attached artifact {} is missing", path.display()))?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    let total = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum();
    Ok(total)
}
