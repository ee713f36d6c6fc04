//! File selection: which files of the project tree become archive entries.

use super::ArchiveError;
use crate::assembly::descriptor::{Descriptor, FileSet};
use crate::assembly::job::AssemblyJob;
use crate::assembly::settings::ConfigView;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Patterns excluded from every file set that keeps default excludes on.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS/**",
    "**/.cvsignore",
    "**/RCS/**",
    "**/SCCS/**",
    "**/vssver.scc",
    "**/.svn/**",
    "**/.arch-ids/**",
    "**/.bzr/**",
    "**/.DS_Store",
    "**/.metadata/**",
    "**/.hg/**",
    "**/.git/**",
    "**/.gitignore",
    "**/.gitattributes",
    "**/.gitmodules",
];

/// One file to be written into an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File on disk.
    pub source: PathBuf,
    /// `/`-separated name inside the archive, root folder included.
    pub name: String,
}

/// Include/exclude filter over `/`-separated relative paths.
#[derive(Debug, Clone, Default)]
struct IncludeExcludeFilter {
    include_patterns: Vec<glob::Pattern>,
    exclude_patterns: Vec<glob::Pattern>,
}

impl IncludeExcludeFilter {
    fn for_file_set(file_set: &FileSet) -> Result<Self, ArchiveError> {
        let compile = |pattern: &str| {
            glob::Pattern::new(pattern).map_err(|e| {
                ArchiveError::InvalidConfiguration(format!(
                    "Invalid pattern '{}' in file set '{}': {}",
                    pattern, file_set.directory, e
                ))
            })
        };

        let include_patterns = file_set
            .includes
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = if file_set.use_default_excludes {
            DEFAULT_EXCLUDES
        } else {
            &[]
        };
        let exclude_patterns = file_set
            .excludes
            .iter()
            .map(String::as_str)
            .chain(defaults.iter().copied())
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_patterns,
            exclude_patterns,
        })
    }

    fn matches(&self, path: &str) -> bool {
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        if self
            .exclude_patterns
            .iter()
            .any(|p| p.matches_with(path, options))
        {
            return false;
        }

        self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches_with(path, options))
    }
}

/// Root folder that prefixes every entry name.
///
/// The descriptor's explicit base directory wins; otherwise the view's
/// final name, which carries any root folder overlay.
pub(super) fn root_folder(template: &Descriptor, config: &ConfigView<'_>) -> String {
    if !template.include_base_directory {
        return String::new();
    }
    template
        .base_directory
        .clone()
        .unwrap_or_else(|| config.final_name().to_string())
}

/// Lists the entries of `job` in archive order.
///
/// Files under the output, temporary and working directories are never
/// selected; a file set directory inside one of them is rejected as
/// invalid configuration. Symlinks to files are selected under the link's
/// name with the target's content. Missing file set directories and
/// unusable links are skipped with a warning.
pub fn collect_entries(
    job: &AssemblyJob,
    config: &ConfigView<'_>,
) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let template = job.template();
    let root = root_folder(template, config);
    let build_dirs = [
        config.output_directory(),
        config.temporary_root_directory(),
        config.working_directory(),
    ];

    let mut entries = Vec::new();

    for file_set in &template.file_sets {
        let dir = config.basedir().join(relative_directory(&file_set.directory)?);
        if !dir.is_dir() {
            log::warn!(
                "File set directory {} does not exist; skipping",
                dir.display()
            );
            continue;
        }

        if let Some(build_dir) = build_dirs.iter().find(|build_dir| dir.starts_with(build_dir)) {
            return Err(ArchiveError::InvalidConfiguration(format!(
                "File set directory {} lies inside build directory {}; \
                 archives would package their own output",
                dir.display(),
                build_dir.display()
            )));
        }

        let filter = IncludeExcludeFilter::for_file_set(file_set)?;
        let walker = WalkDir::new(&dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !build_dirs.iter().any(|p| e.path().starts_with(p)));

        for entry in walker {
            let entry = entry.map_err(|e| {
                ArchiveError::Creation(format!("Failed to walk {}: {}", dir.display(), e))
            })?;
            if !is_selectable_file(&entry) {
                continue;
            }

            let relative = relative_name(entry.path(), &dir);
            if !filter.matches(&relative) {
                log::debug!("Excluded {}", relative);
                continue;
            }

            let name = entry_name(&[&root, &file_set.output_directory, &relative]);
            log::debug!("Selected {} -> {}", entry.path().display(), name);
            entries.push(ArchiveEntry {
                source: entry.path().to_path_buf(),
                name,
            });
        }
    }

    if config.is_site_included() {
        collect_site_entries(config, &root, &mut entries)?;
    }

    Ok(entries)
}

fn collect_site_entries(
    config: &ConfigView<'_>,
    root: &str,
    entries: &mut Vec<ArchiveEntry>,
) -> Result<(), ArchiveError> {
    let Some(site) = config.site_directory().filter(|dir| dir.is_dir()) else {
        log::warn!("Site inclusion requested but no site directory exists; skipping");
        return Ok(());
    };

    for entry in WalkDir::new(site).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ArchiveError::Creation(format!("Failed to walk {}: {}", site.display(), e))
        })?;
        if is_selectable_file(&entry) {
            let relative = relative_name(entry.path(), site);
            entries.push(ArchiveEntry {
                source: entry.path().to_path_buf(),
                name: entry_name(&[root, "site", &relative]),
            });
        }
    }
    Ok(())
}

/// Regular files, and symlinks whose target is a regular file.
///
/// Links are not followed into directories, which keeps the walk free of
/// cycles; such links and dangling links are reported and skipped.
fn is_selectable_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    if !entry.path_is_symlink() {
        return false;
    }
    match std::fs::metadata(entry.path()) {
        Ok(target) if target.is_file() => true,
        Ok(_) => {
            log::warn!(
                "Skipping symlink {}: target is not a regular file",
                entry.path().display()
            );
            false
        }
        Err(e) => {
            log::warn!("Skipping dangling symlink {}: {}", entry.path().display(), e);
            false
        }
    }
}

/// Validates a file set directory and strips `.` components.
pub(super) fn relative_directory(directory: &str) -> Result<PathBuf, ArchiveError> {
    let mut clean = PathBuf::new();
    for component in Path::new(directory).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => clean.push(part),
            _ => {
                return Err(ArchiveError::InvalidConfiguration(format!(
                    "File set directory '{}' must stay inside the base directory",
                    directory
                )));
            }
        }
    }
    Ok(clean)
}

fn relative_name(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins name segments with `/`, dropping empty and `.` segments.
pub(super) fn entry_name(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split(['/', '\\']))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
