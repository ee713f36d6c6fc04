//! End-to-end packaging with the default reader, archiver and attacher.

use flate2::read::GzDecoder;
use project_sources::assembly::{
    ArchiveError, Archiver, ArtifactManifest, AssemblyJob, ConfigView, DefaultDescriptorReader, Error,
    FileTreeArchiver, Formats, ManifestAttacher, Outcome, ProjectSources, ProjectUnit, Settings,
    SettingsBuilder, TarLongFileMode, descriptor::builtin_descriptor, parse_formats,
};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("target/debug")).unwrap();
    fs::write(root.join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
    fs::write(root.join("README.md"), "# demo\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("build.log"), "noise\n").unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(root.join("target/debug/demo"), "binary").unwrap();
    dir
}

fn builder(basedir: &Path, formats: &str) -> SettingsBuilder {
    SettingsBuilder::new()
        .project(ProjectUnit::new("demo", Some("1.0.0".into())))
        .basedir(basedir)
        .execution_root_directory(basedir.to_string_lossy().into_owned())
        .formats(formats)
}

fn package(settings: &Settings) -> (Outcome, ManifestAttacher) {
    let manifest = settings
        .archiver_config()
        .output_directory()
        .join("project-sources.artifacts.json");
    let reader = DefaultDescriptorReader::new();
    let archiver = FileTreeArchiver::new();
    let mut attacher = ManifestAttacher::new(manifest).dry_run(settings.archiver_config().is_dry_run());
    let outcome = ProjectSources::new(settings, &reader, &archiver, &mut attacher)
        .execute()
        .unwrap();
    (outcome, attacher)
}

fn tar_gz_names(path: &Path) -> Vec<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
    archive
        .entries()
        .unwrap()
        .map(|entry| entry.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn zip_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

#[test]
fn tar_gz_contains_project_tree_under_final_name() {
    let project = sample_project();
    let settings = builder(project.path(), "tar.gz").build().unwrap();

    let (outcome, _) = package(&settings);

    let archive = &outcome.archives()[0];
    assert_eq!(
        archive.path,
        project
            .path()
            .join("target/demo-1.0.0-project-sources.tar.gz")
    );
    assert_eq!(
        tar_gz_names(&archive.path),
        [
            "demo-1.0.0/Cargo.toml",
            "demo-1.0.0/README.md",
            "demo-1.0.0/src/main.rs",
        ]
    );
}

#[test]
fn root_folder_override_renames_the_archive_root_only() {
    let project = sample_project();
    let settings = builder(project.path(), "tar.gz,zip")
        .assembly_root_folder("demo")
        .build()
        .unwrap();

    let (outcome, _) = package(&settings);

    let [tar_gz, zip_archive] = outcome.archives() else {
        panic!("expected two archives");
    };
    assert!(tar_gz.path.ends_with("demo-1.0.0-project-sources.tar.gz"));
    assert!(zip_archive.path.ends_with("demo-1.0.0-project-sources.zip"));
    assert!(tar_gz_names(&tar_gz.path).iter().all(|n| n.starts_with("demo/")));
    assert_eq!(
        zip_names(&zip_archive.path),
        ["demo/Cargo.toml", "demo/README.md", "demo/src/main.rs"]
    );
}

#[test]
fn zip_entries_keep_file_content() {
    let project = sample_project();
    let settings = builder(project.path(), "zip").build().unwrap();

    let (outcome, _) = package(&settings);

    let mut archive = zip::ZipArchive::new(File::open(&outcome.archives()[0].path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name("demo-1.0.0/src/main.rs")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "fn main() {}\n");
}

#[test]
fn dir_format_copies_the_tree() {
    let project = sample_project();
    let settings = builder(project.path(), "dir").build().unwrap();

    let (outcome, _) = package(&settings);

    let out = &outcome.archives()[0].path;
    assert!(out.is_dir());
    assert!(out.join("demo-1.0.0/src/main.rs").is_file());
    assert!(!out.join("demo-1.0.0/build.log").exists());
}

#[test]
fn manifest_records_each_archive_with_checksum() {
    let project = sample_project();
    let settings = builder(project.path(), "tar.gz,zip").build().unwrap();

    let (outcome, attacher) = package(&settings);

    let written: ArtifactManifest =
        serde_json::from_str(&fs::read_to_string(attacher.manifest_path()).unwrap()).unwrap();
    assert_eq!(written.artifacts.len(), 2);
    for (artifact, archive) in written.artifacts.iter().zip(outcome.archives()) {
        assert_eq!(artifact.project, "demo");
        assert_eq!(artifact.classifier, "project-sources");
        assert_eq!(artifact.format, archive.format);
        assert_eq!(artifact.path, archive.path);
        assert_eq!(artifact.sha256.as_ref().map(String::len), Some(64));
    }
}

#[test]
fn dry_run_writes_nothing() {
    let project = sample_project();
    let settings = builder(project.path(), "tar.gz")
        .output_directory(project.path().join("dist"))
        .dry_run(true)
        .build()
        .unwrap();

    let (outcome, attacher) = package(&settings);

    assert_eq!(outcome.archives().len(), 1);
    assert!(!outcome.archives()[0].path.exists());
    assert!(!project.path().join("dist").exists());
    assert_eq!(attacher.artifacts()[0].sha256, None);
}

#[test]
fn staging_directory_is_removed_after_success() {
    let project = sample_project();
    let settings = builder(project.path(), "tar").build().unwrap();

    package(&settings);

    assert!(
        !settings
            .archiver_config()
            .temporary_root_directory()
            .exists()
    );
}

fn project_job(formats: &str) -> AssemblyJob {
    let formats: Formats = parse_formats(Some(formats)).unwrap();
    AssemblyJob::new(builtin_descriptor("project").unwrap(), "project-sources", formats)
}

#[test]
fn missing_output_directory_fails_without_parent_creation() {
    let project = sample_project();
    let settings = builder(project.path(), "zip")
        .output_directory(project.path().join("missing"))
        .build()
        .unwrap();
    let view = ConfigView::ambient(settings.archiver_config());

    let err = FileTreeArchiver::new()
        .create_archive(&project_job("zip"), "demo", "zip", &view, false)
        .unwrap_err();

    assert!(matches!(err, ArchiveError::Creation(_)));
}

#[test]
fn unknown_format_is_rejected() {
    let project = sample_project();
    let settings = builder(project.path(), "rar").build().unwrap();
    let view = ConfigView::ambient(settings.archiver_config());

    let err = FileTreeArchiver::new()
        .create_archive(&project_job("rar"), "demo", "rar", &view, true)
        .unwrap_err();

    assert!(err.to_string().contains("rar"));
}

#[test]
fn long_names_fail_in_fail_mode() {
    let project = sample_project();
    let deep = project.path().join("a".repeat(60));
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join(format!("{}.rs", "b".repeat(60))), "").unwrap();
    let settings = builder(project.path(), "tar")
        .tar_long_file_mode(TarLongFileMode::Fail)
        .build()
        .unwrap();
    let view = ConfigView::ambient(settings.archiver_config());

    let result = FileTreeArchiver::new().create_archive(&project_job("tar"), "demo", "tar", &view, true);

    assert!(result.is_err());
    assert!(!project.path().join("target/demo.tar").exists());
}

#[test]
fn output_directory_inside_packaged_tree_is_rejected() {
    let project = sample_project();
    let settings = builder(project.path(), "tar,zip")
        .output_directory(project.path())
        .build()
        .unwrap();
    let reader = DefaultDescriptorReader::new();
    let archiver = FileTreeArchiver::new();
    let mut attacher = ManifestAttacher::new(project.path().join("m.json"));

    let err = ProjectSources::new(&settings, &reader, &archiver, &mut attacher)
        .execute()
        .unwrap_err();

    match &err {
        Error::InvalidJob { reason, .. } => assert!(reason.contains("inside build directory")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!project.path().join("demo-1.0.0-project-sources.tar").exists());
    assert!(!project.path().join("demo-1.0.0-project-sources.zip").exists());
    assert!(!project.path().join("m.json").exists());
}

#[test]
fn archives_from_earlier_formats_are_not_repackaged() {
    let project = sample_project();
    let settings = builder(project.path(), "tar,zip").build().unwrap();

    let (outcome, _) = package(&settings);

    let names = zip_names(&outcome.archives()[1].path);
    assert!(names.iter().all(|n| !n.contains("project-sources")));
}

#[cfg(unix)]
#[test]
fn symlinked_source_files_are_packaged() {
    use std::os::unix::fs::symlink;

    let project = sample_project();
    let src = project.path().join("src");
    fs::write(src.join("real.rs"), "pub fn real() {}\n").unwrap();
    symlink("real.rs", src.join("link.rs")).unwrap();
    symlink("missing.rs", src.join("dangling.rs")).unwrap();
    symlink("../src", project.path().join("src-alias")).unwrap();
    let settings = builder(project.path(), "zip").build().unwrap();

    let (outcome, _) = package(&settings);

    let path = &outcome.archives()[0].path;
    assert_eq!(
        zip_names(path),
        [
            "demo-1.0.0/Cargo.toml",
            "demo-1.0.0/README.md",
            "demo-1.0.0/src/link.rs",
            "demo-1.0.0/src/main.rs",
            "demo-1.0.0/src/real.rs",
        ]
    );
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name("demo-1.0.0/src/link.rs")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "pub fn real() {}\n");
}
