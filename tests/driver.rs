//! Driver behavior against mock collaborators.

use project_sources::assembly::{
    ArchiveError, Archiver, ArtifactAttacher, AssemblyJob, CLASSIFIER, ConfigView, Descriptor,
    DescriptorReader, Error, Outcome, ProjectSources, ProjectUnit, ReadError, Settings,
    SettingsBuilder, SkipReason,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

const BASEDIR: &str = "/work/demo";

fn settings(formats: Option<&str>) -> SettingsBuilder {
    let builder = SettingsBuilder::new()
        .project(ProjectUnit::new("demo", Some("1.0.0".into())))
        .basedir(BASEDIR)
        .execution_root_directory(BASEDIR);
    match formats {
        Some(formats) => builder.formats(formats),
        None => builder,
    }
}

fn template() -> Descriptor {
    Descriptor {
        id: "template".to_string(),
        formats: Vec::new(),
        include_base_directory: true,
        base_directory: None,
        file_sets: Vec::new(),
    }
}

/// Reader returning a fixed answer and counting calls.
struct MockReader {
    descriptors: Vec<Descriptor>,
    fail: bool,
    calls: RefCell<usize>,
}

impl MockReader {
    fn returning(descriptors: Vec<Descriptor>) -> Self {
        Self {
            descriptors,
            fail: false,
            calls: RefCell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            descriptors: Vec::new(),
            fail: true,
            calls: RefCell::new(0),
        }
    }
}

impl DescriptorReader for MockReader {
    fn read_descriptors(&self, _config: &ConfigView<'_>) -> Result<Vec<Descriptor>, ReadError> {
        *self.calls.borrow_mut() += 1;
        if self.fail {
            return Err(ReadError::Read {
                reference: "project".to_string(),
                reason: "unreadable".to_string(),
            });
        }
        Ok(self.descriptors.clone())
    }
}

#[derive(Debug, Clone)]
struct ArchiveCall {
    identity: String,
    distribution_name: String,
    format: String,
    final_name: String,
    overridden: bool,
    create_parent_dirs: bool,
}

/// Archiver recording every request; optionally fails for one format.
#[derive(Default)]
struct MockArchiver {
    calls: RefCell<Vec<ArchiveCall>>,
    fail_on: Option<(&'static str, fn() -> ArchiveError)>,
}

impl Archiver for MockArchiver {
    fn create_archive(
        &self,
        job: &AssemblyJob,
        distribution_name: &str,
        format: &str,
        config: &ConfigView<'_>,
        create_parent_dirs: bool,
    ) -> Result<PathBuf, ArchiveError> {
        self.calls.borrow_mut().push(ArchiveCall {
            identity: job.identity().to_string(),
            distribution_name: distribution_name.to_string(),
            format: format.to_string(),
            final_name: config.final_name().to_string(),
            overridden: config.is_overridden(),
            create_parent_dirs,
        });

        if let Some((failing, make_error)) = self.fail_on {
            if failing == format {
                return Err(make_error());
            }
        }

        Ok(config
            .output_directory()
            .join(format!("{}.{}", distribution_name, format)))
    }
}

/// Attacher recording every attachment; optionally rejects everything.
#[derive(Default)]
struct MockAttacher {
    attached: Vec<(String, String, String, PathBuf)>,
    reject: bool,
}

impl ArtifactAttacher for MockAttacher {
    fn attach(
        &mut self,
        project: &ProjectUnit,
        format: &str,
        classifier: &str,
        path: &Path,
    ) -> anyhow::Result<()> {
        if self.reject {
            anyhow::bail!("repository is read-only");
        }
        self.attached.push((
            project.name.clone(),
            format.to_string(),
            classifier.to_string(),
            path.to_path_buf(),
        ));
        Ok(())
    }
}

fn disk_full() -> ArchiveError {
    ArchiveError::Creation("disk full".to_string())
}

fn escaping_file_set() -> ArchiveError {
    ArchiveError::InvalidConfiguration("file set escapes base directory".to_string())
}

fn run(
    settings: &Settings,
    reader: &MockReader,
    archiver: &MockArchiver,
    attacher: &mut MockAttacher,
) -> project_sources::assembly::Result<Outcome> {
    ProjectSources::new(settings, reader, archiver, attacher).execute()
}

#[test]
fn produces_and_attaches_each_format_in_order() {
    let settings = settings(Some("tar.gz, zip")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    let calls = archiver.calls.borrow();
    let formats: Vec<_> = calls.iter().map(|c| c.format.as_str()).collect();
    assert_eq!(formats, ["tar.gz", "zip"]);
    for call in calls.iter() {
        assert_eq!(call.identity, CLASSIFIER);
        assert_eq!(call.distribution_name, "demo-1.0.0-project-sources");
        assert!(call.create_parent_dirs);
        assert!(!call.overridden);
    }

    let attached: Vec<_> = attacher
        .attached
        .iter()
        .map(|(project, format, classifier, _)| (project.as_str(), format.as_str(), classifier.as_str()))
        .collect();
    assert_eq!(
        attached,
        [
            ("demo", "tar.gz", CLASSIFIER),
            ("demo", "zip", CLASSIFIER)
        ]
    );

    assert_eq!(outcome.archives().len(), 2);
    assert_eq!(
        outcome.archives()[1].path,
        Path::new(BASEDIR).join("target/demo-1.0.0-project-sources.zip")
    );
    assert_eq!(*reader.calls.borrow(), 1);
}

#[test]
fn skip_flag_short_circuits_everything() {
    let settings = settings(None).skip(true).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::Configuration));
    assert_eq!(*reader.calls.borrow(), 0);
    assert!(archiver.calls.borrow().is_empty());
    assert!(attacher.attached.is_empty());
}

#[test]
fn non_root_project_is_skipped_even_with_broken_formats() {
    let settings = settings(Some(",,"))
        .execution_root_directory("/work")
        .build()
        .unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NotExecutionRoot));
    assert_eq!(*reader.calls.borrow(), 0);
    assert!(archiver.calls.borrow().is_empty());
}

#[test]
fn execution_root_comparison_ignores_case() {
    let settings = settings(Some("zip"))
        .execution_root_directory("/WORK/Demo")
        .build()
        .unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    assert!(!outcome.is_skipped());
    assert_eq!(attacher.attached.len(), 1);
}

#[test]
fn missing_formats_is_a_configuration_error() {
    let settings = settings(None).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.is_configuration_error());
    assert_eq!(*reader.calls.borrow(), 0);
}

#[test]
fn empty_format_token_is_a_configuration_error() {
    let settings = settings(Some("tar.gz,,zip")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert!(archiver.calls.borrow().is_empty());
}

#[test]
fn empty_reader_result_is_missing_descriptor() {
    let settings = settings(Some("zip")).build().unwrap();
    let reader = MockReader::returning(Vec::new());
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    assert!(matches!(err, Error::MissingDescriptor { .. }));
    assert_eq!(
        err.to_string(),
        "Cannot read 'project' assembly descriptor!"
    );
    assert!(archiver.calls.borrow().is_empty());
    assert!(attacher.attached.is_empty());
}

#[test]
fn reader_failure_is_descriptor_read_error() {
    let settings = settings(Some("zip")).build().unwrap();
    let reader = MockReader::failing();
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    assert!(matches!(err, Error::DescriptorRead { .. }));
    assert!(err.to_string().starts_with("Error reading assemblies:"));
}

#[test]
fn only_the_first_descriptor_is_used() {
    let mut second = template();
    second.include_base_directory = false;
    let settings = settings(Some("zip")).build().unwrap();
    let reader = MockReader::returning(vec![template(), second]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    assert_eq!(outcome.archives().len(), 1);
    assert_eq!(archiver.calls.borrow().len(), 1);
}

#[test]
fn failure_on_second_format_keeps_first_attached() {
    let settings = settings(Some("tar.gz,zip,dir")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver {
        fail_on: Some(("zip", disk_full as fn() -> ArchiveError)),
        ..Default::default()
    };
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    match err {
        Error::ArchiveCreation { format, .. } => assert_eq!(format, "zip"),
        other => panic!("unexpected error: {other:?}"),
    }
    let formats: Vec<_> = archiver
        .calls
        .borrow()
        .iter()
        .map(|c| c.format.clone())
        .collect();
    assert_eq!(formats, ["tar.gz", "zip"]);
    assert_eq!(attacher.attached.len(), 1);
    assert_eq!(attacher.attached[0].1, "tar.gz");
}

#[test]
fn invalid_configuration_maps_to_invalid_job() {
    let settings = settings(Some("zip")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver {
        fail_on: Some(("zip", escaping_file_set as fn() -> ArchiveError)),
        ..Default::default()
    };
    let mut attacher = MockAttacher::default();

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    match &err {
        Error::InvalidJob { identity, reason } => {
            assert_eq!(identity, CLASSIFIER);
            assert_eq!(reason, "file set escapes base directory");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_configuration_error());
    assert!(attacher.attached.is_empty());
}

#[test]
fn attach_failure_is_artifact_attachment_error() {
    let settings = settings(Some("tar.gz,zip")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher {
        reject: true,
        ..Default::default()
    };

    let err = run(&settings, &reader, &archiver, &mut attacher).unwrap_err();

    match err {
        Error::ArtifactAttachment { format, reason } => {
            assert_eq!(format, "tar.gz");
            assert!(reason.contains("read-only"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(archiver.calls.borrow().len(), 1);
}

#[test]
fn root_folder_override_reaches_the_archiver_only() {
    let settings = settings(Some("tar.gz,zip"))
        .assembly_root_folder("demo")
        .build()
        .unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    run(&settings, &reader, &archiver, &mut attacher).unwrap();

    for call in archiver.calls.borrow().iter() {
        assert!(call.overridden);
        assert_eq!(call.final_name, "demo");
        assert_eq!(call.distribution_name, "demo-1.0.0-project-sources");
    }
    assert_eq!(settings.archiver_config().final_name(), "demo-1.0.0");
}

#[test]
fn root_folder_equal_to_final_name_is_not_an_override() {
    let settings = settings(Some("zip"))
        .assembly_root_folder("demo-1.0.0")
        .build()
        .unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    run(&settings, &reader, &archiver, &mut attacher).unwrap();

    let calls = archiver.calls.borrow();
    assert!(!calls[0].overridden);
    assert_eq!(calls[0].final_name, "demo-1.0.0");
}

#[test]
fn duplicate_formats_produce_duplicate_work() {
    let settings = settings(Some("zip,zip")).build().unwrap();
    let reader = MockReader::returning(vec![template()]);
    let archiver = MockArchiver::default();
    let mut attacher = MockAttacher::default();

    let outcome = run(&settings, &reader, &archiver, &mut attacher).unwrap();

    let formats: Vec<_> = archiver
        .calls
        .borrow()
        .iter()
        .map(|c| c.format.clone())
        .collect();
    assert_eq!(formats, ["zip", "zip"]);
    let attached: Vec<_> = attacher
        .attached
        .iter()
        .map(|(_, format, classifier, _)| (format.as_str(), classifier.as_str()))
        .collect();
    assert_eq!(attached, [("zip", CLASSIFIER), ("zip", CLASSIFIER)]);
    assert_eq!(outcome.archives().len(), 2);
}
