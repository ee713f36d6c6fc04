//! Identity of the build unit that owns the produced archives.

/// The build unit whose sources are packaged.
///
/// Typically derived from the `[package]` section of `Cargo.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUnit {
    /// Project name.
    pub name: String,

    /// Project version, when the manifest declares one.
    ///
    /// Default: None
    pub version: Option<String>,
}

impl ProjectUnit {
    /// Creates a project unit with a name and optional version.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Default final name: `<name>-<version>`, or just `<name>` when
    /// unversioned.
    pub fn default_final_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}-{}", self.name, version),
            None => self.name.clone(),
        }
    }
}
