//! The configuration facade
//!
//! One explicitly constructed instance per run, no ambient global: the
//! host fingerprint is written through the store at construction, the
//! loader populates the rest during startup, and the instance is
//! read-mostly afterwards. Consumers go through the read accessors and
//! the registry lookups only.

use std::path::Path;

use tracing::info;

use ccb_platform::{Fingerprint, home_dir};

use crate::Result;
use crate::derivation::{Primaries, Secondaries};
use crate::error::CoreError;
use crate::fields::{PrimaryField, Value};
use crate::loader;
use crate::project::{Project, ProjectRegistry};
use crate::store::AttributeStore;

/// Default project directory under the home directory.
pub const DEFAULT_PROJECT_DIR: &str = "coriolis-2.x";

#[derive(Debug)]
pub struct Configuration {
    store: AttributeStore,
    registry: ProjectRegistry,
}

impl Configuration {
    /// Build a configuration with hard-coded defaults and the detected
    /// host fingerprint.
    pub fn new() -> Result<Self> {
        let fingerprint = Fingerprint::detect().map_err(CoreError::Platform)?;
        Self::with_fingerprint(fingerprint)
    }

    /// Build a configuration around an already-computed fingerprint.
    ///
    /// The fingerprint is written through the store so the first derived
    /// snapshot already sees `osType`.
    pub fn with_fingerprint(fingerprint: Fingerprint) -> Result<Self> {
        let root_dir = home_dir()?.join(DEFAULT_PROJECT_DIR);
        let mut config = Self {
            store: AttributeStore::new(Primaries::defaults(root_dir)),
            registry: ProjectRegistry::new(),
        };

        config
            .store
            .set(PrimaryField::OsType, Value::Text(fingerprint.os_type))?;
        if let Some(suffix) = fingerprint.lib_suffix {
            config
                .store
                .set(PrimaryField::LibSuffix, Value::Text(suffix))?;
        }

        Ok(config)
    }

    /// Locate, parse, validate, and apply a configuration file.
    ///
    /// Projects are registered in file order; scalar bindings are written
    /// through the store, each write re-deriving the secondary snapshot.
    pub fn load(&mut self, conf_file: Option<&Path>) -> Result<()> {
        let path = loader::locate(conf_file, &self.store.primaries().root_dir)?;
        info!("reading configuration from {}", path.display());

        let loaded = loader::load(&path)?;
        self.store.set(PrimaryField::ConfFile, Value::Path(path))?;

        for project in loaded.projects {
            self.register(project)?;
        }

        if let Some(dir) = loaded.projectdir {
            self.store.set(PrimaryField::ProjectDir, Value::Text(dir))?;
        }
        if let Some(method) = loaded.svn_method {
            self.store.set(PrimaryField::SvnMethod, Value::Text(method))?;
        }
        if let Some(name) = loaded.package_name {
            self.store.set(PrimaryField::PackageName, Value::Text(name))?;
        }
        if let Some(version) = loaded.package_version {
            self.store
                .set(PrimaryField::PackageVersion, Value::Text(version))?;
        }
        if let Some(excludes) = loaded.package_excludes {
            self.store
                .set(PrimaryField::PackageExcludes, Value::List(excludes))?;
        }
        if let Some(projects) = loaded.package_projects {
            self.store
                .set(PrimaryField::PackageProject, Value::List(projects))?;
        }

        Ok(())
    }

    /// Register a project entity; duplicate names are rejected.
    pub fn register(&mut self, project: Project) -> Result<()> {
        self.registry.register(project)
    }

    pub fn lookup(&self, name: &str) -> Option<&Project> {
        self.registry.lookup(name)
    }

    pub fn find_tool_owner(&self, tool: &str) -> Option<&Project> {
        self.registry.find_tool_owner(tool)
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// Name-keyed read over the whole namespace; the project list
    /// resolves to the registered names.
    pub fn get(&self, name: &str) -> Result<Value> {
        if name == PrimaryField::Projects.as_str() {
            return Ok(Value::List(self.registry.names()));
        }
        self.store.get_named(name)
    }

    /// Name-keyed write; secondary and undeclared names are rejected.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.store.set_named(name, value)
    }

    // Typed read accessors for the packaging and version-control layers.

    pub fn conf_file(&self) -> Option<&Path> {
        self.store.primaries().conf_file.as_deref()
    }

    pub fn root_dir(&self) -> &Path {
        &self.store.primaries().root_dir
    }

    pub fn os_type(&self) -> &str {
        &self.store.primaries().os_type
    }

    pub fn lib_suffix(&self) -> Option<&str> {
        self.store.primaries().lib_suffix.as_deref()
    }

    pub fn svn_tag(&self) -> &str {
        &self.store.primaries().svn_tag
    }

    pub fn svn_method(&self) -> Option<&str> {
        self.store.primaries().svn_method.as_deref()
    }

    pub fn build_mode(&self) -> &str {
        &self.store.primaries().build_mode
    }

    pub fn lib_mode(&self) -> &str {
        &self.store.secondaries().lib_mode
    }

    pub fn package_name(&self) -> Option<&str> {
        self.store.primaries().package_name.as_deref()
    }

    pub fn package_excludes(&self) -> &[String] {
        &self.store.primaries().package_excludes
    }

    pub fn secondaries(&self) -> &Secondaries {
        self.store.secondaries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fingerprint() -> Fingerprint {
        Fingerprint {
            os_type: "Linux.slsoc6x_64".to_string(),
            lib_suffix: Some("64".to_string()),
        }
    }

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[svnconfig]
method = "svn+ssh://builder@lab"

[package]
name = "coriolis"
version = "2.1"

[[projects]]
name = "coriolis"
tools = ["hurricane", "crlcore"]
repository = "svn+ssh://builder@lab/coriolis"
"#,
        )
        .unwrap();
        file
    }

    #[test]
    fn test_construction_applies_fingerprint() {
        let config = Configuration::with_fingerprint(fingerprint()).unwrap();

        assert_eq!(config.os_type(), "Linux.slsoc6x_64");
        assert_eq!(config.lib_suffix(), Some("64"));
        assert!(config.root_dir().ends_with(DEFAULT_PROJECT_DIR));
        assert!(
            config
                .secondaries()
                .os_dir
                .to_string_lossy()
                .contains("Linux.slsoc6x_64")
        );
    }

    #[test]
    fn test_load_populates_store_and_registry() {
        let file = config_file();
        let mut config = Configuration::with_fingerprint(fingerprint()).unwrap();
        config.load(Some(file.path())).unwrap();

        assert_eq!(config.conf_file(), Some(file.path()));
        assert_eq!(config.svn_method(), Some("svn+ssh://builder@lab"));
        assert_eq!(config.package_name(), Some("coriolis"));
        assert_eq!(config.find_tool_owner("crlcore").unwrap().name(), "coriolis");
        assert!(config.find_tool_owner("unknown-tool").is_none());

        // Scalar writes re-derived the snapshot.
        assert!(
            config
                .secondaries()
                .archive_dir
                .ends_with("tarball/coriolis-2.1.x")
        );
    }

    #[test]
    fn test_projects_field_resolves_to_registry() {
        let file = config_file();
        let mut config = Configuration::with_fingerprint(fingerprint()).unwrap();
        config.load(Some(file.path())).unwrap();

        assert_eq!(
            config.get("projects").unwrap(),
            Value::list(["coriolis"])
        );
    }

    #[test]
    fn test_name_keyed_accessors() {
        let config = Configuration::with_fingerprint(fingerprint()).unwrap();

        assert_eq!(config.get("enableShared").unwrap(), Value::text("ON"));
        assert_eq!(config.get("libMode").unwrap(), Value::text("Shared"));
        assert!(config.get("svnMethod").unwrap().is_unset());
        assert!(matches!(
            config.get("noSuchField"),
            Err(CoreError::UnknownField(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let mut config = Configuration::with_fingerprint(fingerprint()).unwrap();
        let err = config
            .load(Some(Path::new("/nonexistent/build.toml")))
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_duplicate_project_in_file_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[[projects]]
name = "core"
tools = ["a"]
repository = "r1"

[[projects]]
name = "core"
tools = ["b"]
repository = "r2"
"#,
        )
        .unwrap();

        let mut config = Configuration::with_fingerprint(fingerprint()).unwrap();
        let err = config.load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProject(name) if name == "core"));

        // The first registration is retained.
        assert_eq!(config.lookup("core").unwrap().repository(), "r1");
    }
}
