//! The attribute store
//!
//! Owns the configuration field namespace and enforces the write policy:
//! primary fields are settable, with normalization on write, and every
//! write synchronously recomputes the full derived snapshot; secondary
//! fields are read-only.

use std::path::PathBuf;

use ccb_platform::expand_path;

use crate::Result;
use crate::derivation::{Primaries, Secondaries, derive};
use crate::error::CoreError;
use crate::fields::{PrimaryField, SecondaryField, Value};

#[derive(Debug, Clone)]
pub struct AttributeStore {
    primaries: Primaries,
    secondaries: Secondaries,
}

impl AttributeStore {
    pub fn new(primaries: Primaries) -> Self {
        let secondaries = derive(&primaries);
        Self {
            primaries,
            secondaries,
        }
    }

    pub fn primaries(&self) -> &Primaries {
        &self.primaries
    }

    pub fn secondaries(&self) -> &Secondaries {
        &self.secondaries
    }

    /// Fixed enumeration of the settable field names, for diagnostics.
    pub fn primary_fields() -> &'static [PrimaryField] {
        &PrimaryField::ALL
    }

    /// Fixed enumeration of the derived field names, for diagnostics.
    pub fn secondary_fields() -> &'static [SecondaryField] {
        &SecondaryField::ALL
    }

    /// Name-keyed write. Secondary names are rejected as read-only with
    /// the stored value left unchanged; undeclared names are rejected.
    pub fn set_named(&mut self, name: &str, value: Value) -> Result<()> {
        if SecondaryField::parse(name).is_some() {
            return Err(CoreError::ReadOnlyField(name.to_string()));
        }
        let field = PrimaryField::parse(name)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))?;
        self.set(field, value)
    }

    /// Write a primary field and re-derive the secondary snapshot.
    pub fn set(&mut self, field: PrimaryField, value: Value) -> Result<()> {
        use PrimaryField::*;

        match field {
            // Populated through the project registry, never written here.
            Projects => return Err(CoreError::ReadOnlyField(field.to_string())),
            // Derived from enableShared.
            LibMode => return Err(CoreError::ReadOnlyField(field.to_string())),
            ConfFile => self.primaries.conf_file = Some(path_value(field, value)?),
            Standalones => self.primaries.standalones = list_value(field, value)?,
            SvnTag => self.primaries.svn_tag = text_value(field, value)?,
            SvnMethod => self.primaries.svn_method = Some(text_value(field, value)?),
            ProjectDir => self.primaries.project_dir = text_value(field, value)?,
            RootDir => {
                self.primaries.root_dir = expand_path(path_value(field, value)?)?;
            }
            PackageName => self.primaries.package_name = Some(text_value(field, value)?),
            PackageVersion => self.primaries.package_version = Some(text_value(field, value)?),
            PackageExcludes => self.primaries.package_excludes = list_value(field, value)?,
            PackageProject => self.primaries.package_project = list_value(field, value)?,
            OsType => self.primaries.os_type = text_value(field, value)?,
            LibSuffix => self.primaries.lib_suffix = Some(text_value(field, value)?),
            BuildMode => self.primaries.build_mode = text_value(field, value)?,
            EnableShared => {
                let mode = text_value(field, value)?;
                self.primaries.enable_shared = if mode == "ON" {
                    mode
                } else {
                    "OFF".to_string()
                };
            }
        }

        self.secondaries = derive(&self.primaries);
        Ok(())
    }

    /// Name-keyed read over the declared namespace only.
    pub fn get_named(&self, name: &str) -> Result<Value> {
        if let Some(field) = PrimaryField::parse(name) {
            return Ok(self.get_primary(field));
        }
        if let Some(field) = SecondaryField::parse(name) {
            return Ok(self.get_secondary(field));
        }
        Err(CoreError::UnknownField(name.to_string()))
    }

    pub fn get_primary(&self, field: PrimaryField) -> Value {
        use PrimaryField::*;

        let p = &self.primaries;
        match field {
            ConfFile => opt_path(&p.conf_file),
            // The registry owns the project list; Configuration resolves it.
            Projects => Value::Unset,
            Standalones => Value::List(p.standalones.clone()),
            SvnTag => Value::text(&p.svn_tag),
            SvnMethod => opt_text(&p.svn_method),
            ProjectDir => Value::text(&p.project_dir),
            RootDir => Value::Path(p.root_dir.clone()),
            PackageName => opt_text(&p.package_name),
            PackageVersion => opt_text(&p.package_version),
            PackageExcludes => Value::List(p.package_excludes.clone()),
            PackageProject => Value::List(p.package_project.clone()),
            OsType => Value::text(&p.os_type),
            LibSuffix => opt_text(&p.lib_suffix),
            BuildMode => Value::text(&p.build_mode),
            LibMode => Value::text(&self.secondaries.lib_mode),
            EnableShared => Value::text(&p.enable_shared),
        }
    }

    pub fn get_secondary(&self, field: SecondaryField) -> Value {
        use SecondaryField::*;

        let s = &self.secondaries;
        match field {
            RpmbuildDir => Value::Path(s.rpmbuild_dir.clone()),
            DebbuildDir => Value::Path(s.debbuild_dir.clone()),
            TmppathDir => Value::Path(s.tmppath_dir.clone()),
            TarballDir => Value::Path(s.tarball_dir.clone()),
            ArchiveDir => Value::Path(s.archive_dir.clone()),
            SourceDir => Value::Path(s.source_dir.clone()),
            OsDir => Value::Path(s.os_dir.clone()),
            BuildDir => Value::Path(s.build_dir.clone()),
            InstallDir => Value::Path(s.install_dir.clone()),
            SpecFileIn => Value::Path(s.spec_file_in.clone()),
            SpecFile => Value::Path(s.spec_file.clone()),
            DebianDir => Value::Path(s.debian_dir.clone()),
            DebChangelogIn => Value::Path(s.deb_changelog_in.clone()),
            DebChangelog => Value::Path(s.deb_changelog.clone()),
            SourceTarBz2 => Value::text(&s.source_tar_bz2),
            BinaryTarBz2 => Value::text(&s.binary_tar_bz2),
            DistribPatch => Value::Path(s.distrib_patch.clone()),
        }
    }
}

fn opt_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::text(text),
        None => Value::Unset,
    }
}

fn opt_path(value: &Option<PathBuf>) -> Value {
    match value {
        Some(path) => Value::Path(path.clone()),
        None => Value::Unset,
    }
}

fn text_value(field: PrimaryField, value: Value) -> Result<String> {
    match value {
        Value::Text(text) => Ok(text),
        _ => Err(CoreError::FieldType {
            field: field.as_str(),
            expected: "a string",
        }),
    }
}

fn path_value(field: PrimaryField, value: Value) -> Result<PathBuf> {
    match value {
        Value::Path(path) => Ok(path),
        Value::Text(text) => Ok(PathBuf::from(text)),
        _ => Err(CoreError::FieldType {
            field: field.as_str(),
            expected: "a path",
        }),
    }
}

fn list_value(field: PrimaryField, value: Value) -> Result<Vec<String>> {
    match value {
        Value::List(items) => Ok(items),
        _ => Err(CoreError::FieldType {
            field: field.as_str(),
            expected: "a list of strings",
        }),
    }
}
