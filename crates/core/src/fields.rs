//! The configuration field namespace
//!
//! Field names are a fixed contract shared with the `build.toml` format
//! and the diagnostics output; the camelCase spelling is deliberate and
//! must not be renamed.

use std::fmt;
use std::path::PathBuf;

/// A user- or loader-settable configuration field.
///
/// `projects` and `libMode` are part of the enumeration but are not
/// directly writable: the former is populated through the project
/// registry, the latter is derived from `enableShared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryField {
    ConfFile,
    Projects,
    Standalones,
    SvnTag,
    SvnMethod,
    ProjectDir,
    RootDir,
    PackageName,
    PackageVersion,
    PackageExcludes,
    PackageProject,
    OsType,
    LibSuffix,
    BuildMode,
    LibMode,
    EnableShared,
}

impl PrimaryField {
    /// The fixed enumeration, in declaration order.
    pub const ALL: [PrimaryField; 16] = [
        PrimaryField::ConfFile,
        PrimaryField::Projects,
        PrimaryField::Standalones,
        PrimaryField::SvnTag,
        PrimaryField::SvnMethod,
        PrimaryField::ProjectDir,
        PrimaryField::RootDir,
        PrimaryField::PackageName,
        PrimaryField::PackageVersion,
        PrimaryField::PackageExcludes,
        PrimaryField::PackageProject,
        PrimaryField::OsType,
        PrimaryField::LibSuffix,
        PrimaryField::BuildMode,
        PrimaryField::LibMode,
        PrimaryField::EnableShared,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PrimaryField::ConfFile => "confFile",
            PrimaryField::Projects => "projects",
            PrimaryField::Standalones => "standalones",
            PrimaryField::SvnTag => "svnTag",
            PrimaryField::SvnMethod => "svnMethod",
            PrimaryField::ProjectDir => "projectDir",
            PrimaryField::RootDir => "rootDir",
            PrimaryField::PackageName => "packageName",
            PrimaryField::PackageVersion => "packageVersion",
            PrimaryField::PackageExcludes => "packageExcludes",
            PrimaryField::PackageProject => "packageProject",
            PrimaryField::OsType => "osType",
            PrimaryField::LibSuffix => "libSuffix",
            PrimaryField::BuildMode => "buildMode",
            PrimaryField::LibMode => "libMode",
            PrimaryField::EnableShared => "enableShared",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for PrimaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived, read-only configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryField {
    RpmbuildDir,
    DebbuildDir,
    TmppathDir,
    TarballDir,
    ArchiveDir,
    SourceDir,
    OsDir,
    BuildDir,
    InstallDir,
    SpecFileIn,
    SpecFile,
    DebianDir,
    DebChangelogIn,
    DebChangelog,
    SourceTarBz2,
    BinaryTarBz2,
    DistribPatch,
}

impl SecondaryField {
    /// The fixed enumeration, in declaration order.
    pub const ALL: [SecondaryField; 17] = [
        SecondaryField::RpmbuildDir,
        SecondaryField::DebbuildDir,
        SecondaryField::TmppathDir,
        SecondaryField::TarballDir,
        SecondaryField::ArchiveDir,
        SecondaryField::SourceDir,
        SecondaryField::OsDir,
        SecondaryField::BuildDir,
        SecondaryField::InstallDir,
        SecondaryField::SpecFileIn,
        SecondaryField::SpecFile,
        SecondaryField::DebianDir,
        SecondaryField::DebChangelogIn,
        SecondaryField::DebChangelog,
        SecondaryField::SourceTarBz2,
        SecondaryField::BinaryTarBz2,
        SecondaryField::DistribPatch,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SecondaryField::RpmbuildDir => "rpmbuildDir",
            SecondaryField::DebbuildDir => "debbuildDir",
            SecondaryField::TmppathDir => "tmppathDir",
            SecondaryField::TarballDir => "tarballDir",
            SecondaryField::ArchiveDir => "archiveDir",
            SecondaryField::SourceDir => "sourceDir",
            SecondaryField::OsDir => "osDir",
            SecondaryField::BuildDir => "buildDir",
            SecondaryField::InstallDir => "installDir",
            SecondaryField::SpecFileIn => "specFileIn",
            SecondaryField::SpecFile => "specFile",
            SecondaryField::DebianDir => "debianDir",
            SecondaryField::DebChangelogIn => "debChangelogIn",
            SecondaryField::DebChangelog => "debChangelog",
            SecondaryField::SourceTarBz2 => "sourceTarBz2",
            SecondaryField::BinaryTarBz2 => "binaryTarBz2",
            SecondaryField::DistribPatch => "distribPatch",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for SecondaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dynamic value currency of the name-keyed accessors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    Text(String),
    Path(PathBuf),
    List(Vec<String>),
    #[default]
    Unset,
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Value::Path(path.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            Value::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::Path(path) => write!(f, "{}", path.display()),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Unset => write!(f, "(unset)"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<PathBuf> for Value {
    fn from(path: PathBuf) -> Self {
        Value::Path(path)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_names_round_trip() {
        for field in PrimaryField::ALL {
            assert_eq!(PrimaryField::parse(field.as_str()), Some(field));
        }
        assert_eq!(PrimaryField::parse("rpmbuildDir"), None);
        assert_eq!(PrimaryField::parse("bogus"), None);
    }

    #[test]
    fn test_secondary_names_round_trip() {
        for field in SecondaryField::ALL {
            assert_eq!(SecondaryField::parse(field.as_str()), Some(field));
        }
        assert_eq!(SecondaryField::parse("rootDir"), None);
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        for field in PrimaryField::ALL {
            assert_eq!(SecondaryField::parse(field.as_str()), None);
        }
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::text("ON").to_string(), "ON");
        assert_eq!(Value::list(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::Unset.to_string(), "(unset)");
    }
}
