//! Secondary field derivation
//!
//! Every secondary value is a pure function of the current primary
//! snapshot. The whole snapshot is recomputed on every primary write;
//! this path is not performance-sensitive and simplicity wins.

use std::path::PathBuf;

/// Snapshot of the user-settable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primaries {
    pub conf_file: Option<PathBuf>,
    pub standalones: Vec<String>,
    pub svn_tag: String,
    pub svn_method: Option<String>,
    pub project_dir: String,
    pub root_dir: PathBuf,
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    pub package_excludes: Vec<String>,
    pub package_project: Vec<String>,
    pub os_type: String,
    pub lib_suffix: Option<String>,
    pub build_mode: String,
    pub enable_shared: String,
}

impl Primaries {
    /// Hard-coded construction defaults; the loader overrides most of them.
    /// `os_type` stays empty until the fingerprint is written.
    pub fn defaults(root_dir: PathBuf) -> Self {
        Self {
            conf_file: None,
            standalones: Vec::new(),
            svn_tag: "x".to_string(),
            svn_method: None,
            project_dir: crate::config::DEFAULT_PROJECT_DIR.to_string(),
            root_dir,
            package_name: None,
            package_version: None,
            package_excludes: Vec::new(),
            package_project: Vec::new(),
            os_type: String::new(),
            lib_suffix: None,
            build_mode: "Release".to_string(),
            enable_shared: "ON".to_string(),
        }
    }
}

/// Snapshot of the derived fields. Produced only by [`derive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secondaries {
    pub lib_mode: String,
    pub rpmbuild_dir: PathBuf,
    pub debbuild_dir: PathBuf,
    pub tmppath_dir: PathBuf,
    pub tarball_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub source_dir: PathBuf,
    pub os_dir: PathBuf,
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub spec_file_in: PathBuf,
    pub spec_file: PathBuf,
    pub debian_dir: PathBuf,
    pub deb_changelog_in: PathBuf,
    pub deb_changelog: PathBuf,
    pub source_tar_bz2: String,
    pub binary_tar_bz2: String,
    pub distrib_patch: PathBuf,
}

// Unset package identity renders as a visible placeholder in derived names.
fn named(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

/// Recompute the full secondary snapshot from a primary snapshot.
///
/// Referentially transparent: the same snapshot always yields an
/// identical result.
pub fn derive(p: &Primaries) -> Secondaries {
    let lib_mode = if p.enable_shared == "ON" {
        "Shared"
    } else {
        "Static"
    }
    .to_string();

    let package_name = named(&p.package_name);
    let package_version = named(&p.package_version);

    let rpmbuild_dir = p.root_dir.join("rpmbuild");
    let debbuild_dir = p.root_dir.join("debbuild");
    let tmppath_dir = rpmbuild_dir.join("tmp");
    let tarball_dir = p.root_dir.join("tarball");
    let archive_dir = tarball_dir.join(format!(
        "{package_name}-{package_version}.{}",
        p.svn_tag
    ));
    let source_dir = p.root_dir.join("src");
    let os_dir = p
        .root_dir
        .join(&p.os_type)
        .join(format!("{}.{}", p.build_mode, lib_mode));
    let build_dir = os_dir.join("build");
    let install_dir = os_dir.join("install");

    let bootstrap_dir = source_dir.join("bootstrap");
    let spec_file_in = bootstrap_dir.join(format!("{package_name}.spec.in"));
    let spec_file = bootstrap_dir.join(format!("{package_name}.spec"));
    let debian_dir = bootstrap_dir.join("debian");
    let deb_changelog_in = debian_dir.join("changelog.in");
    let deb_changelog = debian_dir.join("changelog");
    let source_tar_bz2 = format!("{package_name}-{package_version}.{}.tar.bz2", p.svn_tag);
    let binary_tar_bz2 = format!(
        "{package_name}-binary-{package_version}.{}-1.slsoc6.tar.bz2",
        p.svn_tag
    );
    let distrib_patch = bootstrap_dir.join(format!("{package_name}-for-distribution.patch"));

    Secondaries {
        lib_mode,
        rpmbuild_dir,
        debbuild_dir,
        tmppath_dir,
        tarball_dir,
        archive_dir,
        source_dir,
        os_dir,
        build_dir,
        install_dir,
        spec_file_in,
        spec_file,
        debian_dir,
        deb_changelog_in,
        deb_changelog,
        source_tar_bz2,
        binary_tar_bz2,
        distrib_patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Primaries {
        let mut p = Primaries::defaults(PathBuf::from("/home/builder/coriolis-2.x"));
        p.os_type = "Linux.slsoc6x_64".to_string();
        p.lib_suffix = Some("64".to_string());
        p.package_name = Some("coriolis".to_string());
        p.package_version = Some("2.1".to_string());
        p.svn_tag = "1234".to_string();
        p
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let p = sample();
        assert_eq!(derive(&p), derive(&p));
    }

    #[test]
    fn test_directory_layout() {
        let s = derive(&sample());
        assert_eq!(
            s.rpmbuild_dir,
            PathBuf::from("/home/builder/coriolis-2.x/rpmbuild")
        );
        assert_eq!(s.tmppath_dir, s.rpmbuild_dir.join("tmp"));
        assert_eq!(
            s.os_dir,
            PathBuf::from("/home/builder/coriolis-2.x/Linux.slsoc6x_64/Release.Shared")
        );
        assert_eq!(s.build_dir, s.os_dir.join("build"));
        assert_eq!(s.install_dir, s.os_dir.join("install"));
    }

    #[test]
    fn test_archive_dir_composition() {
        let p = sample();
        let s = derive(&p);
        assert_eq!(
            s.archive_dir,
            s.tarball_dir.join(format!(
                "{}-{}.{}",
                p.package_name.as_deref().unwrap(),
                p.package_version.as_deref().unwrap(),
                p.svn_tag
            ))
        );
    }

    #[test]
    fn test_packaging_files() {
        let s = derive(&sample());
        let bootstrap = PathBuf::from("/home/builder/coriolis-2.x/src/bootstrap");
        assert_eq!(s.spec_file_in, bootstrap.join("coriolis.spec.in"));
        assert_eq!(s.spec_file, bootstrap.join("coriolis.spec"));
        assert_eq!(s.deb_changelog_in, bootstrap.join("debian/changelog.in"));
        assert_eq!(s.source_tar_bz2, "coriolis-2.1.1234.tar.bz2");
        assert_eq!(
            s.binary_tar_bz2,
            "coriolis-binary-2.1.1234-1.slsoc6.tar.bz2"
        );
        assert_eq!(
            s.distrib_patch,
            bootstrap.join("coriolis-for-distribution.patch")
        );
    }

    #[test]
    fn test_lib_mode_follows_enable_shared() {
        let mut p = sample();
        assert_eq!(derive(&p).lib_mode, "Shared");

        p.enable_shared = "OFF".to_string();
        let s = derive(&p);
        assert_eq!(s.lib_mode, "Static");
        assert!(s.os_dir.to_string_lossy().ends_with("Release.Static"));
    }

    #[test]
    fn test_unset_package_renders_placeholder() {
        let p = Primaries::defaults(PathBuf::from("/home/builder/coriolis-2.x"));
        let s = derive(&p);
        assert_eq!(s.source_tar_bz2, "none-none.x.tar.bz2");
    }
}
