//! Host OS fingerprinting
//!
//! Classifies a platform identity string (kernel name, release, machine
//! architecture, as printed by `uname -srm`) into the build-target layout
//! identifier and the library-path suffix. Rules are evaluated top to
//! bottom and the first match wins; the tagged-release and 64-bit rules
//! must stay above the broader ones.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PlatformError;

struct Rule {
    pattern: Regex,
    os_type: &'static str,
    lib_suffix: Option<&'static str>,
}

impl Rule {
    fn new(pattern: &str, os_type: &'static str, lib_suffix: Option<&'static str>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("hard-coded fingerprint pattern"),
            os_type,
            lib_suffix,
        }
    }
}

// Rule order is load-bearing: tagged and 64-bit rules before broader ones.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"Linux.*(el6|slsoc6).*x86_64", "Linux.slsoc6x_64", Some("64")),
        Rule::new(r"Linux.*(el6|slsoc6)", "Linux.slsoc6x", None),
        Rule::new(r"Linux.*el5.*x86_64", "Linux.SLSoC5x_64", Some("64")),
        Rule::new(r"Linux.*(el5|2\.6\.23\.13.*SoC)", "Linux.SLSoC5x", None),
        Rule::new(r"Linux.*x86_64", "Linux.x86_64", Some("64")),
        Rule::new(r"Linux", "Linux.i386", None),
        Rule::new(r"Darwin", "Darwin", None),
        Rule::new(r"FreeBSD 8.*amd64", "FreeBSD.8x.amd64", Some("64")),
        Rule::new(r"FreeBSD 8.*x86_64", "FreeBSD.8x.x86_64", Some("64")),
        Rule::new(r"FreeBSD 8", "FreeBSD.8x.i386", None),
    ]
});

/// The (OS family, library-path suffix) pair identifying the host build
/// target layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub os_type: String,
    pub lib_suffix: Option<String>,
}

impl Fingerprint {
    /// Classify a platform identity string.
    ///
    /// Unrecognized platforms are non-fatal: the fingerprint falls back to
    /// `"<kernel-name> <kernel-release>"` with no suffix, and a warning is
    /// emitted.
    pub fn from_identity(identity: &str) -> Self {
        for rule in RULES.iter() {
            if rule.pattern.is_match(identity) {
                return Self {
                    os_type: rule.os_type.to_string(),
                    lib_suffix: rule.lib_suffix.map(str::to_string),
                };
            }
        }

        let mut tokens = identity.split_whitespace();
        let kernel = tokens.next().unwrap_or("unknown");
        let release = tokens.next().unwrap_or("0");
        let os_type = format!("{kernel} {release}");

        warn!(
            "unrecognized platform identity \"{}\", using \"{}\"",
            identity.trim_end(),
            os_type
        );

        Self {
            os_type,
            lib_suffix: None,
        }
    }

    /// Query the host identity with `uname -srm` and classify it.
    ///
    /// The process handle does not outlive the call; this runs once per
    /// run, during configuration construction.
    pub fn detect() -> Result<Self, PlatformError> {
        let output = Command::new("uname").arg("-srm").output()?;
        if !output.status.success() {
            return Err(PlatformError::Identity(format!(
                "uname exited with {}",
                output.status
            )));
        }

        let identity = String::from_utf8_lossy(&output.stdout);
        Ok(Self::from_identity(identity.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slsoc6_64bit() {
        let fp = Fingerprint::from_identity("Linux 3.10.0-327.el6.x86_64 x86_64");
        assert_eq!(fp.os_type, "Linux.slsoc6x_64");
        assert_eq!(fp.lib_suffix.as_deref(), Some("64"));
    }

    #[test]
    fn test_slsoc6_32bit() {
        let fp = Fingerprint::from_identity("Linux 2.6.32-573.el6.i686 i686");
        assert_eq!(fp.os_type, "Linux.slsoc6x");
        assert_eq!(fp.lib_suffix, None);
    }

    #[test]
    fn test_el5_64bit() {
        let fp = Fingerprint::from_identity("Linux 2.6.18-406.el5 x86_64");
        assert_eq!(fp.os_type, "Linux.SLSoC5x_64");
        assert_eq!(fp.lib_suffix.as_deref(), Some("64"));
    }

    #[test]
    fn test_legacy_soc_kernel() {
        let fp = Fingerprint::from_identity("Linux 2.6.23.13-i686-SoC i686");
        assert_eq!(fp.os_type, "Linux.SLSoC5x");
        assert_eq!(fp.lib_suffix, None);
    }

    #[test]
    fn test_generic_linux_64bit() {
        let fp = Fingerprint::from_identity("Linux 6.1.0-18-amd64 x86_64");
        assert_eq!(fp.os_type, "Linux.x86_64");
        assert_eq!(fp.lib_suffix.as_deref(), Some("64"));
    }

    #[test]
    fn test_generic_linux_fallthrough() {
        let fp = Fingerprint::from_identity("Linux 5.10.0 i686");
        assert_eq!(fp.os_type, "Linux.i386");
        assert_eq!(fp.lib_suffix, None);
    }

    #[test]
    fn test_darwin() {
        let fp = Fingerprint::from_identity("Darwin 20.0.0 x86_64");
        assert_eq!(fp.os_type, "Darwin");
        assert_eq!(fp.lib_suffix, None);
    }

    #[test]
    fn test_freebsd8_amd64() {
        let fp = Fingerprint::from_identity("FreeBSD 8.2-RELEASE amd64");
        assert_eq!(fp.os_type, "FreeBSD.8x.amd64");
        assert_eq!(fp.lib_suffix.as_deref(), Some("64"));
    }

    #[test]
    fn test_freebsd8_i386() {
        let fp = Fingerprint::from_identity("FreeBSD 8.1-RELEASE i386");
        assert_eq!(fp.os_type, "FreeBSD.8x.i386");
        assert_eq!(fp.lib_suffix, None);
    }

    #[test]
    fn test_unknown_platform_fallback() {
        let fp = Fingerprint::from_identity("Plan9 4 386");
        assert_eq!(fp.os_type, "Plan9 4");
        assert_eq!(fp.lib_suffix, None);
    }

    // The tagged-release rule must win over the generic 64-bit rule.
    #[test]
    fn test_tagged_release_beats_generic_64bit() {
        let fp = Fingerprint::from_identity("Linux 2.6.32-431.slsoc6.x86_64 x86_64");
        assert_eq!(fp.os_type, "Linux.slsoc6x_64");
    }

    #[test]
    fn test_detect_runs() {
        // Whatever the host is, detection must produce a non-empty type.
        let fp = Fingerprint::detect().unwrap();
        assert!(!fp.os_type.is_empty());
    }
}
