//! Path expansion utilities

use std::path::{Path, PathBuf};

use crate::error::PlatformError;

/// Home directory of the current user.
///
/// Needed to compute the default root directory and the configuration
/// search locations; absence is a fatal misconfiguration.
pub fn home_dir() -> Result<PathBuf, PlatformError> {
    dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)
}

/// Expand a path, resolving `~` to the user's home directory.
///
/// A path that is still relative after expansion is resolved against the
/// home directory, so the result is always absolute.
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf, PlatformError> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home_dir()?.join(rest))
    } else if path_str == "~" {
        home_dir()
    } else if path.is_relative() {
        Ok(home_dir()?.join(path))
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().expect("No home directory");

        let expanded = expand_path("~/coriolis-2.x").unwrap();
        assert_eq!(expanded, home.join("coriolis-2.x"));

        let expanded = expand_path("~").unwrap();
        assert_eq!(expanded, home);
    }

    #[test]
    fn test_expand_absolute() {
        let path = expand_path("/users/outil/coriolis").unwrap();
        assert_eq!(path, PathBuf::from("/users/outil/coriolis"));
    }

    #[test]
    fn test_expand_relative_resolves_against_home() {
        let home = dirs::home_dir().expect("No home directory");
        let path = expand_path("chams-2.x").unwrap();
        assert_eq!(path, home.join("chams-2.x"));
    }
}
