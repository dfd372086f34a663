//! Configuration file location, parsing, and validation
//!
//! The configuration source is declarative TOML. The file as a whole is
//! deserialized through serde; project entries are validated by hand so
//! that schema failures report the 1-based entry ordinal and, when
//! available, the project name.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use ccb_platform::home_dir;

use crate::Result;
use crate::error::CoreError;
use crate::project::Project;

/// File name looked for in every candidate location.
pub const CONFIG_FILE_NAME: &str = "build.toml";

/// Fixed shared-mount fallback used on the lab network.
const SHARED_BOOTSTRAP_DIR: &str = "/users/outil/coriolis/coriolis-2.x/src/bootstrap";

/// Conventional home-relative source-tree layouts, tried in order.
const HOME_BOOTSTRAP_DIRS: [&str; 4] = [
    "coriolis-2.x/src/bootstrap",
    "coriolis/src/bootstrap",
    "chams-2.x/src/bootstrap",
    "chams/src/bootstrap",
];

/// Raw `build.toml` shape, before project-entry validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    projects: Option<Vec<toml::Value>>,
    projectdir: Option<String>,
    svnconfig: Option<RawSvnConfig>,
    package: Option<RawPackage>,
}

#[derive(Debug, Deserialize)]
struct RawSvnConfig {
    method: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: Option<String>,
    version: Option<String>,
    excludes: Option<Vec<String>>,
    projects: Option<Vec<String>>,
}

/// A parsed and validated configuration file, ready to be applied.
#[derive(Debug)]
pub struct LoadedConfig {
    pub projects: Vec<Project>,
    pub projectdir: Option<String>,
    pub svn_method: Option<String>,
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    pub package_excludes: Option<Vec<String>>,
    pub package_projects: Option<Vec<String>>,
}

/// Resolve the configuration file path.
///
/// An explicit path must exist. Without one, an educated guess walks a
/// fixed list of candidate directories and the first existing
/// `build.toml` wins.
pub fn locate(explicit: Option<&Path>, root_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        info!("using user-supplied configuration file {}", path.display());
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(CoreError::ConfigNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    debug!("making an educated guess to locate the configuration file");

    let mut candidates = Vec::new();
    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.to_path_buf());
    }
    let home = home_dir()?;
    for layout in HOME_BOOTSTRAP_DIRS {
        candidates.push(home.join(layout));
    }
    candidates.push(PathBuf::from(SHARED_BOOTSTRAP_DIR));
    candidates.push(root_dir.join("src").join("bootstrap"));

    let mut searched = Vec::new();
    for dir in candidates {
        let candidate = dir.join(CONFIG_FILE_NAME);
        debug!("trying {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    Err(CoreError::ConfigNotFound { searched })
}

/// Parse and validate a configuration file.
pub fn load(path: &Path) -> Result<LoadedConfig> {
    let text = fs::read_to_string(path)?;
    let raw: RawConfig = toml::from_str(&text).map_err(|source| CoreError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = raw.projects.ok_or_else(|| CoreError::NoProjects {
        path: path.to_path_buf(),
    })?;
    let projects = validate_projects(&entries)?;

    let (svn_method, package) = (raw.svnconfig.and_then(|s| s.method), raw.package);
    let (package_name, package_version, package_excludes, package_projects) = match package {
        Some(p) => (p.name, p.version, p.excludes, p.projects),
        None => (None, None, None, None),
    };

    Ok(LoadedConfig {
        projects,
        projectdir: raw.projectdir,
        svn_method,
        package_name,
        package_version,
        package_excludes,
        package_projects,
    })
}

/// Validate every project entry, in file order, with 1-based ordinals.
fn validate_projects(entries: &[toml::Value]) -> Result<Vec<Project>> {
    let mut projects = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let ordinal = index + 1;

        let table = entry
            .as_table()
            .ok_or_else(|| schema(ordinal, "entry is not a table".to_string()))?;

        let name = match table.get("name").and_then(toml::Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            Some(_) => return Err(schema(ordinal, "project name is empty".to_string())),
            None => return Err(schema(ordinal, "missing project name".to_string())),
        };

        // Emptiness is permitted, but the value must literally be a list.
        let tools = match table.get("tools") {
            None => {
                return Err(schema(ordinal, format!("missing tools list in '{name}'")));
            }
            Some(toml::Value::Array(items)) => {
                let mut tools = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(tool) => tools.push(tool.to_string()),
                        None => {
                            return Err(schema(
                                ordinal,
                                format!("tools of '{name}' must all be strings"),
                            ));
                        }
                    }
                }
                tools
            }
            Some(_) => {
                return Err(schema(
                    ordinal,
                    format!("tools item of '{name}' is not a list"),
                ));
            }
        };

        let repository = table
            .get("repository")
            .and_then(toml::Value::as_str)
            .ok_or_else(|| schema(ordinal, format!("missing repository in '{name}'")))?
            .to_string();

        projects.push(Project::new(name, tools, repository));
    }

    Ok(projects)
}

fn schema(ordinal: usize, message: String) -> CoreError {
    CoreError::Schema { ordinal, message }
}
