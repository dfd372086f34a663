//! Error types for ccb-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in configuration operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("attribute '{0}' is read-only")]
    ReadOnlyField(String),

    #[error("configuration has no attribute '{0}'")]
    UnknownField(String),

    #[error("attribute '{field}' expects {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("cannot locate any configuration file ({} locations tried)", .searched.len())]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("failed to parse configuration file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration file {} defines no project list", .path.display())]
    NoProjects { path: PathBuf },

    #[error("invalid project entry #{ordinal}: {message}")]
    Schema { ordinal: usize, message: String },

    #[error("project '{0}' is already registered")]
    DuplicateProject(String),

    #[error("platform error: {0}")]
    Platform(#[from] ccb_platform::PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
