//! ccb-core: configuration state for the ccb builder
//!
//! This crate provides the split between mutable primary fields and
//! derived read-only fields, the host fingerprint hand-off, the project
//! registry, and the validated `build.toml` loader.

mod config;
mod derivation;
mod error;
mod fields;
mod loader;
mod project;
mod store;

pub use config::{Configuration, DEFAULT_PROJECT_DIR};
pub use derivation::{Primaries, Secondaries, derive};
pub use error::CoreError;
pub use fields::{PrimaryField, SecondaryField, Value};
pub use loader::{CONFIG_FILE_NAME, LoadedConfig};
pub use project::{Project, ProjectRegistry};
pub use store::AttributeStore;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
