//! Host platform detection and path utilities for ccb
//!
//! This crate provides:
//! - the ordered host OS fingerprint identifying the build-target layout
//! - home directory resolution and home-relative path expansion

mod error;
mod fingerprint;
mod paths;

pub use error::PlatformError;
pub use fingerprint::Fingerprint;
pub use paths::{expand_path, home_dir};

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
