//! Content loaders for reading equipment data from files.
//!
//! This module provides loaders that convert RON/TOML files into the types
//! runtime oracles serve.

pub mod catalog;
pub mod config;
pub mod skills;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
