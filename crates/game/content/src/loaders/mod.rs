//! Content loaders for reading match data from files.
//!
//! Every loader exposes a `load(path)` for files and a `parse(text)` for
//! in-memory sources; both validate against the core types before returning.

pub mod config;
pub mod factory;
pub mod map;
pub mod roster;
pub mod weapons;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::{MapLayout, MapLoader};
pub use roster::{RosterEntry, RosterLoader};
pub use weapons::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads a file and runs `parse` over it, tagging failures with the path.
pub(crate) fn load_with<T>(path: &Path, parse: impl FnOnce(&str) -> LoadResult<T>) -> LoadResult<T> {
    let content = read_file(path)?;
    let value = parse(&content).map_err(|e| anyhow::anyhow!("{}: {:#}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "content loaded");
    Ok(value)
}
