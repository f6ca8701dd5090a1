//! Content factory for loading a whole match setup from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{SimConfig, WeaponCatalogue};

use crate::loaders::{ConfigLoader, LoadResult, MapLayout, MapLoader, RosterEntry, RosterLoader, WeaponLoader};

/// Content factory that loads match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── roster.toml
/// ├── weapons.ron
/// └── maps/
///     └── yard.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the simulation config from `config.toml`, or the defaults when
    /// the file is absent.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the roster from `roster.toml`.
    pub fn load_roster(&self) -> LoadResult<Vec<RosterEntry>> {
        RosterLoader::load(&self.data_dir.join("roster.toml"))
    }

    /// Load the weapon catalogue from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<WeaponCatalogue> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapLayout> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
