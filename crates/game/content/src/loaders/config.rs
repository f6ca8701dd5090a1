//! Simulation configuration loader.

use std::path::Path;

use tactics_core::SimConfig;

use crate::loaders::{LoadResult, load_with};

/// Loader for [`SimConfig`] from TOML files.
///
/// Every table and key is optional; missing values keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SimConfig> {
        load_with(path, Self::parse)
    }

    pub fn parse(content: &str) -> LoadResult<SimConfig> {
        let config: SimConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &SimConfig) -> LoadResult<()> {
        let combat = &config.combat;
        anyhow::ensure!(
            combat.near_range <= combat.mid_range,
            "combat.near_range ({}) exceeds combat.mid_range ({})",
            combat.near_range,
            combat.mid_range
        );
        anyhow::ensure!(
            combat.miss_spread_min_deg <= combat.miss_spread_max_deg,
            "combat.miss_spread_min_deg exceeds combat.miss_spread_max_deg"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&combat.body_share),
            "combat.body_share must lie in [0, 1], got {}",
            combat.body_share
        );
        anyhow::ensure!(config.movement.speed > 0.0, "movement.speed must be positive");
        anyhow::ensure!(
            config.movement.arrival_radius > 0.0,
            "movement.arrival_radius must be positive"
        );
        Ok(())
    }
}
