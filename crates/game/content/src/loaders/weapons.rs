//! Weapon catalogue loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Weapon, WeaponCatalogue};

use crate::loaders::{LoadResult, load_with};

/// Weapon catalogue structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponFile {
    /// Sidearm every agent falls back to on death.
    pub default: String,
    pub weapons: Vec<Weapon>,
}

/// Loader for weapon catalogues from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<WeaponCatalogue> {
        load_with(path, Self::parse)
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalogue> {
        let file: WeaponFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalogue RON: {}", e))?;

        for weapon in &file.weapons {
            let accuracy = [weapon.accuracy.near, weapon.accuracy.mid, weapon.accuracy.far];
            anyhow::ensure!(
                accuracy.iter().all(|m| *m >= 0.0),
                "weapon {:?} has a negative accuracy modifier",
                weapon.name
            );
        }
        let catalogue = WeaponCatalogue::new(file.weapons, file.default)?;
        Ok(catalogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOGUE: &str = r#"
    (
        default: "classic",
        weapons: [
            (
                name: "classic",
                cost: 0,
                damage: (head: 78, body: 26, limbs: 22),
                accuracy: (near: 1.0, mid: 0.8, far: 0.5),
                fire_interval_ms: 250,
            ),
            (
                name: "vandal",
                cost: 2900,
                damage: (head: 160, body: 40, limbs: 34),
                accuracy: (near: 1.0, mid: 0.95, far: 0.85),
                fire_interval_ms: 110,
            ),
        ],
    )
    "#;

    #[test]
    fn parses_catalogue_with_default() {
        let catalogue = WeaponLoader::parse(CATALOGUE).unwrap();
        assert_eq!(catalogue.default_name(), "classic");
        assert_eq!(catalogue.get("vandal").map(|w| w.cost), Some(2900));
        assert_eq!(catalogue.best_affordable(3000).map(|w| w.name.as_str()), Some("vandal"));
    }

    #[test]
    fn missing_default_is_rejected() {
        let text = CATALOGUE.replace("default: \"classic\"", "default: \"sheriff\"");
        assert!(WeaponLoader::parse(&text).is_err());
    }
}
