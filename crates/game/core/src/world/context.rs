//! Collaborators injected into a [`World`](super::World).

use crate::agent::TeamId;
use crate::dice::{Dice, SeededDice};
use crate::grid::{Region, TileGrid};
use crate::vision::{GridSight, VisionService};
use crate::weapon::WeaponCatalogue;

/// A spawn region owned by one team.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRegion {
    pub team: TeamId,
    pub region: Region,
}

/// Grid, vision, economy and randomness used by the simulation.
pub struct SimContext {
    pub grid: Box<dyn TileGrid>,
    pub vision: Box<dyn VisionService>,
    pub weapons: WeaponCatalogue,
    pub dice: Box<dyn Dice>,
    pub spawns: Vec<SpawnRegion>,
    /// Named areas agents move between.
    pub zones: Vec<Region>,
}

impl SimContext {
    /// Grid-sampled vision and seed-0 dice; override with the `with_*` methods.
    pub fn new(grid: impl TileGrid + 'static, weapons: WeaponCatalogue) -> Self {
        Self {
            grid: Box::new(grid),
            vision: Box::new(GridSight::default()),
            weapons,
            dice: Box::new(SeededDice::new(0)),
            spawns: Vec::new(),
            zones: Vec::new(),
        }
    }

    pub fn with_vision(mut self, vision: impl VisionService + 'static) -> Self {
        self.vision = Box::new(vision);
        self
    }

    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn with_spawns(mut self, spawns: Vec<SpawnRegion>) -> Self {
        self.spawns = spawns;
        self
    }

    pub fn with_zones(mut self, zones: Vec<Region>) -> Self {
        self.zones = zones;
        self
    }

    pub fn spawns_of(&self, team: TeamId) -> impl Iterator<Item = &Region> {
        self.spawns
            .iter()
            .filter(move |spawn| spawn.team == team)
            .map(|spawn| &spawn.region)
    }
}

impl core::fmt::Debug for SimContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimContext")
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .field("weapons", &self.weapons.iter().count())
            .field("spawns", &self.spawns.len())
            .field("zones", &self.zones.len())
            .finish_non_exhaustive()
    }
}
