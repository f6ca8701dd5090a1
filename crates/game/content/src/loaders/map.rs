//! Map layout loader.
//!
//! Terrain is written as ASCII rows (`#` wall, `~` void, anything
//! alphanumeric or `.` floor); sites, spawn rooms and zones are listed
//! separately by cell so the rows stay readable.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tactics_core::{AgentSpec, Cell, Region, Site, SimContext, SpawnRegion, TeamId, TileGrid, TileMap, WeaponCatalogue};

use crate::loaders::{LoadResult, RosterEntry, load_with};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    name: String,
    tile_size: f32,
    rows: Vec<String>,
    #[serde(default)]
    sites: Vec<SiteRon>,
    #[serde(default)]
    spawns: Vec<SpawnRon>,
    #[serde(default)]
    zones: Vec<RegionRon>,
    /// Where the objective lies when no attacker starts with it.
    #[serde(default)]
    objective: Option<Cell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteRon {
    name: String,
    cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionRon {
    name: String,
    min: Cell,
    max: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpawnRon {
    team: TeamId,
    min: Cell,
    max: Cell,
}

/// A loaded map: terrain plus every named location on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    pub name: String,
    pub grid: TileMap,
    pub sites: Vec<Site>,
    pub spawns: Vec<SpawnRegion>,
    pub zones: Vec<Region>,
    pub objective: Option<Vec2>,
}

impl MapLayout {
    /// Simulation context over this map; vision and dice keep their defaults.
    pub fn context(&self, weapons: WeaponCatalogue) -> SimContext {
        SimContext::new(self.grid.clone(), weapons)
            .with_spawns(self.spawns.clone())
            .with_zones(self.zones.clone())
    }

    /// Centers of the walkable cells in a team's spawn rooms, row-major.
    pub fn spawn_positions(&self, team: TeamId) -> Vec<Vec2> {
        self.spawns
            .iter()
            .filter(|spawn| spawn.team == team)
            .flat_map(|spawn| spawn.region.walkable_cells(&self.grid).collect::<Vec<_>>())
            .map(|cell| self.grid.center_of(cell))
            .collect()
    }

    /// Places roster entries: explicit cells first, then the next free spawn
    /// cell of each team in roster order.
    pub fn place(&self, roster: Vec<RosterEntry>) -> LoadResult<Vec<AgentSpec>> {
        let mut cursors: HashMap<TeamId, usize> = HashMap::new();
        let mut specs = Vec::with_capacity(roster.len());

        for entry in roster {
            let position = match entry.spawn {
                Some(cell) => {
                    anyhow::ensure!(
                        self.grid.is_walkable(cell),
                        "agent {:?} starts on unwalkable cell ({}, {})",
                        entry.name,
                        cell.row,
                        cell.col
                    );
                    self.grid.center_of(cell)
                }
                None => {
                    let cursor = cursors.entry(entry.team).or_default();
                    let free = self.spawn_positions(entry.team);
                    let position = free.get(*cursor).copied().ok_or_else(|| {
                        anyhow::anyhow!("map {:?} has no free spawn cell left for {:?}", self.name, entry.name)
                    })?;
                    *cursor += 1;
                    position
                }
            };
            specs.push(entry.into_spec(position));
        }
        Ok(specs)
    }
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        load_with(path, Self::parse)
    }

    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        anyhow::ensure!(data.tile_size > 0.0, "tile_size must be positive");

        let grid = TileMap::from_ascii(data.rows.as_slice(), data.tile_size)?;
        let within = |what: &str, cell: Cell| -> LoadResult<()> {
            anyhow::ensure!(
                grid.contains(cell),
                "{} at ({}, {}) lies outside the {}x{} grid",
                what,
                cell.row,
                cell.col,
                grid.rows(),
                grid.cols()
            );
            Ok(())
        };

        let mut sites = Vec::with_capacity(data.sites.len());
        for site in data.sites {
            within(&format!("site {:?}", site.name), site.cell)?;
            anyhow::ensure!(grid.is_walkable(site.cell), "site {:?} is not walkable", site.name);
            sites.push(Site {
                position: grid.center_of(site.cell),
                name: site.name,
            });
        }

        let mut spawns = Vec::with_capacity(data.spawns.len());
        for spawn in data.spawns {
            within(&format!("{} spawn", spawn.team), spawn.min)?;
            within(&format!("{} spawn", spawn.team), spawn.max)?;
            let region = Region::new(format!("{}-spawn", spawn.team), spawn.min, spawn.max);
            anyhow::ensure!(
                region.walkable_cells(&grid).next().is_some(),
                "{} spawn has no walkable cell",
                spawn.team
            );
            spawns.push(SpawnRegion {
                team: spawn.team,
                region,
            });
        }
        for team in TeamId::ALL {
            if !spawns.iter().any(|spawn| spawn.team == team) {
                tracing::warn!(map = %data.name, %team, "map has no spawn room for team");
            }
        }

        let mut zones = Vec::with_capacity(data.zones.len());
        for zone in data.zones {
            within(&format!("zone {:?}", zone.name), zone.min)?;
            within(&format!("zone {:?}", zone.name), zone.max)?;
            zones.push(Region::new(zone.name, zone.min, zone.max));
        }

        let objective = match data.objective {
            Some(cell) => {
                within("objective", cell)?;
                Some(grid.center_of(cell))
            }
            None => None,
        };

        Ok(MapLayout {
            name: data.name,
            grid,
            sites,
            spawns,
            zones,
            objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::Tile;

    use super::*;

    const SMALL: &str = r##"
    (
        name: "yard",
        tile_size: 10.0,
        rows: [
            "a.....",
            "..##..",
            "....A.",
            "b.....",
        ],
        sites: [(name: "A", cell: (row: 2, col: 4))],
        spawns: [
            (team: Alpha, min: (row: 0, col: 0), max: (row: 0, col: 1)),
            (team: Bravo, min: (row: 3, col: 0), max: (row: 3, col: 0)),
        ],
        zones: [(name: "mid", min: (row: 1, col: 0), max: (row: 2, col: 5))],
    )
    "##;

    #[test]
    fn builds_grid_sites_and_regions() {
        let map = MapLoader::parse(SMALL).unwrap();
        assert_eq!(map.grid.rows(), 4);
        assert_eq!(map.grid.cols(), 6);
        assert_eq!(map.grid.tile(Cell::new(1, 2)), Some(Tile::Wall));
        assert_eq!(map.sites[0].position, Vec2::new(45.0, 25.0));
        assert_eq!(map.zones[0].name, "mid");
        assert_eq!(map.objective, None);
        assert_eq!(
            map.spawn_positions(TeamId::Alpha),
            vec![Vec2::new(5.0, 5.0), Vec2::new(15.0, 5.0)]
        );
    }

    #[test]
    fn placement_runs_out_of_spawn_cells() {
        let map = MapLoader::parse(SMALL).unwrap();
        let entry = |name: &str| RosterEntry {
            name: name.into(),
            team: TeamId::Bravo,
            ranks: Default::default(),
            credits: 0,
            weapon: None,
            spawn: None,
        };

        let placed = map.place(vec![entry("one")]).unwrap();
        assert_eq!(placed[0].position, Vec2::new(5.0, 35.0));
        assert!(map.place(vec![entry("one"), entry("two")]).is_err());
    }

    #[test]
    fn site_outside_the_grid_is_rejected() {
        let text = SMALL.replace("(row: 2, col: 4)", "(row: 9, col: 4)");
        let err = MapLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("outside"));
    }
}
