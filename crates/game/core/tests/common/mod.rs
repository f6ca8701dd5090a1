#![allow(dead_code)]

use glam::Vec2;
use tactics_core::{
    AgentId, AgentSpec, AttributeRanks, Cell, ClearSight, Dice, LocationDamage, RangeAccuracy, Region,
    RoundState, SimConfig, SimContext, Site, SpawnRegion, TeamId, TileMap, Weapon, WeaponCatalogue, World,
};

pub const TILE: f32 = 16.0;

pub fn center(row: i32, col: i32) -> Vec2 {
    Vec2::new((col as f32 + 0.5) * TILE, (row as f32 + 0.5) * TILE)
}

pub fn weapon(name: &str, cost: u32, head: u32, body: u32, limbs: u32) -> Weapon {
    Weapon {
        name: name.into(),
        cost,
        damage: LocationDamage { head, body, limbs },
        accuracy: RangeAccuracy {
            near: 1.0,
            mid: 0.85,
            far: 0.6,
        },
        fire_interval_ms: 150,
    }
}

pub fn catalogue() -> WeaponCatalogue {
    WeaponCatalogue::new(
        vec![
            weapon("classic", 0, 78, 26, 22),
            weapon("spectre", 1600, 78, 26, 22),
            weapon("vandal", 2900, 150, 40, 34),
        ],
        "classic",
    )
    .unwrap()
}

pub fn spawns() -> Vec<SpawnRegion> {
    vec![
        SpawnRegion {
            team: TeamId::Alpha,
            region: Region::new("alpha-spawn", Cell::new(1, 1), Cell::new(2, 2)),
        },
        SpawnRegion {
            team: TeamId::Bravo,
            region: Region::new("bravo-spawn", Cell::new(17, 17), Cell::new(18, 18)),
        },
    ]
}

pub fn world_with(dice: impl Dice + 'static, config: SimConfig) -> World {
    let ctx = SimContext::new(TileMap::open(20, 20, TILE), catalogue())
        .with_vision(ClearSight)
        .with_dice(dice)
        .with_spawns(spawns());
    let sites = vec![Site {
        name: "A".into(),
        position: center(8, 8),
    }];
    let round = RoundState::new(TeamId::Alpha, sites, None, center(19, 0));
    World::new(ctx, config, round)
}

pub fn world(dice: impl Dice + 'static) -> World {
    world_with(dice, SimConfig::default())
}

pub fn spawn(world: &mut World, name: &str, team: TeamId, at: Vec2) -> AgentId {
    world
        .add_agent(AgentSpec {
            name: name.into(),
            team,
            position: at,
            ranks: AttributeRanks::default(),
            credits: 0,
            weapon: None,
        })
        .unwrap()
}

pub fn spawn_armed(world: &mut World, name: &str, team: TeamId, at: Vec2, weapon: &str) -> AgentId {
    world
        .add_agent(AgentSpec {
            name: name.into(),
            team,
            position: at,
            ranks: AttributeRanks::default(),
            credits: 0,
            weapon: Some(weapon.into()),
        })
        .unwrap()
}

/// Advances the clock and steps `agents` until `done` holds or `max_ticks`
/// elapse. Returns the number of ticks run.
pub fn run_until(
    world: &mut World,
    agents: &[AgentId],
    tick_ms: u64,
    max_ticks: usize,
    mut done: impl FnMut(&World) -> bool,
) -> usize {
    for tick in 0..max_ticks {
        if done(world) {
            return tick;
        }
        world.advance(tick_ms);
        for id in agents {
            world.step_agent(*id);
        }
    }
    max_ticks
}
