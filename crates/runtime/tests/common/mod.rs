#![allow(dead_code)]

use glam::Vec2;
use tactics_core::{
    AgentId, AgentSpec, AttributeRanks, Cell, ClearSight, LocationDamage, RangeAccuracy, Region, RoundState,
    SeededDice, SimConfig, SimContext, Site, SpawnRegion, TeamId, TileMap, Weapon, WeaponCatalogue, World,
};
use tactics_runtime::{AgentCtx, AiConfig, MatchConfig};

pub const TILE: f32 = 16.0;

pub fn center(row: i32, col: i32) -> Vec2 {
    Vec2::new((col as f32 + 0.5) * TILE, (row as f32 + 0.5) * TILE)
}

fn weapon(name: &str, cost: u32, head: u32, body: u32) -> Weapon {
    Weapon {
        name: name.into(),
        cost,
        damage: LocationDamage {
            head,
            body,
            limbs: body - 4,
        },
        accuracy: RangeAccuracy {
            near: 0.9,
            mid: 0.7,
            far: 0.4,
        },
        fire_interval_ms: 150,
    }
}

pub fn catalogue() -> WeaponCatalogue {
    WeaponCatalogue::new(
        vec![
            weapon("classic", 0, 78, 26),
            weapon("spectre", 1600, 78, 26),
            weapon("vandal", 2900, 150, 40),
        ],
        "classic",
    )
    .unwrap()
}

pub fn zones() -> Vec<Region> {
    vec![
        Region::new("north", Cell::new(2, 8), Cell::new(4, 11)),
        Region::new("mid", Cell::new(8, 8), Cell::new(11, 11)),
        Region::new("south", Cell::new(15, 8), Cell::new(17, 11)),
    ]
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

pub fn world_with(seed: u64, config: SimConfig) -> World {
    let ctx = SimContext::new(TileMap::open(20, 20, TILE), catalogue())
        .with_vision(ClearSight)
        .with_dice(SeededDice::new(seed))
        .with_spawns(spawns())
        .with_zones(zones());
    let sites = vec![Site {
        name: "A".into(),
        position: center(8, 8),
    }];
    let round = RoundState::new(TeamId::Alpha, sites, None, center(1, 1));
    World::new(ctx, config, round)
}

pub fn world(seed: u64) -> World {
    world_with(seed, SimConfig::default())
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

/// Context acting as `agent`.
pub fn ctx_for(world: World, agent: AgentId) -> AgentCtx {
    let mut ctx = AgentCtx::new(world, AiConfig::default());
    ctx.agent = agent;
    ctx
}

pub fn quick_match(rounds: u32) -> MatchConfig {
    MatchConfig {
        rounds,
        ..MatchConfig::default()
    }
}

/// Round limits short enough for whole matches in a test.
pub fn short_rounds() -> SimConfig {
    let mut config = SimConfig::default();
    config.round.time_limit_ms = 1000;
    config.round.detonation_ms = 2000;
    config
}
