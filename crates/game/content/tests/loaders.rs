use std::fs;

use tactics_content::{ContentFactory, MapLoader, WeaponLoader};
use tactics_core::{DistanceMetric, SimConfig, TeamId, TileGrid, World};

const WEAPONS: &str = r#"(
    default: "classic",
    weapons: [
        (name: "classic", cost: 0, damage: (head: 78, body: 26, limbs: 22),
         accuracy: (near: 1.0, mid: 0.8, far: 0.5), fire_interval_ms: 250),
        (name: "spectre", cost: 1600, damage: (head: 78, body: 26, limbs: 22),
         accuracy: (near: 1.0, mid: 0.75, far: 0.4), fire_interval_ms: 75),
    ],
)"#;

const MAP: &str = r#"(
    name: "yard",
    tile_size: 16.0,
    rows: [
        "aa......",
        "........",
        "...##...",
        "......A.",
        "......bb",
    ],
    sites: [(name: "A", cell: (row: 3, col: 6))],
    spawns: [
        (team: Alpha, min: (row: 0, col: 0), max: (row: 0, col: 1)),
        (team: Bravo, min: (row: 4, col: 6), max: (row: 4, col: 7)),
    ],
    zones: [(name: "mid", min: (row: 1, col: 2), max: (row: 1, col: 5))],
    objective: Some((row: 0, col: 0)),
)"#;

const ROSTER: &str = r#"
[[agents]]
name = "jett"
team = "Alpha"
credits = 2000
ranks = { accuracy = "A" }

[[agents]]
name = "sage"
team = "Bravo"
weapon = "spectre"
"#;

#[test]
fn factory_loads_a_complete_match_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("maps")).unwrap();
    fs::write(dir.path().join("weapons.ron"), WEAPONS).unwrap();
    fs::write(dir.path().join("roster.toml"), ROSTER).unwrap();
    fs::write(dir.path().join("maps/yard.ron"), MAP).unwrap();
    fs::write(dir.path().join("config.toml"), "[movement]\nmetric = \"RowOnly\"\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.movement.metric, DistanceMetric::RowOnly);

    let map = factory.load_map("yard").unwrap();
    let weapons = factory.load_weapons().unwrap();
    let specs = map.place(factory.load_roster().unwrap()).unwrap();
    assert_eq!(specs[0].position, map.grid.center_of(tactics_core::Cell::new(0, 0)));

    let round = tactics_core::RoundState::new(TeamId::Alpha, map.sites.clone(), None, map.objective.unwrap_or_default());
    let mut world = World::new(map.context(weapons), config, round);
    for spec in specs {
        world.add_agent(spec).unwrap();
    }
    assert_eq!(world.find("sage").and_then(|id| world.agent(id)).map(|agent| agent.weapon.as_str()), Some("spectre"));
    assert_eq!(world.zones().len(), 1);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), SimConfig::default());
}

#[test]
fn malformed_files_report_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "(name: \"yard\", tile_size: ").unwrap();
    let err = MapLoader::load(&broken).unwrap_err();
    assert!(format!("{err:#}").contains("broken.ron"));

    let missing = dir.path().join("weapons.ron");
    let err = WeaponLoader::load(&missing).unwrap_err();
    assert!(err.to_string().contains("weapons.ron"));
}
