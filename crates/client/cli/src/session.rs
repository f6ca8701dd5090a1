//! Match setup from a content directory.

use anyhow::{Context, Result};
use tactics_content::ContentFactory;
use tactics_core::{GridSight, RoundState, SeededDice, World};

use crate::config::CliConfig;

/// Loads the content directory and builds a populated world.
pub fn build_world(config: &CliConfig) -> Result<World> {
    let factory = ContentFactory::new(&config.content_dir);
    let sim = factory.load_config()?;
    let weapons = factory.load_weapons()?;
    let map = factory.load_map(&config.map)?;
    let specs = map.place(factory.load_roster()?)?;

    let attacking = config.matches.first_attacking;
    let origin = map
        .objective
        .or_else(|| map.spawn_positions(attacking).first().copied())
        .unwrap_or_default();
    let round = RoundState::new(attacking, map.sites.clone(), None, origin);
    let ctx = map
        .context(weapons)
        .with_vision(GridSight::default())
        .with_dice(SeededDice::new(config.matches.seed));

    let mut world = World::new(ctx, sim, round);
    for spec in specs {
        let name = spec.name.clone();
        world
            .add_agent(spec)
            .with_context(|| format!("failed to add agent {name:?}"))?;
    }
    tracing::info!(
        map = %map.name,
        agents = world.agents().len(),
        sites = map.sites.len(),
        "world ready"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::TeamId;

    #[test]
    fn bundled_content_builds_two_teams() {
        let world = build_world(&CliConfig::default()).unwrap();
        for team in TeamId::ALL {
            assert!(!world.members(team).is_empty(), "{team} has no agents");
        }
        assert!(!world.zones().is_empty());
        assert!(!world.round().sites().is_empty());
    }

    #[test]
    fn missing_map_names_the_file() {
        let config = CliConfig {
            map: "atlantis".into(),
            ..CliConfig::default()
        };
        let err = build_world(&config).unwrap_err();
        assert!(format!("{err:#}").contains("atlantis.ron"));
    }
}
