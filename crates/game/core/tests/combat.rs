mod common;

use common::{center, spawn, spawn_armed, world};
use glam::Vec2;
use tactics_core::{
    AgentId, Cell, GridSight, RoundState, ScriptedDice, SeededDice, ShotOutcome, SimConfig, SimContext, SimEvent,
    StateCommand, StateKind, StreakKind, TeamId, Tile, TileMap, World, combat,
};

fn hot_checks(world: &World, agent: AgentId) -> usize {
    world
        .log()
        .iter()
        .filter(|logged| {
            matches!(
                logged.event,
                SimEvent::StreakCheck { agent: a, kind: StreakKind::Hot, .. } if a == agent
            )
        })
        .count()
}

#[test]
fn successful_headshot_kills_in_one_shot() {
    // Accuracy roll 50 against 50% and headshot roll 20 against 20%.
    let mut world = world(ScriptedDice::new([50, 20]));
    let shooter = spawn_armed(&mut world, "chamber", TeamId::Alpha, center(10, 2), "vandal");
    let target = spawn(&mut world, "deadlock", TeamId::Bravo, center(10, 6));
    assert_eq!(world.agent(shooter).unwrap().stats.accuracy, 50);
    assert_eq!(world.agent(shooter).unwrap().stats.headshot, 20);

    world.transition(shooter, StateCommand::Shoot { target: None });
    world.advance(250);
    world.step_agent(shooter);

    let victim = world.agent(target).unwrap();
    assert_eq!(victim.health, 0);
    assert_eq!(world.state_of(target), Some(StateKind::Die));
    assert_eq!(victim.killer, Some(shooter));
    assert_eq!(world.agent(shooter).unwrap().score.kills, 1);
    assert_eq!(hot_checks(&world, shooter), 1);
}

#[test]
fn shooter_waits_out_reaction_window() {
    let mut world = world(ScriptedDice::new([1, 1]));
    let shooter = spawn_armed(&mut world, "iso", TeamId::Alpha, center(10, 2), "vandal");
    let target = spawn(&mut world, "clove", TeamId::Bravo, center(10, 6));

    world.transition(shooter, StateCommand::Shoot { target: Some(target) });
    world.advance(249);
    world.step_agent(shooter);
    assert_eq!(world.agent(target).unwrap().health, 100);

    world.advance(1);
    world.step_agent(shooter);
    assert_eq!(world.agent(target).unwrap().health, 0);
}

#[test]
fn kill_is_credited_once_and_others_assist() {
    let mut world = world(SeededDice::new(5));
    let first = spawn(&mut world, "astra", TeamId::Alpha, center(3, 3));
    let second = spawn(&mut world, "harbor", TeamId::Alpha, center(3, 5));
    let finisher = spawn(&mut world, "brim", TeamId::Alpha, center(3, 7));
    let victim = spawn(&mut world, "tejo", TeamId::Bravo, center(12, 12));

    combat::apply_damage(&mut world, first, victim, 30);
    combat::apply_damage(&mut world, second, victim, 30);
    combat::apply_damage(&mut world, first, victim, 10);
    let report = combat::apply_damage(&mut world, finisher, victim, 80).unwrap();
    assert!(report.lethal);
    assert_eq!(report.dealt, 30);

    // Damage after death changes nothing.
    assert_eq!(combat::apply_damage(&mut world, second, victim, 50), None);

    let score = |id| world.agent(id).unwrap().score;
    assert_eq!(score(finisher).kills, 1);
    assert_eq!(score(finisher).assists, 0);
    assert_eq!(score(first).assists, 1);
    assert_eq!(score(second).assists, 1);
    assert_eq!(score(first).kills + score(second).kills, 0);
    assert_eq!(score(victim).deaths, 1);

    let rewards = &world.config().rewards;
    assert_eq!(world.agent(finisher).unwrap().credits, rewards.kill);
    assert_eq!(world.agent(first).unwrap().credits, rewards.assist);

    let kills: Vec<_> = world
        .log()
        .iter()
        .filter_map(|logged| match &logged.event {
            SimEvent::Killed { killer, assists, .. } => Some((*killer, assists.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(kills, vec![(finisher, vec![first, second])]);
    assert!(world.intel(TeamId::Alpha).get("tejo").unwrap().is_dead);
}

#[test]
fn health_stays_in_bounds_and_zero_means_die() {
    let mut world = world(SeededDice::new(2024));
    let alpha = [
        spawn_armed(&mut world, "a1", TeamId::Alpha, center(9, 2), "vandal"),
        spawn(&mut world, "a2", TeamId::Alpha, center(11, 2)),
    ];
    let bravo = [
        spawn(&mut world, "b1", TeamId::Bravo, center(9, 7)),
        spawn_armed(&mut world, "b2", TeamId::Bravo, center(11, 7), "spectre"),
    ];
    for id in alpha {
        world.agent_mut(id).unwrap().facing = 0.0;
    }
    for id in bravo {
        world.agent_mut(id).unwrap().facing = core::f32::consts::PI;
    }
    let everyone: Vec<AgentId> = alpha.iter().chain(bravo.iter()).copied().collect();

    for tick in 0..600 {
        world.advance(50);
        for id in &everyone {
            if world.state_of(*id) == Some(StateKind::Idle) {
                world.transition(*id, StateCommand::Shoot { target: None });
            }
            world.step_agent(*id);
        }
        for agent in world.agents() {
            assert!(agent.health <= 100, "tick {tick}: {} has {}", agent.name, agent.health);
            if agent.health == 0 {
                assert_eq!(agent.state, StateKind::Die, "tick {tick}: {} dead but not dying", agent.name);
            }
        }
    }

    let deaths: u32 = world.agents().iter().map(|agent| agent.score.deaths).sum();
    let kills: u32 = world.agents().iter().map(|agent| agent.score.kills).sum();
    assert!(deaths > 0);
    assert_eq!(kills, deaths);
}

/// Shooter locked onto a target and still inside its reaction window.
fn engaged(world: &mut World) -> (AgentId, AgentId) {
    let shooter = spawn(world, "sova", TeamId::Alpha, center(10, 2));
    let target = spawn(world, "omen", TeamId::Bravo, center(10, 6));
    world.transition(shooter, StateCommand::Shoot { target: Some(target) });
    world.advance(100);
    world.step_agent(shooter);
    assert_eq!(world.state_of(shooter), Some(StateKind::Shoot));
    (shooter, target)
}

#[test]
fn engaged_shooter_stands_down_when_the_target_dies() {
    let mut world = world(SeededDice::new(1));
    let (shooter, target) = engaged(&mut world);
    let teammate = spawn(&mut world, "kayo", TeamId::Alpha, center(12, 2));
    combat::apply_damage(&mut world, teammate, target, 100);

    world.advance(100);
    world.step_agent(shooter);
    assert_eq!(world.state_of(shooter), Some(StateKind::Idle));
}

#[test]
fn engaged_shooter_stands_down_when_the_target_vanishes() {
    let mut world = world(SeededDice::new(1));
    let (shooter, target) = engaged(&mut world);
    world.agent_mut(target).unwrap().visible = false;

    world.advance(100);
    world.step_agent(shooter);
    assert_eq!(world.state_of(shooter), Some(StateKind::Idle));
    assert_eq!(world.agent(target).unwrap().health, 100);
}

#[test]
fn engaged_shooter_stands_down_when_a_wall_blocks_the_line() {
    let mut grid = TileMap::open(20, 20, common::TILE);
    for row in 0..20 {
        grid.set(Cell::new(row, 8), Tile::Wall);
    }
    let ctx = SimContext::new(grid, common::catalogue()).with_vision(GridSight::default());
    let round = RoundState::new(TeamId::Alpha, Vec::new(), None, Vec2::ZERO);
    let mut world = World::new(ctx, SimConfig::default(), round);
    let (shooter, target) = engaged(&mut world);

    world.agent_mut(target).unwrap().position = center(10, 12);
    world.advance(100);
    world.step_agent(shooter);
    assert_eq!(world.state_of(shooter), Some(StateKind::Idle));
}

#[test]
fn misses_trace_a_perturbed_angle() {
    let mut world = world(ScriptedDice::new(std::iter::repeat_n(100, 40)));
    let shooter = spawn(&mut world, "breach", TeamId::Alpha, center(10, 2));
    let target = spawn(&mut world, "skye", TeamId::Bravo, center(10, 6));
    let origin = world.agent(shooter).unwrap().position;
    let range = world.config().combat.vision_range;

    let (mut left, mut right) = (0, 0);
    for _ in 0..40 {
        let Some(ShotOutcome::Miss { trace_angle }) = combat::fire(&mut world, shooter, target) else {
            panic!("a roll of 100 must miss");
        };
        // The true aim is straight along +x.
        let spread = trace_angle.abs().to_degrees();
        assert!((2.0 - 1e-3..=5.0 + 1e-3).contains(&spread), "spread {spread}");
        if trace_angle < 0.0 {
            left += 1;
        } else {
            right += 1;
        }

        let end = world.agent(shooter).unwrap().trace.unwrap();
        assert!(end.distance(origin + Vec2::from_angle(trace_angle) * range) < 1e-2);
    }
    assert!(left > 0 && right > 0);
    assert_eq!(world.agent(target).unwrap().health, 100);
}

#[test]
fn target_stays_under_fire_until_the_last_shooter_stops() {
    let mut world = world(ScriptedDice::new(std::iter::repeat_n(100, 10)));
    let first = spawn(&mut world, "phoenix", TeamId::Alpha, center(9, 2));
    let second = spawn(&mut world, "neon", TeamId::Alpha, center(11, 2));
    let target = spawn(&mut world, "fade", TeamId::Bravo, center(10, 6));
    for shooter in [first, second] {
        world.transition(shooter, StateCommand::Shoot { target: Some(target) });
    }
    world.advance(250);
    world.step_agent(first);
    world.step_agent(second);
    assert!(world.agent(target).unwrap().being_shot_at);

    world.transition(first, StateCommand::Idle);
    assert!(world.agent(target).unwrap().being_shot_at);

    world.transition(second, StateCommand::Idle);
    assert!(!world.agent(target).unwrap().being_shot_at);
}
