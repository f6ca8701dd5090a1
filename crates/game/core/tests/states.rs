mod common;

use std::cell::Cell as Counter;
use std::rc::Rc;

use common::{center, run_until, spawn, world};
use glam::Vec2;
use tactics_core::{
    ClearSight, MAX_HEALTH, Objective, RoundPhase, RoundState, SeededDice, SimConfig, SimContext, StateCommand,
    StateKind, TeamId, TileMap, World, combat,
};

#[test]
fn move_invokes_arrival_callback_exactly_once() {
    let mut world = world(SeededDice::new(1));
    let (p1, p3) = (center(4, 2), center(4, 4));
    let id = spawn(&mut world, "jett", TeamId::Alpha, p1);
    assert_eq!(world.plan_path(id, p3).unwrap(), vec![center(4, 3), p3]);

    let calls = Rc::new(Counter::new(0));
    let seen = calls.clone();
    world.transition(id, StateCommand::move_then(p3, move |_, _| seen.set(seen.get() + 1)));

    let ticks = run_until(&mut world, &[id], 50, 200, |_| false);
    assert_eq!(ticks, 200);
    assert_eq!(calls.get(), 1);
    assert_eq!(world.state_of(id), Some(StateKind::Idle));
    assert_eq!(world.agent(id).unwrap().position, p3);
}

#[test]
fn plant_completes_after_timer_at_site() {
    let mut world = world(SeededDice::new(1));
    let planter = spawn(&mut world, "raze", TeamId::Alpha, center(8, 5));
    world.round_mut().objective = Objective::Carried(planter);

    world.transition(planter, StateCommand::Plant { site: "A".into() });
    run_until(&mut world, &[planter], 50, 100, |w| {
        w.agent(planter).unwrap().progress.is_some()
    });
    let started = world.now();
    assert_eq!(world.agent(planter).unwrap().position, center(8, 8));
    assert_eq!(world.round().phase, RoundPhase::Live);

    run_until(&mut world, &[planter], 50, 200, |w| w.round().phase == RoundPhase::Planted);
    let (site, at) = world.round().planted().unwrap();
    assert_eq!(site, "A");
    assert_eq!(at.elapsed_since(started), world.config().round.plant_ms);
    assert_eq!(world.state_of(planter), Some(StateKind::Idle));
    assert_eq!(world.agent(planter).unwrap().progress, None);
    assert_eq!(world.agent(planter).unwrap().credits, world.config().rewards.plant);
}

#[test]
fn leaving_plant_early_clears_progress() {
    let mut world = world(SeededDice::new(1));
    let planter = spawn(&mut world, "kayo", TeamId::Alpha, center(8, 8));
    world.round_mut().objective = Objective::Carried(planter);

    world.transition(planter, StateCommand::Plant { site: "A".into() });
    run_until(&mut world, &[planter], 100, 20, |_| false);
    assert!(world.agent(planter).unwrap().progress.unwrap().fraction > 0.0);

    world.transition(planter, StateCommand::Hold { point: center(0, 0) });
    assert_eq!(world.agent(planter).unwrap().progress, None);
    run_until(&mut world, &[planter], 100, 60, |_| false);
    assert_eq!(world.round().phase, RoundPhase::Live);
    assert_eq!(world.round().carrier(), Some(planter));
}

#[test]
fn defenders_cannot_plant() {
    let mut world = world(SeededDice::new(1));
    let defender = spawn(&mut world, "sage", TeamId::Bravo, center(8, 8));
    world.transition(defender, StateCommand::Plant { site: "A".into() });
    assert_eq!(world.state_of(defender), Some(StateKind::Idle));
}

#[test]
fn respawn_resets_life_and_buys_a_weapon() {
    let mut world = world(SeededDice::new(9));
    let killer = spawn(&mut world, "reyna", TeamId::Alpha, center(3, 3));
    let victim = spawn(&mut world, "yoru", TeamId::Bravo, center(10, 10));
    world.agent_mut(victim).unwrap().credits = 3000;

    combat::apply_damage(&mut world, killer, victim, 140);
    assert_eq!(world.state_of(victim), Some(StateKind::Die));
    let dying = world.agent(victim).unwrap();
    assert!(!dying.visible);
    assert!(!dying.healing);
    assert_eq!(dying.weapon, "classic");

    world.advance(4999);
    world.step_agent(victim);
    assert_eq!(world.state_of(victim), Some(StateKind::Die));

    world.advance(1);
    world.step_agent(victim);
    assert_eq!(world.state_of(victim), Some(StateKind::Idle));

    let body = world.agent(victim).unwrap();
    assert_eq!(body.health, MAX_HEALTH);
    assert!(body.ledger.is_empty());
    assert_eq!(body.killer, None);
    assert!(body.visible);
    assert!(body.healing);
    assert_eq!(body.weapon, "vandal");
    assert_eq!(body.credits, 100);
    let cell = world.grid().cell_at(body.position).unwrap();
    assert!((17..=18).contains(&cell.row) && (17..=18).contains(&cell.col));

    // A new life can be credited to a different killer.
    let other = spawn(&mut world, "neon", TeamId::Alpha, center(3, 5));
    combat::apply_damage(&mut world, other, victim, 100);
    assert_eq!(world.agent(victim).unwrap().killer, Some(other));
    assert_eq!(world.agent(victim).unwrap().score.deaths, 2);
}

#[test]
fn dying_carrier_drops_the_objective() {
    let mut world = world(SeededDice::new(3));
    let carrier = spawn(&mut world, "fade", TeamId::Alpha, center(6, 6));
    let enemy = spawn(&mut world, "viper", TeamId::Bravo, center(12, 12));
    world.round_mut().objective = Objective::Carried(carrier);

    combat::apply_damage(&mut world, enemy, carrier, 100);
    assert_eq!(world.round().dropped_at(), Some(center(6, 6)));

    let courier = spawn(&mut world, "sova", TeamId::Alpha, center(6, 5));
    world.step_agent(courier);
    assert_eq!(world.round().carrier(), Some(courier));
}

#[test]
fn jiggle_peek_settles_at_cover() {
    let mut world = world(SeededDice::new(1));
    let (cover, peek) = (center(5, 2), center(5, 4));
    let id = spawn(&mut world, "cypher", TeamId::Alpha, cover);

    world.transition(id, StateCommand::JigglePeek { cover, peek });
    let ticks = run_until(&mut world, &[id], 50, 400, |w| w.state_of(id) == Some(StateKind::Idle));
    assert!(ticks < 400);
    assert_eq!(world.agent(id).unwrap().position, cover);
}

#[test]
fn jiggle_peek_engages_enemy_spotted_while_peeking() {
    let mut world = world(SeededDice::new(1));
    let (cover, peek) = (center(5, 2), center(5, 4));
    let id = spawn(&mut world, "killjoy", TeamId::Alpha, cover);
    let enemy = spawn(&mut world, "gekko", TeamId::Bravo, center(5, 10));
    world.agent_mut(enemy).unwrap().visible = false;

    world.transition(id, StateCommand::JigglePeek { cover, peek });
    run_until(&mut world, &[id], 50, 100, |w| w.agent(id).unwrap().position == peek);
    assert_eq!(world.state_of(id), Some(StateKind::JigglePeek));

    world.agent_mut(enemy).unwrap().visible = true;
    world.advance(50);
    world.step_agent(id);
    assert_eq!(world.state_of(id), Some(StateKind::Shoot));
}

#[test]
fn moving_after_a_hold_faces_the_path_again() {
    let mut world = world(SeededDice::new(1));
    let id = spawn(&mut world, "deadlock", TeamId::Alpha, center(10, 10));
    let enemy = spawn(&mut world, "vyse", TeamId::Bravo, center(10, 17));

    world.transition(id, StateCommand::Hold { point: center(10, 0) });
    world.advance(50);
    world.step_agent(id);
    assert!(world.agent(id).unwrap().spotted.is_empty());

    world.transition(id, StateCommand::move_to(center(10, 18)));
    assert_eq!(world.agent(id).unwrap().hold_location, None);
    run_until(&mut world, &[id], 50, 2, |_| false);

    let body = world.agent(id).unwrap();
    assert_eq!(world.state_of(id), Some(StateKind::Move));
    assert!(body.facing.abs() < 1e-3, "facing {}", body.facing);
    assert_eq!(body.spotted, vec![enemy]);
    assert_eq!(world.visible_enemies(id), vec![enemy]);
}

#[test]
fn jiggle_peek_walks_around_walls() {
    let grid = TileMap::from_ascii(
        &[
            ".......", //
            "...#...", //
            "...#...", //
            "...#...", //
            ".......",
        ],
        common::TILE,
    )
    .unwrap();
    let ctx = SimContext::new(grid, common::catalogue()).with_vision(ClearSight);
    let round = RoundState::new(TeamId::Alpha, Vec::new(), None, Vec2::ZERO);
    let mut world = World::new(ctx, SimConfig::default(), round);
    let (cover, peek) = (center(2, 1), center(2, 5));
    let id = spawn(&mut world, "tejo", TeamId::Alpha, cover);

    world.transition(id, StateCommand::JigglePeek { cover, peek });
    let inside_wall = |point: Vec2| point.x > 49.0 && point.x < 63.0 && point.y > 17.0 && point.y < 63.0;
    let mut reached_peek = false;
    for _ in 0..400 {
        world.advance(50);
        world.step_agent(id);
        let position = world.agent(id).unwrap().position;
        assert!(!inside_wall(position), "walked into the wall at {position}");
        reached_peek |= position.distance(peek) < 1.0;
        if world.state_of(id) == Some(StateKind::Idle) {
            break;
        }
    }
    assert!(reached_peek);
    assert_eq!(world.state_of(id), Some(StateKind::Idle));
    assert!(world.agent(id).unwrap().position.distance(cover) < 1e-3);
}

#[test]
fn jiggle_peek_to_an_enclosed_point_stays_idle() {
    let mut world = world(SeededDice::new(1));
    let cover = center(5, 2);
    let id = spawn(&mut world, "omen", TeamId::Alpha, cover);
    world.transition(id, StateCommand::JigglePeek { cover, peek: Vec2::new(-40.0, -40.0) });
    assert_eq!(world.state_of(id), Some(StateKind::Idle));
    assert_eq!(world.agent(id).unwrap().position, cover);
}
