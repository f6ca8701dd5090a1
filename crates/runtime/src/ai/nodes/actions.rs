//! Action nodes for agent behavior trees.
//!
//! Actions turn decisions into state-machine transitions. Trips across the
//! map are started as a Move whose arrival callback raises a flag on the
//! blackboard; the leaf that started a trip reports Running until the flag
//! is up and fails if the Move was cut short.

use behavior_tree::{Behavior, Status};
use glam::Vec2;
use tactics_core::{Region, SimTime, StateCommand, StateKind, TileGrid, World};

use crate::ai::blackboard::{TeamAction, Travel, TravelPurpose};
use crate::ai::context::AgentCtx;

// ============================================================================
// Trips
// ============================================================================

/// Where the blackboard's trip stands for one leaf.
enum Trip {
    /// No trip on the board.
    None,
    /// The board holds a trip started by another leaf.
    Foreign,
    Underway,
    Arrived,
    /// The Move ended without arriving.
    Interrupted,
}

fn begin_trip(ctx: &mut AgentCtx, travel: Travel) {
    let arrived = travel.arrived.clone();
    tracing::debug!(agent = %ctx.agent, destination = %travel.label, "trip started");
    ctx.transition(StateCommand::move_then(travel.target, move |_, _| arrived.set(true)));
    ctx.blackboard.travel = Some(travel);
}

fn poll_trip(ctx: &mut AgentCtx, purpose: TravelPurpose) -> Trip {
    let Some(travel) = &ctx.blackboard.travel else {
        return Trip::None;
    };
    if travel.purpose != purpose {
        return Trip::Foreign;
    }
    let trip = if travel.has_arrived() {
        Trip::Arrived
    } else if ctx.state() == Some(StateKind::Move) {
        Trip::Underway
    } else {
        Trip::Interrupted
    };
    if matches!(trip, Trip::Arrived | Trip::Interrupted) {
        ctx.blackboard.travel = None;
    }
    trip
}

/// A random walkable point inside `region`.
fn random_point_in(world: &mut World, region: &Region) -> Option<Vec2> {
    let cells: Vec<_> = region.walkable_cells(world.grid()).collect();
    if cells.is_empty() {
        return None;
    }
    let cell = cells[world.dice().index(cells.len())];
    Some(TileGrid::center_of(world.grid(), cell))
}

// ============================================================================
// Movement
// ============================================================================

/// Walks to a random point of a random zone, avoiding the zone it visited
/// last when there is a choice.
#[derive(Debug, Default)]
pub struct MoveToRandomZone {
    previous: Option<String>,
}

impl MoveToRandomZone {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior<AgentCtx> for MoveToRandomZone {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        match poll_trip(ctx, TravelPurpose::Wander) {
            Trip::Arrived => return Status::Success,
            Trip::Underway => return Status::Running,
            Trip::Interrupted | Trip::Foreign => return Status::Failure,
            Trip::None => {}
        }

        let candidates: Vec<Region> = {
            let zones = ctx.world.zones();
            let fresh: Vec<Region> = zones
                .iter()
                .filter(|zone| Some(&zone.name) != self.previous.as_ref())
                .cloned()
                .collect();
            if fresh.is_empty() { zones.to_vec() } else { fresh }
        };
        if candidates.is_empty() {
            return Status::Failure;
        }
        let zone = &candidates[ctx.world.dice().index(candidates.len())];
        let Some(target) = random_point_in(&mut ctx.world, zone) else {
            return Status::Failure;
        };

        self.previous = Some(zone.name.clone());
        begin_trip(ctx, Travel::new(TravelPurpose::Wander, zone.name.clone(), target));
        Status::Running
    }
}

/// Leaves the agent where it is.
///
/// A Move nobody is waiting for is stopped; Idle and Hold are kept.
pub struct IdleAction;

impl Behavior<AgentCtx> for IdleAction {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        if ctx.state() == Some(StateKind::Move) && ctx.blackboard.travel.is_none() {
            ctx.transition(StateCommand::Idle);
        }
        Status::Success
    }
}

/// Keeps the tree out of the way while the machine runs a committed state.
pub struct ContinueCurrentState;

impl Behavior<AgentCtx> for ContinueCurrentState {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        match ctx.state() {
            Some(
                StateKind::Shoot
                | StateKind::Plant
                | StateKind::Defuse
                | StateKind::Die
                | StateKind::Respawn
                | StateKind::JigglePeek,
            ) => Status::Running,
            _ => Status::Failure,
        }
    }
}

/// Pops the next order from the team board and carries it out.
pub struct ExecuteNextTeamAction;

impl Behavior<AgentCtx> for ExecuteNextTeamAction {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        match poll_trip(ctx, TravelPurpose::TeamOrder) {
            Trip::Arrived => return Status::Success,
            Trip::Underway => return Status::Running,
            Trip::Interrupted | Trip::Foreign => return Status::Failure,
            Trip::None => {}
        }

        let Some(action) = ctx.team.next_action() else {
            return Status::Failure;
        };
        ctx.blackboard.hold_until = None;
        tracing::debug!(agent = %ctx.agent, ?action, "executing team action");

        match action {
            TeamAction::Push(zone) | TeamAction::Regroup(zone) => {
                let Some(region) = ctx.world.zones().iter().find(|r| r.name == zone).cloned() else {
                    tracing::warn!(%zone, "team action names an unknown zone");
                    return Status::Failure;
                };
                let Some(target) = random_point_in(&mut ctx.world, &region) else {
                    return Status::Failure;
                };
                begin_trip(ctx, Travel::new(TravelPurpose::TeamOrder, zone, target));
                Status::Running
            }
            TeamAction::Hold(point) => {
                let until = SimTime(ctx.world.now().as_millis() + ctx.ai.hold_ms);
                ctx.transition(StateCommand::Hold { point });
                ctx.blackboard.hold_until = Some(until);
                Status::Success
            }
            TeamAction::Peek { cover, peek } => {
                ctx.transition(StateCommand::JigglePeek { cover, peek });
                Status::Success
            }
        }
    }
}

// ============================================================================
// Combat
// ============================================================================

/// Shoots at the attacker stored by [`ShouldFightBack`](super::ShouldFightBack).
pub struct FightBack;

impl Behavior<AgentCtx> for FightBack {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let Some(threat) = ctx.blackboard.threat.take() else {
            return Status::Failure;
        };
        ctx.blackboard.travel = None;
        ctx.transition(StateCommand::Shoot { target: Some(threat) });
        Status::Success
    }
}

// ============================================================================
// Objective
// ============================================================================

/// Starts planting at the team's target site, or the nearest site.
///
/// When the Plant state refuses to start (no path, wrong side), the leaf
/// backs off for a while before trying again.
#[derive(Debug, Default)]
pub struct PlantAtSite {
    retry_at: Option<SimTime>,
}

impl PlantAtSite {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior<AgentCtx> for PlantAtSite {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let now = ctx.world.now();
        if self.retry_at.is_some_and(|at| now < at) {
            return Status::Failure;
        }
        let Some(position) = ctx.me().map(|me| me.position) else {
            return Status::Failure;
        };
        let site = ctx.team.target_site.clone().or_else(|| {
            ctx.world
                .round()
                .sites()
                .iter()
                .min_by(|a, b| {
                    a.position
                        .distance_squared(position)
                        .total_cmp(&b.position.distance_squared(position))
                })
                .map(|site| site.name.clone())
        });
        let Some(site) = site else {
            return Status::Failure;
        };

        ctx.blackboard.travel = None;
        ctx.transition(StateCommand::Plant { site: site.clone() });
        if ctx.state() == Some(StateKind::Plant) {
            self.retry_at = None;
            Status::Running
        } else {
            tracing::debug!(agent = %ctx.agent, %site, "plant refused, backing off");
            self.retry_at = Some(SimTime(now.as_millis() + ctx.ai.retry_ms));
            Status::Failure
        }
    }
}

/// Walks onto the dropped objective; pickup happens on contact.
pub struct RetrieveObjective;

impl Behavior<AgentCtx> for RetrieveObjective {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let carrier = ctx.world.round().carrier();
        match poll_trip(ctx, TravelPurpose::Objective) {
            Trip::Arrived => return Status::from(carrier == Some(ctx.agent)),
            Trip::Underway if carrier.is_some() => {
                ctx.blackboard.travel = None;
                ctx.transition(StateCommand::Idle);
                return Status::from(carrier == Some(ctx.agent));
            }
            Trip::Underway => return Status::Running,
            Trip::Interrupted | Trip::Foreign => return Status::Failure,
            Trip::None => {}
        }

        let Some(dropped) = ctx.world.round().dropped_at() else {
            return Status::Failure;
        };
        begin_trip(ctx, Travel::new(TravelPurpose::Objective, "objective", dropped));
        Status::Running
    }
}

/// Starts defusing the planted objective.
#[derive(Debug, Default)]
pub struct DefuseObjective {
    retry_at: Option<SimTime>,
}

impl DefuseObjective {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior<AgentCtx> for DefuseObjective {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let now = ctx.world.now();
        if self.retry_at.is_some_and(|at| now < at) {
            return Status::Failure;
        }
        let Some(site) = ctx.world.round().planted().map(|(site, _)| site.to_string()) else {
            return Status::Failure;
        };

        ctx.blackboard.travel = None;
        ctx.transition(StateCommand::Defuse { site });
        if ctx.state() == Some(StateKind::Defuse) {
            self.retry_at = None;
            Status::Running
        } else {
            self.retry_at = Some(SimTime(now.as_millis() + ctx.ai.retry_ms));
            Status::Failure
        }
    }
}
