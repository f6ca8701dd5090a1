//! Condition nodes for agent behavior trees.
//!
//! Condition nodes check the match state and return Success or Failure. Apart
//! from [`ShouldFightBack`], which records the attacker it found, they never
//! write anything.

use behavior_tree::{Behavior, Status};
use tactics_core::{RoundPhase, StateKind};

use super::nearest_active;
use crate::ai::blackboard::TravelPurpose;
use crate::ai::context::AgentCtx;

/// Checks whether the agent is free to travel.
///
/// Succeeds while idle, while a trip it started is still under way, and once
/// a team-ordered hold has run out.
pub struct ShouldMoveToZone;

impl Behavior<AgentCtx> for ShouldMoveToZone {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let now = ctx.world.now();
        let free = match ctx.state() {
            Some(StateKind::Idle) => true,
            Some(StateKind::Move) => ctx.blackboard.travel.is_some(),
            Some(StateKind::Hold) => ctx.blackboard.hold_until.is_some_and(|until| now >= until),
            _ => false,
        };
        Status::from(free && ctx.me().is_some_and(|me| me.is_active()))
    }
}

/// Checks for a recent attacker that can be engaged right now.
///
/// On success the attacker is stored in the `threat` slot.
pub struct ShouldFightBack;

impl Behavior<AgentCtx> for ShouldFightBack {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        if ctx.state() == Some(StateKind::Shoot) {
            return Status::Failure;
        }
        let Some(me) = ctx.me() else {
            return Status::Failure;
        };
        let Some(stamp) = me.last_damage else {
            return Status::Failure;
        };
        let memory = ctx.world.config().combat.fight_back_memory_ms;
        if ctx.world.now().elapsed_since(stamp.at) > memory || !ctx.world.can_engage(ctx.agent, stamp.attacker) {
            return Status::Failure;
        }

        tracing::debug!(agent = %ctx.agent, attacker = %stamp.attacker, "fighting back");
        ctx.blackboard.threat = Some(stamp.attacker);
        Status::Success
    }
}

/// Checks whether the agent carries the objective during a live round.
pub struct ShouldPlant;

impl Behavior<AgentCtx> for ShouldPlant {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let round = ctx.world.round();
        Status::from(
            round.phase == RoundPhase::Live
                && round.carrier() == Some(ctx.agent)
                && ctx.state() != Some(StateKind::Plant),
        )
    }
}

/// Checks whether the agent should pick up the dropped objective.
///
/// Only the active attacker nearest to it goes; an agent already walking to
/// it keeps going.
pub struct ShouldRetrieveObjective;

impl Behavior<AgentCtx> for ShouldRetrieveObjective {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let round = ctx.world.round();
        let Some(dropped) = round.dropped_at() else {
            return Status::Failure;
        };
        if ctx.me().is_none_or(|me| me.team != round.attacking) {
            return Status::Failure;
        }
        let underway = ctx
            .blackboard
            .travel
            .as_ref()
            .is_some_and(|travel| travel.purpose == TravelPurpose::Objective);
        Status::from(underway || nearest_active(&ctx.world, round.attacking, dropped) == Some(ctx.agent))
    }
}

/// Checks whether the agent is the defender nearest to the planted site.
pub struct ShouldDefuse;

impl Behavior<AgentCtx> for ShouldDefuse {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let round = ctx.world.round();
        let Some((site, _)) = round.planted() else {
            return Status::Failure;
        };
        let Some(position) = round.site(site).map(|site| site.position) else {
            return Status::Failure;
        };
        if ctx.state() == Some(StateKind::Defuse) {
            return Status::Failure;
        }
        Status::from(nearest_active(&ctx.world, round.defending(), position) == Some(ctx.agent))
    }
}

/// Checks whether the agent's team attacks this round.
pub struct IsAttackingSide;

impl Behavior<AgentCtx> for IsAttackingSide {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        let attacking = ctx.world.round().attacking;
        Status::from(ctx.me().is_some_and(|me| me.team == attacking))
    }
}

/// Checks whether the objective is planted.
pub struct IsObjectiveDown;

impl Behavior<AgentCtx> for IsObjectiveDown {
    fn tick(&mut self, ctx: &mut AgentCtx) -> Status {
        Status::from(ctx.world.round().is_objective_down())
    }
}
