use glam::Vec2;

use super::PathFollower;
use crate::agent::AgentId;
use crate::fsm::{State, StateCommand};
use crate::time::SimTime;
use crate::vision::angle_between;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    ToPeek,
    Peeking(SimTime),
    ToCover,
    Covered(SimTime),
}

/// Alternates between a cover point and a peek point.
///
/// Spotting an enemy while exposed switches to Shoot. After the configured
/// number of cycles the agent settles in Idle at cover.
#[derive(Clone, Debug)]
pub struct JigglePeekState {
    cover: Vec2,
    peek: Vec2,
    phase: Phase,
    follower: PathFollower,
    cycles: u32,
}

impl JigglePeekState {
    pub fn new(cover: Vec2, peek: Vec2) -> Self {
        Self {
            cover,
            peek,
            phase: Phase::ToPeek,
            follower: PathFollower::default(),
            cycles: 0,
        }
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles
    }

    /// Plans a path to `point`; `false` when it is unreachable.
    fn head_to(&mut self, phase: Phase, point: Vec2, agent: AgentId, world: &World) -> bool {
        let Some(waypoints) = world.plan_path(agent, point) else {
            tracing::debug!(%agent, ?point, "peek leg unreachable");
            return false;
        };
        self.phase = phase;
        self.follower = PathFollower::new(waypoints);
        true
    }

    fn walk(&mut self, agent: AgentId, world: &mut World) -> Option<bool> {
        let movement = &world.config().movement;
        let (speed, radius) = (movement.speed, movement.arrival_radius);
        let dt = world.clock().delta_secs();
        let body = world.agent_mut(agent)?;
        Some(self.follower.advance(body, speed, dt, radius))
    }

    fn engage(&self, agent: AgentId, world: &World) -> Option<StateCommand> {
        world
            .nearest_visible_enemy(agent)
            .map(|enemy| StateCommand::Shoot { target: Some(enemy) })
    }
}

impl State for JigglePeekState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        self.cycles = 0;
        if let Some(body) = world.agent_mut(agent) {
            body.velocity = Vec2::ZERO;
        }
        if !self.head_to(Phase::ToPeek, self.peek, agent, world) {
            return Some(StateCommand::Idle);
        }
        None
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        let now = world.now();
        let dwell = world.config().movement.peek_dwell_ms;
        let wanted = world.config().movement.peek_cycles;

        match self.phase {
            Phase::ToPeek => {
                if let Some(command) = self.engage(agent, world) {
                    return Some(command);
                }
                if self.walk(agent, world)? {
                    self.phase = Phase::Peeking(now);
                }
            }
            Phase::Peeking(since) => {
                let facing = angle_between(self.cover, self.peek);
                if let Some(body) = world.agent_mut(agent) {
                    body.facing = facing;
                }
                if let Some(command) = self.engage(agent, world) {
                    return Some(command);
                }
                if now.has_elapsed(since, dwell) && !self.head_to(Phase::ToCover, self.cover, agent, world) {
                    return Some(StateCommand::Idle);
                }
            }
            Phase::ToCover => {
                if self.walk(agent, world)? {
                    self.cycles += 1;
                    if self.cycles >= wanted {
                        return Some(StateCommand::Idle);
                    }
                    self.phase = Phase::Covered(now);
                }
            }
            Phase::Covered(since) => {
                if now.has_elapsed(since, dwell) && !self.head_to(Phase::ToPeek, self.peek, agent, world) {
                    return Some(StateCommand::Idle);
                }
            }
        }
        None
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        if let Some(body) = world.agent_mut(agent) {
            body.velocity = Vec2::ZERO;
        }
    }
}
