use glam::Vec2;

use crate::agent::AgentId;
use crate::combat;
use crate::fsm::{State, StateCommand};
use crate::time::SimTime;
use crate::world::World;

/// Engages one target: waits out the reaction window, then fires whenever the
/// weapon's cooldown allows.
#[derive(Clone, Copy, Debug)]
pub struct ShootState {
    target: Option<AgentId>,
    entered_at: SimTime,
    last_shot: Option<SimTime>,
}

impl ShootState {
    pub fn new(target: Option<AgentId>) -> Self {
        Self {
            target,
            entered_at: SimTime::ZERO,
            last_shot: None,
        }
    }

    pub fn target(&self) -> Option<AgentId> {
        self.target
    }
}

impl State for ShootState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        self.entered_at = world.now();
        if self.target.is_none() {
            self.target = world.nearest_visible_enemy(agent);
        }
        let Some(target) = self.target else {
            tracing::trace!(%agent, "no visible hostile to engage");
            return Some(StateCommand::Idle);
        };

        let target_position = world.agent(target).map(|enemy| enemy.position);
        if let Some(body) = world.agent_mut(agent) {
            body.velocity = Vec2::ZERO;
            if let Some(position) = target_position {
                body.face_towards(position);
            }
        }
        None
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        let Some(target) = self.target else {
            return Some(StateCommand::Idle);
        };
        if !world.can_engage(agent, target) {
            tracing::debug!(%agent, %target, "target lost");
            return Some(StateCommand::Idle);
        }

        let target_position = world.agent(target)?.position;
        world.agent_mut(agent)?.face_towards(target_position);

        let now = world.now();
        if !now.has_elapsed(self.entered_at, world.config().combat.reaction_window_ms) {
            return None;
        }
        let interval = world.weapon_of(agent)?.fire_interval_ms;
        if self.last_shot.is_some_and(|last| !now.has_elapsed(last, interval)) {
            return None;
        }

        combat::fire(world, agent, target);
        self.last_shot = Some(now);
        None
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        if let Some(body) = world.agent_mut(agent) {
            body.trace = None;
        }
        let Some(target) = self.target else {
            return;
        };
        if world.is_targeted(target, agent) {
            return;
        }
        if let Some(target) = world.agent_mut(target) {
            target.being_shot_at = false;
        }
    }
}
