use glam::Vec2;

use crate::agent::AgentId;
use crate::fsm::{State, StateCommand};
use crate::world::World;

/// Faces a held point without moving.
///
/// The point is published as the agent's hold location while the state is
/// active and cleared on exit.
#[derive(Clone, Copy, Debug)]
pub struct HoldState {
    point: Vec2,
}

impl HoldState {
    pub fn new(point: Vec2) -> Self {
        Self { point }
    }

    pub fn point(&self) -> Vec2 {
        self.point
    }
}

impl State for HoldState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if let Some(agent) = world.agent_mut(agent) {
            agent.velocity = Vec2::ZERO;
            agent.hold_location = Some(self.point);
            agent.face_towards(self.point);
        }
        None
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if let Some(agent) = world.agent_mut(agent) {
            agent.face_towards(self.point);
        }
        None
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        if let Some(agent) = world.agent_mut(agent) {
            agent.hold_location = None;
        }
    }
}
