use glam::Vec2;

use crate::agent::AgentId;
use crate::fsm::{State, StateCommand};
use crate::world::World;

/// Stationary; stays until something else issues a transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleState;

impl State for IdleState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if let Some(agent) = world.agent_mut(agent) {
            agent.velocity = Vec2::ZERO;
        }
        None
    }

    fn execute(&mut self, _agent: AgentId, _world: &mut World) -> Option<StateCommand> {
        None
    }
}
