use glam::Vec2;

use crate::agent::AgentId;
use crate::events::SimEvent;
use crate::fsm::{State, StateCommand};
use crate::time::SimTime;
use crate::world::World;

/// Hidden and inert until the respawn delay has passed.
#[derive(Clone, Copy, Debug, Default)]
pub struct DieState {
    died_at: SimTime,
}

impl State for DieState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        self.died_at = world.now();
        world.drop_objective(agent);

        let default_weapon = world.weapons().default_name().to_string();
        let body = world.agent_mut(agent)?;
        body.weapon = default_weapon;
        body.healing = false;
        body.velocity = Vec2::ZERO;
        body.visible = false;
        body.being_shot_at = false;
        body.pending_reaction = None;
        body.spotted.clear();
        body.trace = None;
        body.progress = None;

        world.emit(SimEvent::Died { agent });
        None
    }

    fn execute(&mut self, _agent: AgentId, world: &mut World) -> Option<StateCommand> {
        let delay = world.config().combat.respawn_delay_ms;
        world
            .now()
            .has_elapsed(self.died_at, delay)
            .then_some(StateCommand::Respawn)
    }
}
