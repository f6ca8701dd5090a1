use crate::agent::AgentId;
use crate::events::SimEvent;
use crate::fsm::{State, StateCommand};
use crate::world::World;

/// Places the agent in a free spawn region, optionally buys a weapon, and
/// brings it back as a visible Idle agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RespawnState;

impl State for RespawnState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        let position = world.spawn_point(agent)?;
        let auto_buy = world.config().combat.auto_buy;
        let purchase = if auto_buy {
            let credits = world.agent(agent)?.credits;
            world
                .weapons()
                .best_affordable(credits)
                .map(|weapon| (weapon.name.clone(), weapon.cost))
        } else {
            None
        };

        let now = world.now();
        let body = world.agent_mut(agent)?;
        body.reset_life(position);
        body.last_healed_at = now;
        if let Some((weapon, cost)) = purchase {
            body.credits -= cost;
            body.weapon = weapon;
        }
        let weapon = body.weapon.clone();
        tracing::debug!(%agent, %weapon, ?position, "respawned");

        world.emit(SimEvent::Respawned { agent, weapon });
        Some(StateCommand::Idle)
    }

    fn execute(&mut self, _agent: AgentId, _world: &mut World) -> Option<StateCommand> {
        Some(StateCommand::Idle)
    }
}
