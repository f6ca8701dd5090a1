//! Per-agent tick: reaction, vision, state machine, then passive upkeep.

use crate::agent::{AgentEvent, AgentId, MAX_HEALTH, MentalState};
use crate::events::SimEvent;
use crate::fsm::{ActiveState, StateCommand, StateKind};

use super::World;

impl World {
    /// Runs one tick for one agent.
    ///
    /// Order: due return fire, vision scan, state machine step, objective
    /// pickup, passive healing, streak expiry, then observer notifications.
    pub fn step_agent(&mut self, id: AgentId) {
        if self.agent(id).is_none() {
            tracing::warn!(%id, "step for unknown agent");
            return;
        }
        self.poll_reaction(id);
        self.scan(id);
        self.step_machine(id);
        self.pick_up_objective(id);
        self.heal(id);
        self.expire_streak(id);
        self.flush_notifications();
    }

    /// Turns on the shooter once the reaction delay has elapsed.
    fn poll_reaction(&mut self, id: AgentId) {
        let now = self.now();
        let Some(agent) = self.agent_mut(id) else {
            return;
        };
        let Some(reaction) = agent.pending_reaction else {
            return;
        };
        if now < reaction.due {
            return;
        }
        agent.pending_reaction = None;
        if !agent.is_active() {
            return;
        }

        let Some(shooter) = self.agent(reaction.shooter) else {
            return;
        };
        let (shooter_position, shooter_alive) = (shooter.position, shooter.is_active());
        if let Some(agent) = self.agent_mut(id) {
            agent.face_towards(shooter_position);
        }
        if !shooter_alive || self.is_engaging(id, reaction.shooter) {
            return;
        }
        tracing::debug!(%id, shooter = %reaction.shooter, "returning fire");
        self.transition(
            id,
            StateCommand::Shoot {
                target: Some(reaction.shooter),
            },
        );
    }

    fn is_engaging(&self, id: AgentId, target: AgentId) -> bool {
        matches!(
            self.machine(id).and_then(|machine| machine.current()),
            Some(ActiveState::Shoot(shoot)) if shoot.target() == Some(target)
        )
    }

    /// Refreshes the agent's spotted list and its team's intel.
    fn scan(&mut self, id: AgentId) {
        let now = self.now();
        let visible = self.visible_enemies(id);
        let Some(agent) = self.agent_mut(id) else {
            return;
        };
        let team = agent.team;
        let newly: Vec<AgentId> = visible
            .iter()
            .copied()
            .filter(|enemy| !agent.spotted.contains(enemy))
            .collect();
        agent.spotted = visible.clone();

        let intel = &mut self.intel[team.index()];
        for enemy in &visible {
            if let Some(enemy) = self.agents.get(enemy.index()) {
                intel.observe(enemy, true, now);
            }
        }
        for enemy in newly {
            tracing::debug!(%id, %enemy, "enemy detected");
            self.emit(SimEvent::EnemyDetected { agent: id, enemy });
            self.notify(id, AgentEvent::DetectedEnemy { enemy });
        }
    }

    fn pick_up_objective(&mut self, id: AgentId) {
        let Some(dropped) = self.round.dropped_at() else {
            return;
        };
        let radius = self.config.round.pickup_radius;
        let eligible = self.agent(id).is_some_and(|agent| {
            agent.is_active() && agent.team == self.round.attacking && agent.position.distance(dropped) <= radius
        });
        if eligible && self.round.pick_up(id) {
            tracing::debug!(%id, "objective picked up");
            self.emit(SimEvent::ObjectivePickedUp { agent: id });
        }
    }

    fn heal(&mut self, id: AgentId) {
        let now = self.now();
        let combat = &self.config.combat;
        let (delay, interval, amount) = (combat.heal_delay_ms, combat.heal_interval_ms, combat.heal_amount);
        let Some(agent) = self.agents.get_mut(id.index()) else {
            return;
        };
        if !agent.is_alive() || !agent.healing || agent.health >= MAX_HEALTH || agent.state == StateKind::Die {
            return;
        }
        let rested = agent
            .last_damage
            .is_none_or(|stamp| now.has_elapsed(stamp.at, delay));
        if rested && now.has_elapsed(agent.last_healed_at, interval) {
            agent.health = (agent.health + amount).min(MAX_HEALTH);
            agent.last_healed_at = now;
        }
    }

    fn expire_streak(&mut self, id: AgentId) {
        let now = self.now();
        let Some(agent) = self.agents.get_mut(id.index()) else {
            return;
        };
        if agent.mental.expire(now, &self.config.streaks) {
            tracing::debug!(%id, "streak expired");
            self.emit(SimEvent::MentalChanged {
                agent: id,
                state: MentalState::Normal,
            });
        }
    }
}
