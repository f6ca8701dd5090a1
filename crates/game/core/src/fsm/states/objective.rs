use glam::Vec2;

use super::PathFollower;
use crate::agent::{AgentId, Progress};
use crate::fsm::{State, StateCommand, StateKind};
use crate::time::SimTime;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveAction {
    Plant,
    Defuse,
}

/// Walks to a site, then runs the plant or defuse timer while stationary.
#[derive(Clone, Debug)]
pub struct ObjectiveTask {
    action: ObjectiveAction,
    site: String,
    follower: PathFollower,
    started: Option<SimTime>,
}

impl ObjectiveTask {
    pub fn plant(site: String) -> Self {
        Self::new(ObjectiveAction::Plant, site)
    }

    pub fn defuse(site: String) -> Self {
        Self::new(ObjectiveAction::Defuse, site)
    }

    fn new(action: ObjectiveAction, site: String) -> Self {
        Self {
            action,
            site,
            follower: PathFollower::default(),
            started: None,
        }
    }

    pub fn action(&self) -> ObjectiveAction {
        self.action
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn started(&self) -> Option<SimTime> {
        self.started
    }

    fn kind(&self) -> StateKind {
        match self.action {
            ObjectiveAction::Plant => StateKind::Plant,
            ObjectiveAction::Defuse => StateKind::Defuse,
        }
    }

    fn duration_ms(&self, world: &World) -> u64 {
        match self.action {
            ObjectiveAction::Plant => world.config().round.plant_ms,
            ObjectiveAction::Defuse => world.config().round.defuse_ms,
        }
    }

    fn allowed(&self, agent: AgentId, world: &World) -> bool {
        match self.action {
            ObjectiveAction::Plant => world.can_plant(agent, &self.site),
            ObjectiveAction::Defuse => world.can_defuse(agent, &self.site),
        }
    }

    fn start_timer(&mut self, agent: AgentId, world: &mut World) {
        self.started = Some(world.now());
        let action = self.kind();
        if let Some(body) = world.agent_mut(agent) {
            body.velocity = Vec2::ZERO;
            body.progress = Some(Progress { action, fraction: 0.0 });
        }
        tracing::debug!(%agent, site = %self.site, ?action, "objective timer started");
    }
}

impl State for ObjectiveTask {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if !self.allowed(agent, world) {
            tracing::debug!(%agent, site = %self.site, action = ?self.action, "objective action not available");
            return Some(StateCommand::Idle);
        }
        let site = world.round().site(&self.site)?.position;
        let Some(waypoints) = world.plan_path(agent, site) else {
            tracing::debug!(%agent, site = %self.site, "site unreachable");
            return Some(StateCommand::Idle);
        };

        self.follower = PathFollower::new(waypoints);
        if self.follower.is_exhausted() {
            self.start_timer(agent, world);
        }
        None
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if !self.allowed(agent, world) {
            return Some(StateCommand::Idle);
        }

        let Some(started) = self.started else {
            let movement = &world.config().movement;
            let (speed, radius) = (movement.speed, movement.arrival_radius);
            let dt = world.clock().delta_secs();
            let body = world.agent_mut(agent)?;
            if self.follower.advance(body, speed, dt, radius) {
                self.start_timer(agent, world);
            }
            return None;
        };

        let duration = self.duration_ms(world);
        let elapsed = world.now().elapsed_since(started);
        let fraction = if duration == 0 {
            1.0
        } else {
            (elapsed as f32 / duration as f32).min(1.0)
        };
        let action = self.kind();
        if let Some(body) = world.agent_mut(agent) {
            body.velocity = Vec2::ZERO;
            body.progress = Some(Progress { action, fraction });
        }
        if elapsed < duration {
            return None;
        }

        match self.action {
            ObjectiveAction::Plant => world.plant_objective(agent, &self.site),
            ObjectiveAction::Defuse => world.defuse_objective(agent),
        };
        Some(StateCommand::Idle)
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        self.started = None;
        if let Some(body) = world.agent_mut(agent) {
            body.progress = None;
        }
    }
}
