use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;

use crate::agent::{Agent, AgentId};
use crate::fsm::{ArrivalCallback, State, StateCommand};
use crate::world::World;

/// Queue of waypoints with point-to-point steering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathFollower {
    waypoints: VecDeque<Vec2>,
}

impl PathFollower {
    pub fn new(waypoints: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            waypoints: waypoints.into_iter().collect(),
        }
    }

    pub fn active(&self) -> Option<Vec2> {
        self.waypoints.front().copied()
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Moves `agent` towards the active waypoint for `dt` seconds.
    ///
    /// Waypoints closer than `radius` are consumed. The step never overshoots
    /// the active waypoint. Returns `true` once every waypoint is consumed.
    pub fn advance(&mut self, agent: &mut Agent, speed: f32, dt: f32, radius: f32) -> bool {
        self.consume_reached(agent.position, radius);
        let Some(waypoint) = self.active() else {
            agent.velocity = Vec2::ZERO;
            return true;
        };

        let offset = waypoint - agent.position;
        let distance = offset.length();
        let direction = offset / distance;
        agent.velocity = direction * speed;
        agent.position += direction * (speed * dt).min(distance);
        agent.face_towards(waypoint);

        self.consume_reached(agent.position, radius);
        if self.is_exhausted() {
            agent.velocity = Vec2::ZERO;
            return true;
        }
        false
    }

    fn consume_reached(&mut self, position: Vec2, radius: f32) {
        while self.active().is_some_and(|waypoint| position.distance(waypoint) < radius) {
            self.waypoints.pop_front();
        }
    }
}

/// Follows a path to a target point, then runs the arrival callback once and
/// returns to Idle.
pub struct MoveState {
    target: Vec2,
    on_arrive: Option<ArrivalCallback>,
    follower: PathFollower,
    arrived: bool,
}

impl MoveState {
    pub fn new(target: Vec2, on_arrive: Option<ArrivalCallback>) -> Self {
        Self {
            target,
            on_arrive,
            follower: PathFollower::default(),
            arrived: false,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    pub fn follower(&self) -> &PathFollower {
        &self.follower
    }
}

impl fmt::Debug for MoveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveState")
            .field("target", &self.target)
            .field("on_arrive", &self.on_arrive.is_some())
            .field("follower", &self.follower)
            .field("arrived", &self.arrived)
            .finish()
    }
}

impl State for MoveState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        match world.plan_path(agent, self.target) {
            Some(waypoints) => {
                self.follower = PathFollower::new(waypoints);
                None
            }
            None => {
                tracing::debug!(%agent, target = ?self.target, "no path; staying put");
                Some(StateCommand::Idle)
            }
        }
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        if self.arrived {
            return Some(StateCommand::Idle);
        }

        let movement = &world.config().movement;
        let (speed, radius) = (movement.speed, movement.arrival_radius);
        let dt = world.clock().delta_secs();
        let body = world.agent_mut(agent)?;
        if !self.follower.advance(body, speed, dt, radius) {
            return None;
        }

        self.arrived = true;
        tracing::trace!(%agent, target = ?self.target, "arrived");
        if let Some(on_arrive) = self.on_arrive.take() {
            on_arrive(world, agent);
        }
        Some(StateCommand::Idle)
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        if let Some(agent) = world.agent_mut(agent) {
            agent.velocity = Vec2::ZERO;
        }
    }
}
