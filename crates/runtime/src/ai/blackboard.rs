//! Typed scratch memory for behavior trees.
//!
//! Every slot is an `Option`: a leaf that reads an empty slot treats it as a
//! failed condition.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use tactics_core::{AgentId, SimTime};

/// Macro order queued on a team board and executed by one agent.
#[derive(Clone, Debug, PartialEq)]
pub enum TeamAction {
    /// Advance into a named zone.
    Push(String),
    /// Hold an angle on a point.
    Hold(Vec2),
    /// Jiggle between a cover point and a peek point.
    Peek { cover: Vec2, peek: Vec2 },
    /// Fall back into a named zone.
    Regroup(String),
}

/// Which leaf started a trip; a trip is only resumed by the leaf that began it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelPurpose {
    Wander,
    TeamOrder,
    Objective,
}

/// A Move in flight, completed when its arrival callback raises `arrived`.
#[derive(Clone, Debug)]
pub struct Travel {
    pub purpose: TravelPurpose,
    pub label: String,
    pub target: Vec2,
    pub arrived: Rc<Cell<bool>>,
}

impl Travel {
    pub fn new(purpose: TravelPurpose, label: impl Into<String>, target: Vec2) -> Self {
        Self {
            purpose,
            label: label.into(),
            target,
            arrived: Rc::new(Cell::new(false)),
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived.get()
    }
}

/// Per-agent board, owned by the agent's tree.
#[derive(Clone, Debug, Default)]
pub struct AgentBlackboard {
    /// Trip currently being walked.
    pub travel: Option<Travel>,
    /// Attacker selected by the fight-back condition.
    pub threat: Option<AgentId>,
    /// End of the current team-ordered hold.
    pub hold_until: Option<SimTime>,
}

impl AgentBlackboard {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-team board shared by the team's trees.
#[derive(Clone, Debug, Default)]
pub struct TeamBlackboard {
    pub queue: VecDeque<TeamAction>,
    /// Site the attack is aimed at this round.
    pub target_site: Option<String>,
    pub planned_at: Option<SimTime>,
}

impl TeamBlackboard {
    pub fn next_action(&mut self) -> Option<TeamAction> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
