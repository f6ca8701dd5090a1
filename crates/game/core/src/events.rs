//! World event log consumed by the orchestrator and presentation layers.

use glam::Vec2;

use crate::agent::{AgentId, MentalState, TeamId};
use crate::combat::BodyLocation;
use crate::round::RoundOutcome;
use crate::time::SimTime;

/// Which streak check ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreakKind {
    Hot,
    Cold,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    ShotFired {
        shooter: AgentId,
        target: AgentId,
        hit: Option<BodyLocation>,
        trace_end: Vec2,
    },
    Damaged {
        attacker: AgentId,
        victim: AgentId,
        amount: u32,
        remaining: u32,
    },
    Killed {
        killer: AgentId,
        victim: AgentId,
        assists: Vec<AgentId>,
    },
    StreakCheck {
        agent: AgentId,
        kind: StreakKind,
        rolled: bool,
    },
    MentalChanged {
        agent: AgentId,
        state: MentalState,
    },
    EnemyDetected {
        agent: AgentId,
        enemy: AgentId,
    },
    ObjectivePickedUp {
        agent: AgentId,
    },
    ObjectiveDropped {
        agent: AgentId,
        at: Vec2,
    },
    ObjectivePlanted {
        agent: AgentId,
        site: String,
    },
    ObjectiveDefused {
        agent: AgentId,
    },
    ObjectiveDetonated,
    Died {
        agent: AgentId,
    },
    Respawned {
        agent: AgentId,
        weapon: String,
    },
    RoundEnded {
        outcome: RoundOutcome,
    },
    Eliminated {
        team: TeamId,
    },
}

/// An event with the time it was logged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggedEvent {
    pub at: SimTime,
    pub event: SimEvent,
}
