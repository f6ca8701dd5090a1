//! Agents: identity, team membership, combat stats and per-life bookkeeping.

mod ledger;
mod mental;
mod observer;
mod stats;

use core::fmt;

use glam::Vec2;

pub use ledger::DamageLedger;
pub use mental::{MentalState, MentalTracker, StreakCheck};
pub use observer::{AgentEvent, AgentObserver, EventBus};
pub use stats::{AttributeRanks, CombatStats, Rank, RankTable};

use crate::fsm::StateKind;
use crate::time::SimTime;

/// Full health of every agent.
pub const MAX_HEALTH: u32 = 100;

/// Arena index of an agent inside a [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Faction an agent belongs to for the whole match.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamId {
    Alpha,
    Bravo,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::Alpha, TeamId::Bravo];

    pub const fn index(self) -> usize {
        match self {
            TeamId::Alpha => 0,
            TeamId::Bravo => 1,
        }
    }

    pub const fn opponent(self) -> TeamId {
        match self {
            TeamId::Alpha => TeamId::Bravo,
            TeamId::Bravo => TeamId::Alpha,
        }
    }
}

/// Role of a team within one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Attack,
    Defense,
}

/// Kill/death/assist counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreline {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

/// Most recent damage taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageStamp {
    pub attacker: AgentId,
    pub at: SimTime,
}

/// Scheduled return fire after being shot at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingReaction {
    pub shooter: AgentId,
    pub due: SimTime,
}

/// Timer progress of a long-running action, for display.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub action: StateKind,
    /// Completed fraction in `[0, 1]`.
    pub fraction: f32,
}

/// Roster entry used to create an agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub name: String,
    pub team: TeamId,
    pub position: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranks: AttributeRanks,
    #[cfg_attr(feature = "serde", serde(default))]
    pub credits: u32,
    /// Starting weapon; the catalogue default when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub team: TeamId,
    pub health: u32,
    pub weapon: String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in radians.
    pub facing: f32,
    pub state: StateKind,
    pub stats: CombatStats,
    pub score: Scoreline,
    pub credits: u32,
    pub mental: MentalTracker,
    pub hold_location: Option<Vec2>,
    pub ledger: DamageLedger,
    /// Killer of the current life. Set at most once between respawns.
    pub killer: Option<AgentId>,
    pub visible: bool,
    pub healing: bool,
    pub being_shot_at: bool,
    pub pending_reaction: Option<PendingReaction>,
    pub last_damage: Option<DamageStamp>,
    pub last_healed_at: SimTime,
    /// Enemies seen during the latest vision scan.
    pub spotted: Vec<AgentId>,
    pub progress: Option<Progress>,
    /// End point of the latest cosmetic shot trace.
    pub trace: Option<Vec2>,
    /// Position the agent was created at; used when no spawn region is free.
    pub home: Vec2,
}

impl Agent {
    pub fn new(id: AgentId, spec: &AgentSpec, stats: CombatStats, weapon: String) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            team: spec.team,
            health: MAX_HEALTH,
            weapon,
            position: spec.position,
            velocity: Vec2::ZERO,
            facing: 0.0,
            state: StateKind::Idle,
            stats,
            score: Scoreline::default(),
            credits: spec.credits,
            mental: MentalTracker::new(),
            hold_location: None,
            ledger: DamageLedger::new(),
            killer: None,
            visible: true,
            healing: true,
            being_shot_at: false,
            pending_reaction: None,
            last_damage: None,
            last_healed_at: SimTime::ZERO,
            spotted: Vec::new(),
            progress: None,
            trace: None,
            home: spec.position,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Alive and not in the middle of dying or respawning.
    pub fn is_active(&self) -> bool {
        self.is_alive() && self.visible && !matches!(self.state, StateKind::Die | StateKind::Respawn)
    }

    pub fn is_hostile_to(&self, other: &Agent) -> bool {
        self.team != other.team
    }

    pub fn face_towards(&mut self, point: Vec2) {
        let offset = point - self.position;
        if offset.length_squared() > f32::EPSILON {
            self.facing = crate::vision::angle_of(offset);
        }
    }

    /// Adds credits up to `cap`.
    pub fn earn(&mut self, amount: u32, cap: u32) {
        self.credits = self.credits.saturating_add(amount).min(cap);
    }

    /// Clears per-life bookkeeping and restores full health.
    pub fn reset_life(&mut self, position: Vec2) {
        self.health = MAX_HEALTH;
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.ledger.clear();
        self.killer = None;
        self.visible = true;
        self.healing = true;
        self.being_shot_at = false;
        self.pending_reaction = None;
        self.last_damage = None;
        self.hold_location = None;
        self.spotted.clear();
        self.progress = None;
        self.trace = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> AgentSpec {
        AgentSpec {
            name: "vex".into(),
            team: TeamId::Alpha,
            position: Vec2::new(8.0, 8.0),
            ranks: AttributeRanks::default(),
            credits: 8900,
            weapon: None,
        }
    }

    #[test]
    fn earning_respects_cap() {
        let mut agent = Agent::new(AgentId(0), &spec(), CombatStats::default(), "classic".into());
        agent.earn(500, 9000);
        assert_eq!(agent.credits, 9000);
    }

    #[test]
    fn reset_life_clears_latch_and_ledger() {
        let mut agent = Agent::new(AgentId(0), &spec(), CombatStats::default(), "classic".into());
        agent.health = 0;
        agent.killer = Some(AgentId(4));
        agent.ledger.record(AgentId(4), 100);
        agent.visible = false;

        agent.reset_life(Vec2::new(40.0, 40.0));
        assert_eq!(agent.health, MAX_HEALTH);
        assert_eq!(agent.killer, None);
        assert!(agent.ledger.is_empty());
        assert!(agent.visible);
        assert_eq!(agent.position, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn ids_display_with_hash() {
        assert_eq!(AgentId(7).to_string(), "#7");
        assert_eq!(TeamId::Alpha.opponent(), TeamId::Bravo);
    }
}
