//! Round phase, the objective and its sites.

use glam::Vec2;

use crate::agent::{AgentId, Side, TeamId};
use crate::time::SimTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    Live,
    Planted,
    Over,
}

/// Where the objective is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    Carried(AgentId),
    Dropped(Vec2),
    Planted { site: String, at: SimTime },
    Defused,
    Detonated,
}

/// A named plant site.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    pub name: String,
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundEndReason {
    Elimination,
    Defused,
    Detonated,
    TimeExpired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub winner: TeamId,
    pub reason: RoundEndReason,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub number: u32,
    pub attacking: TeamId,
    pub phase: RoundPhase,
    pub objective: Objective,
    pub started_at: SimTime,
    pub outcome: Option<RoundOutcome>,
    sites: Vec<Site>,
}

impl RoundState {
    pub fn new(attacking: TeamId, sites: Vec<Site>, carrier: Option<AgentId>, origin: Vec2) -> Self {
        Self {
            number: 1,
            attacking,
            phase: RoundPhase::Live,
            objective: carrier.map_or(Objective::Dropped(origin), Objective::Carried),
            started_at: SimTime::ZERO,
            outcome: None,
            sites,
        }
    }

    /// Starts the next round with a fresh objective.
    pub fn restart(&mut self, number: u32, attacking: TeamId, objective: Objective, now: SimTime) {
        self.number = number;
        self.attacking = attacking;
        self.phase = RoundPhase::Live;
        self.objective = objective;
        self.started_at = now;
        self.outcome = None;
    }

    pub fn side_of(&self, team: TeamId) -> Side {
        if team == self.attacking {
            Side::Attack
        } else {
            Side::Defense
        }
    }

    pub fn defending(&self) -> TeamId {
        self.attacking.opponent()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.name == name)
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    pub fn is_objective_down(&self) -> bool {
        matches!(self.objective, Objective::Planted { .. })
    }

    pub fn carrier(&self) -> Option<AgentId> {
        match self.objective {
            Objective::Carried(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn dropped_at(&self) -> Option<Vec2> {
        match self.objective {
            Objective::Dropped(point) => Some(point),
            _ => None,
        }
    }

    /// Site name and plant time while the objective is down.
    pub fn planted(&self) -> Option<(&str, SimTime)> {
        match &self.objective {
            Objective::Planted { site, at } => Some((site.as_str(), *at)),
            _ => None,
        }
    }

    pub fn pick_up(&mut self, agent: AgentId) -> bool {
        if self.phase != RoundPhase::Live || self.dropped_at().is_none() {
            return false;
        }
        self.objective = Objective::Carried(agent);
        true
    }

    pub fn drop_objective(&mut self, agent: AgentId, at: Vec2) -> bool {
        if self.carrier() != Some(agent) {
            return false;
        }
        self.objective = Objective::Dropped(at);
        true
    }

    pub fn plant(&mut self, agent: AgentId, site: &str, now: SimTime) -> bool {
        if self.phase != RoundPhase::Live || self.carrier() != Some(agent) || self.site(site).is_none() {
            return false;
        }
        self.objective = Objective::Planted {
            site: site.to_string(),
            at: now,
        };
        self.phase = RoundPhase::Planted;
        true
    }

    pub fn defuse(&mut self) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::Planted {
            return None;
        }
        self.objective = Objective::Defused;
        let defending = self.defending();
        Some(self.finish(defending, RoundEndReason::Defused))
    }

    /// Detonates a planted objective once its timer has run out.
    pub fn poll_detonation(&mut self, now: SimTime, detonation_ms: u64) -> Option<RoundOutcome> {
        let (_, at) = self.planted()?;
        if self.phase != RoundPhase::Planted || !now.has_elapsed(at, detonation_ms) {
            return None;
        }
        self.objective = Objective::Detonated;
        let attacking = self.attacking;
        Some(self.finish(attacking, RoundEndReason::Detonated))
    }

    pub fn finish(&mut self, winner: TeamId, reason: RoundEndReason) -> RoundOutcome {
        let outcome = RoundOutcome { winner, reason };
        self.phase = RoundPhase::Over;
        self.outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> RoundState {
        let sites = vec![Site {
            name: "A".into(),
            position: Vec2::new(50.0, 50.0),
        }];
        RoundState::new(TeamId::Alpha, sites, Some(AgentId(0)), Vec2::ZERO)
    }

    #[test]
    fn only_the_carrier_can_plant() {
        let mut round = round();
        assert!(!round.plant(AgentId(1), "A", SimTime(10)));
        assert!(!round.plant(AgentId(0), "B", SimTime(10)));
        assert!(round.plant(AgentId(0), "A", SimTime(10)));
        assert_eq!(round.phase, RoundPhase::Planted);
        assert!(round.is_objective_down());
    }

    #[test]
    fn planted_objective_detonates_for_attackers() {
        let mut round = round();
        round.plant(AgentId(0), "A", SimTime(1000));
        assert_eq!(round.poll_detonation(SimTime(1000 + 44_999), 45_000), None);
        let outcome = round.poll_detonation(SimTime(1000 + 45_000), 45_000).unwrap();
        assert_eq!(outcome.winner, TeamId::Alpha);
        assert_eq!(outcome.reason, RoundEndReason::Detonated);
        assert!(round.is_over());
    }

    #[test]
    fn defuse_wins_for_defenders() {
        let mut round = round();
        assert_eq!(round.defuse(), None);
        round.plant(AgentId(0), "A", SimTime(0));
        let outcome = round.defuse().unwrap();
        assert_eq!(outcome.winner, TeamId::Bravo);
        assert_eq!(round.side_of(TeamId::Bravo), Side::Defense);
    }

    #[test]
    fn dropped_objective_can_be_picked_up() {
        let mut round = round();
        assert!(round.drop_objective(AgentId(0), Vec2::new(3.0, 4.0)));
        assert_eq!(round.dropped_at(), Some(Vec2::new(3.0, 4.0)));
        assert!(round.pick_up(AgentId(2)));
        assert_eq!(round.carrier(), Some(AgentId(2)));
    }
}
