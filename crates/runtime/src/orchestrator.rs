//! Match orchestrator.
//!
//! [`MatchRunner`] owns the world (inside the shared [`AgentCtx`]) and both
//! team coordinators. One [`MatchRunner::tick`] advances the clock, lets each
//! team decide and step in the fixed order Alpha then Bravo, resolves round
//! end conditions and drains the event log.

use std::collections::BTreeMap;

use serde::Serialize;
use tactics_core::{
    AgentId, RoundEndReason, RoundOutcome, RoundPhase, SimEvent, TeamId, World,
};

use crate::ai::AgentCtx;
use crate::config::MatchConfig;
use crate::error::{Result, RuntimeError};
use crate::team::{Control, PlayerCommand, TeamCoordinator};

/// Result of one finished round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub number: u32,
    pub attacking: TeamId,
    pub winner: TeamId,
    pub reason: RoundEndReason,
    pub duration_ms: u64,
    pub kills: u32,
    pub planted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub team: TeamId,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub credits: u32,
    pub weapon: String,
}

/// Everything a caller needs once the match is over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub rounds: Vec<RoundRecord>,
    pub wins: BTreeMap<TeamId, u32>,
    /// `None` on a draw.
    pub winner: Option<TeamId>,
    pub agents: Vec<AgentSummary>,
}

/// Builder for [`MatchRunner`].
#[derive(Debug, Clone)]
pub struct MatchBuilder {
    config: MatchConfig,
    controls: [Control; 2],
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            controls: [Control::Autonomous; 2],
        }
    }
}

impl MatchBuilder {
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn control(mut self, team: TeamId, control: Control) -> Self {
        self.controls[team.index()] = control;
        self
    }

    pub fn build(self, world: World) -> Result<MatchRunner> {
        MatchRunner::new(world, self.config, self.controls)
    }
}

#[derive(Debug, Default)]
struct RoundTally {
    ticks: u64,
    kills: u32,
    planted: bool,
}

pub struct MatchRunner {
    ctx: AgentCtx,
    config: MatchConfig,
    teams: [TeamCoordinator; 2],
    round: u32,
    tally: RoundTally,
    rounds: Vec<RoundRecord>,
    finished: bool,
}

impl MatchRunner {
    pub fn builder() -> MatchBuilder {
        MatchBuilder::default()
    }

    /// Builds coordinators for both teams and starts round one.
    pub fn new(world: World, config: MatchConfig, controls: [Control; 2]) -> Result<Self> {
        let teams = TeamId::ALL.map(|team| TeamCoordinator::new(team, world.members(team), controls[team.index()]));
        Self::from_coordinators(world, config, teams)
    }

    /// Starts round one with caller-built coordinators, indexed by team.
    pub fn from_coordinators(world: World, config: MatchConfig, teams: [TeamCoordinator; 2]) -> Result<Self> {
        for team in TeamId::ALL {
            if world.members(team).is_empty() {
                return Err(RuntimeError::EmptyTeam(team));
            }
        }
        let mut ctx = AgentCtx::new(world, config.ai.clone());
        for coordinator in &teams {
            coordinator.attach(&mut ctx.world)?;
        }
        let mut runner = Self {
            ctx,
            config,
            teams,
            round: 0,
            tally: RoundTally::default(),
            rounds: Vec::new(),
            finished: false,
        };
        runner.start_round();
        Ok(runner)
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn coordinator(&self, team: TeamId) -> &TeamCoordinator {
        &self.teams[team.index()]
    }

    pub fn coordinator_mut(&mut self, team: TeamId) -> &mut TeamCoordinator {
        &mut self.teams[team.index()]
    }

    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Queues a player order for the agent's team.
    pub fn command(&mut self, agent: AgentId, command: PlayerCommand) -> Result<()> {
        if self.finished {
            return Err(RuntimeError::MatchOver);
        }
        let team = self.ctx.world.agent(agent).ok_or(RuntimeError::UnknownAgent(agent))?.team;
        self.teams[team.index()].issue(agent, command)
    }

    /// Advances the match by one tick. Does nothing once the match is over.
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        self.ctx.world.advance(self.config.tick_ms);
        for coordinator in &mut self.teams {
            coordinator.tick(&mut self.ctx);
        }
        self.tally.ticks += 1;
        self.check_round_end();
        self.drain_events();
        if self.ctx.world.round().is_over() {
            self.finish_round();
        }
    }

    /// Ticks until the current round ends; returns its record.
    pub fn run_round(&mut self) -> Option<RoundRecord> {
        let played = self.rounds.len();
        while !self.finished && self.rounds.len() == played {
            self.tick();
        }
        self.rounds.get(played).cloned()
    }

    /// Plays every remaining round.
    pub fn run(&mut self) -> MatchSummary {
        while !self.finished {
            self.run_round();
        }
        self.summary()
    }

    pub fn summary(&self) -> MatchSummary {
        let mut wins: BTreeMap<TeamId, u32> = TeamId::ALL.into_iter().map(|team| (team, 0)).collect();
        for record in &self.rounds {
            *wins.entry(record.winner).or_default() += 1;
        }
        let [alpha, bravo] = TeamId::ALL.map(|team| wins.get(&team).copied().unwrap_or_default());
        let winner = match alpha.cmp(&bravo) {
            std::cmp::Ordering::Greater => Some(TeamId::Alpha),
            std::cmp::Ordering::Less => Some(TeamId::Bravo),
            std::cmp::Ordering::Equal => None,
        };
        let agents = self
            .ctx
            .world
            .agents()
            .iter()
            .map(|agent| AgentSummary {
                name: agent.name.clone(),
                team: agent.team,
                kills: agent.score.kills,
                deaths: agent.score.deaths,
                assists: agent.score.assists,
                credits: agent.credits,
                weapon: agent.weapon.clone(),
            })
            .collect();
        MatchSummary {
            rounds: self.rounds.clone(),
            wins,
            winner,
            agents,
        }
    }

    fn check_round_end(&mut self) {
        if self.ctx.world.round().is_over() || self.ctx.world.poll_objective().is_some() {
            return;
        }
        let (phase, attacking, started_at) = {
            let round = self.ctx.world.round();
            (round.phase, round.attacking, round.started_at)
        };
        let defending = attacking.opponent();

        // A planted objective can still be defused after the attackers die.
        let attackers_out = phase != RoundPhase::Planted && self.ctx.world.living(attacking) == 0;
        let defenders_out = self.ctx.world.living(defending) == 0;
        let eliminated = if attackers_out {
            Some(attacking)
        } else if defenders_out {
            Some(defending)
        } else {
            None
        };
        if let Some(team) = eliminated {
            self.ctx.world.emit(SimEvent::Eliminated { team });
            self.ctx.world.end_round(RoundOutcome {
                winner: team.opponent(),
                reason: RoundEndReason::Elimination,
            });
            return;
        }

        let now = self.ctx.world.now();
        let limits = &self.ctx.world.config().round;
        let expired = phase == RoundPhase::Live && now.has_elapsed(started_at, limits.time_limit_ms);
        let budget = limits.time_limit_ms + limits.detonation_ms + limits.defuse_ms;
        let stalled = self.tally.ticks.saturating_mul(self.config.tick_ms.max(1)) > budget;
        if stalled {
            tracing::warn!(round = self.round, ticks = self.tally.ticks, "round exceeded its tick budget");
        }
        if expired || stalled {
            self.ctx.world.end_round(RoundOutcome {
                winner: defending,
                reason: RoundEndReason::TimeExpired,
            });
        }
    }

    fn drain_events(&mut self) {
        for logged in self.ctx.world.drain_log() {
            tracing::trace!(at = %logged.at, event = ?logged.event, "sim event");
            match logged.event {
                SimEvent::Killed { .. } => self.tally.kills += 1,
                SimEvent::ObjectivePlanted { .. } => self.tally.planted = true,
                _ => {}
            }
        }
    }

    fn finish_round(&mut self) {
        let round = self.ctx.world.round();
        let Some(outcome) = round.outcome else {
            return;
        };
        let record = RoundRecord {
            number: round.number,
            attacking: round.attacking,
            winner: outcome.winner,
            reason: outcome.reason,
            duration_ms: self.ctx.world.now().elapsed_since(round.started_at),
            kills: self.tally.kills,
            planted: self.tally.planted,
        };
        tracing::info!(
            round = record.number,
            winner = %record.winner,
            reason = %record.reason,
            duration_ms = record.duration_ms,
            "round finished"
        );

        let rewards = self.ctx.world.config().rewards.clone();
        for team in TeamId::ALL {
            let bonus = if team == outcome.winner {
                rewards.round_win
            } else {
                rewards.round_loss
            };
            for id in self.ctx.world.members(team) {
                if let Some(agent) = self.ctx.world.agent_mut(id) {
                    agent.earn(bonus, rewards.max_credits);
                }
            }
        }

        self.rounds.push(record);
        if self.rounds.len() as u32 >= self.config.rounds {
            self.finished = true;
            let summary = self.summary();
            tracing::info!(winner = ?summary.winner, wins = ?summary.wins, "match finished");
        } else {
            self.start_round();
        }
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.tally = RoundTally::default();
        let attacking = if self.config.alternate_sides && self.round % 2 == 0 {
            self.config.first_attacking.opponent()
        } else {
            self.config.first_attacking
        };

        let attackers = self.ctx.world.members(attacking);
        let carrier = match attackers.len() {
            0 => None,
            len => {
                let index = self.ctx.world.dice().index(len);
                attackers.get(index).copied()
            }
        };
        self.ctx.world.restart_round(self.round, attacking, carrier);
        if self.ctx.world.config().combat.auto_buy {
            self.buy_phase();
        }
        for coordinator in &mut self.teams {
            coordinator.reset();
        }
    }

    /// Upgrades every agent to the best weapon their credits cover.
    fn buy_phase(&mut self) {
        let world = &mut self.ctx.world;
        let purchases: Vec<(AgentId, String, u32)> = world
            .agents()
            .iter()
            .filter_map(|agent| {
                let current = world.weapons().resolve(&agent.weapon).cost;
                let best = world.weapons().best_affordable(agent.credits)?;
                (best.cost > current).then(|| (agent.id, best.name.clone(), best.cost))
            })
            .collect();
        for (id, weapon, cost) in purchases {
            if let Some(agent) = world.agent_mut(id) {
                tracing::debug!(agent = %id, %weapon, cost, "bought weapon");
                agent.credits -= cost;
                agent.weapon = weapon;
            }
        }
    }
}
