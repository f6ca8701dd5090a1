//! Team coordination.
//!
//! A [`TeamCoordinator`] owns one team's trees and boards. Autonomous teams
//! refill a macro plan from intel and the objective, then tick every member's
//! tree; player teams apply queued [`PlayerCommand`]s instead. Either way the
//! members' state machines are stepped afterwards, so a team's decisions are
//! always taken before its agents act.

use std::collections::VecDeque;

use glam::Vec2;
use tactics_core::{
    AgentEvent, AgentId, AgentObserver, CoreResult, RoundPhase, StateCommand, StateKind, TeamId, World,
};

use crate::ai::{AgentBlackboard, AgentCtx, AgentTree, TeamAction, TeamBlackboard, presets};
use crate::error::{Result, RuntimeError};

/// Who decides for a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Control {
    Player,
    Autonomous,
}

/// Direct orders for player-controlled agents.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerCommand {
    MoveTo(Vec2),
    Hold(Vec2),
    /// Engage a specific enemy, or the nearest visible one.
    Engage(Option<AgentId>),
    Plant(String),
    Defuse(String),
    Peek { cover: Vec2, peek: Vec2 },
    Stop,
}

impl PlayerCommand {
    pub fn into_command(self) -> StateCommand {
        match self {
            PlayerCommand::MoveTo(target) => StateCommand::move_to(target),
            PlayerCommand::Hold(point) => StateCommand::Hold { point },
            PlayerCommand::Engage(target) => StateCommand::Shoot { target },
            PlayerCommand::Plant(site) => StateCommand::Plant { site },
            PlayerCommand::Defuse(site) => StateCommand::Defuse { site },
            PlayerCommand::Peek { cover, peek } => StateCommand::JigglePeek { cover, peek },
            PlayerCommand::Stop => StateCommand::Idle,
        }
    }
}

/// Switches an idle, moving or holding agent onto an enemy it just spotted.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngageOnSight;

impl AgentObserver for EngageOnSight {
    fn on_event(&mut self, agent: AgentId, event: &AgentEvent, world: &mut World) {
        let AgentEvent::DetectedEnemy { enemy } = *event else {
            return;
        };
        if matches!(
            world.state_of(agent),
            Some(StateKind::Idle | StateKind::Move | StateKind::Hold)
        ) {
            tracing::debug!(%agent, %enemy, "engaging on sight");
            world.transition(agent, StateCommand::Shoot { target: Some(enemy) });
        }
    }
}

struct Brain {
    agent: AgentId,
    tree: AgentTree,
    board: AgentBlackboard,
}

pub struct TeamCoordinator {
    team: TeamId,
    control: Control,
    members: Vec<AgentId>,
    brains: Vec<Brain>,
    board: TeamBlackboard,
    orders: VecDeque<(AgentId, PlayerCommand)>,
}

impl TeamCoordinator {
    /// Autonomous team running [`presets::autonomous`].
    pub fn autonomous(team: TeamId, members: Vec<AgentId>) -> Self {
        Self::with_trees(team, members, presets::autonomous)
    }

    /// Autonomous team whose trees come from `build`, called once per member.
    pub fn with_trees(team: TeamId, members: Vec<AgentId>, build: impl Fn() -> AgentTree) -> Self {
        let brains = members
            .iter()
            .map(|&agent| Brain {
                agent,
                tree: build(),
                board: AgentBlackboard::default(),
            })
            .collect();
        Self {
            team,
            control: Control::Autonomous,
            members,
            brains,
            board: TeamBlackboard::default(),
            orders: VecDeque::new(),
        }
    }

    /// Player-directed team; builds no trees.
    pub fn player(team: TeamId, members: Vec<AgentId>) -> Self {
        Self {
            team,
            control: Control::Player,
            members,
            brains: Vec::new(),
            board: TeamBlackboard::default(),
            orders: VecDeque::new(),
        }
    }

    pub fn new(team: TeamId, members: Vec<AgentId>, control: Control) -> Self {
        match control {
            Control::Player => Self::player(team, members),
            Control::Autonomous => Self::autonomous(team, members),
        }
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    pub fn board(&self) -> &TeamBlackboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut TeamBlackboard {
        &mut self.board
    }

    /// Subscribes the engage-on-sight observer for autonomous members.
    pub fn attach(&self, world: &mut World) -> CoreResult<()> {
        if self.control == Control::Autonomous {
            for &agent in &self.members {
                world.subscribe(agent, EngageOnSight)?;
            }
        }
        Ok(())
    }

    /// Queues an order for the next tick of this team.
    pub fn issue(&mut self, agent: AgentId, command: PlayerCommand) -> Result<()> {
        if !self.members.contains(&agent) {
            return Err(RuntimeError::UnknownAgent(agent));
        }
        if self.control != Control::Player {
            return Err(RuntimeError::NotPlayerControlled { agent, team: self.team });
        }
        self.orders.push_back((agent, command));
        Ok(())
    }

    /// Forgets every board and pending order; called between rounds.
    pub fn reset(&mut self) {
        self.board.clear();
        self.orders.clear();
        for brain in &mut self.brains {
            brain.board.clear();
        }
    }

    /// Runs the team's decisions, then steps each member's state machine.
    pub fn tick(&mut self, ctx: &mut AgentCtx) {
        match self.control {
            Control::Player => {
                while let Some((agent, command)) = self.orders.pop_front() {
                    tracing::debug!(%agent, ?command, "player command");
                    ctx.world.transition(agent, command.into_command());
                }
            }
            Control::Autonomous => {
                self.refill_plan(ctx);
                let brains = &mut self.brains;
                ctx.with_team_board(&mut self.board, |ctx| {
                    for Brain { agent, tree, board } in brains.iter_mut() {
                        ctx.with_agent(*agent, board, |ctx| think(*agent, tree, ctx));
                    }
                });
            }
        }
        for &agent in &self.members {
            ctx.world.step_agent(agent);
        }
    }

    fn refill_plan(&mut self, ctx: &mut AgentCtx) {
        let now = ctx.world.now();
        let due = self
            .board
            .planned_at
            .is_none_or(|at| now.has_elapsed(at, ctx.ai.plan_interval_ms));
        if !self.board.queue.is_empty() || !due {
            return;
        }
        if self.board.target_site.is_none() && ctx.world.round().attacking == self.team {
            self.board.target_site = choose_site(&mut ctx.world);
        }
        let plan = plan_actions(&ctx.world, self.team, self.board.target_site.as_deref(), ctx.ai.peek_offset);
        tracing::debug!(team = %self.team, actions = plan.len(), "team plan refilled");
        self.board.queue.extend(plan);
        self.board.planned_at = Some(now);
    }
}

fn think(agent: AgentId, tree: &mut AgentTree, ctx: &mut AgentCtx) {
    if tracing::enabled!(tracing::Level::TRACE) {
        let mut trace = behavior_tree::Trace::new();
        let status = tree.tick_traced(ctx, &mut trace);
        tracing::trace!(%agent, ?status, nodes = trace.len(), "tree ticked");
    } else {
        tree.tick(ctx);
    }
}

fn choose_site(world: &mut World) -> Option<String> {
    let count = world.round().sites().len();
    if count == 0 {
        return None;
    }
    let index = world.dice().index(count);
    world.round().sites().get(index).map(|site| site.name.clone())
}

/// Name of the zone whose center is closest to `point`.
fn zone_near(world: &World, point: Vec2) -> Option<String> {
    let grid = world.grid();
    world
        .zones()
        .iter()
        .min_by(|a, b| {
            a.center(grid)
                .distance_squared(point)
                .total_cmp(&b.center(grid).distance_squared(point))
        })
        .map(|zone| zone.name.clone())
}

/// Cover at the zone center nearest `sighting`, peeking towards it.
fn peek_towards(world: &World, sighting: Vec2, offset: f32) -> Option<TeamAction> {
    let grid = world.grid();
    let cover = world
        .zones()
        .iter()
        .map(|zone| zone.center(grid))
        .filter(|center| center.distance(sighting) > offset)
        .min_by(|a, b| a.distance_squared(sighting).total_cmp(&b.distance_squared(sighting)))?;
    let peek = cover + (sighting - cover).normalize_or_zero() * offset;
    let walkable = |point: Vec2| grid.cell_at(point).is_some_and(|cell| grid.is_walkable(cell));
    (walkable(cover) && walkable(peek)).then_some(TeamAction::Peek { cover, peek })
}

/// Macro orders for `team` given the round state and its intel.
pub fn plan_actions(world: &World, team: TeamId, target_site: Option<&str>, peek_offset: f32) -> Vec<TeamAction> {
    let round = world.round();
    let sighting = world.intel(team).living().first().map(|(_, record)| record.position);
    let planted = round.planted().and_then(|(site, _)| round.site(site)).map(|site| site.position);
    let mut plan = Vec::new();

    if round.attacking == team {
        match (round.phase, planted) {
            (RoundPhase::Planted, Some(site)) => {
                plan.push(TeamAction::Hold(site));
                plan.extend(zone_near(world, site).map(TeamAction::Regroup));
            }
            _ => {
                let target = target_site.and_then(|name| round.site(name)).map(|site| site.position);
                if let Some(sighting) = sighting {
                    plan.extend(peek_towards(world, sighting, peek_offset));
                }
                plan.extend(target.and_then(|point| zone_near(world, point)).map(TeamAction::Push));
            }
        }
    } else {
        match (round.phase, planted) {
            (RoundPhase::Planted, Some(site)) => {
                plan.extend(zone_near(world, site).map(TeamAction::Regroup));
            }
            _ => match sighting {
                Some(sighting) => {
                    plan.push(TeamAction::Hold(sighting));
                    plan.extend(zone_near(world, sighting).map(TeamAction::Push));
                }
                None => {
                    for site in round.sites() {
                        plan.extend(zone_near(world, site.position).map(TeamAction::Regroup));
                        plan.push(TeamAction::Hold(site.position));
                    }
                }
            },
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_commands_map_onto_states() {
        let point = Vec2::new(3.0, 4.0);
        assert_eq!(PlayerCommand::MoveTo(point).into_command().kind(), StateKind::Move);
        assert_eq!(PlayerCommand::Hold(point).into_command().kind(), StateKind::Hold);
        assert_eq!(PlayerCommand::Engage(None).into_command().kind(), StateKind::Shoot);
        assert_eq!(PlayerCommand::Plant("A".into()).into_command().kind(), StateKind::Plant);
        assert_eq!(PlayerCommand::Stop.into_command().kind(), StateKind::Idle);
    }

    #[test]
    fn autonomous_teams_refuse_player_orders() {
        let mut team = TeamCoordinator::autonomous(TeamId::Alpha, vec![AgentId(0)]);
        assert!(matches!(
            team.issue(AgentId(0), PlayerCommand::Stop),
            Err(RuntimeError::NotPlayerControlled { .. })
        ));
        let mut players = TeamCoordinator::player(TeamId::Bravo, vec![AgentId(1)]);
        assert!(matches!(
            players.issue(AgentId(0), PlayerCommand::Stop),
            Err(RuntimeError::UnknownAgent(_))
        ));
        assert!(players.issue(AgentId(1), PlayerCommand::Stop).is_ok());
    }
}
