//! Context handed to every behavior-tree node.

use std::mem;

use tactics_core::{Agent, AgentId, StateCommand, StateKind, World};

use super::blackboard::{AgentBlackboard, TeamBlackboard};
use crate::config::AiConfig;

/// The match world plus the boards of the agent whose tree is ticking.
///
/// The context owns the [`World`] for the whole match. Boards belong to the
/// trees and coordinators and are swapped in for the duration of one tick,
/// so no two trees ever alias the same board.
#[derive(Debug)]
pub struct AgentCtx {
    pub world: World,
    pub ai: AiConfig,
    /// Agent whose tree is ticking.
    pub agent: AgentId,
    pub blackboard: AgentBlackboard,
    pub team: TeamBlackboard,
}

impl AgentCtx {
    pub fn new(world: World, ai: AiConfig) -> Self {
        Self {
            world,
            ai,
            agent: AgentId(0),
            blackboard: AgentBlackboard::default(),
            team: TeamBlackboard::default(),
        }
    }

    pub fn me(&self) -> Option<&Agent> {
        self.world.agent(self.agent)
    }

    pub fn state(&self) -> Option<StateKind> {
        self.world.state_of(self.agent)
    }

    pub fn transition(&mut self, command: StateCommand) {
        self.world.transition(self.agent, command);
    }

    /// Runs `f` with `board` swapped in as the team board.
    pub(crate) fn with_team_board<R>(&mut self, board: &mut TeamBlackboard, f: impl FnOnce(&mut Self) -> R) -> R {
        mem::swap(&mut self.team, board);
        let result = f(self);
        mem::swap(&mut self.team, board);
        result
    }

    /// Runs `f` as `agent` with `board` swapped in as its blackboard.
    pub(crate) fn with_agent<R>(
        &mut self,
        agent: AgentId,
        board: &mut AgentBlackboard,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.agent = agent;
        mem::swap(&mut self.blackboard, board);
        let result = f(self);
        mem::swap(&mut self.blackboard, board);
        result
    }
}
