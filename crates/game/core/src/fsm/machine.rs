use std::str::FromStr;

use super::{ActiveState, State, StateCommand, StateKind, StateSet};
use crate::agent::AgentId;
use crate::world::World;

/// Chained transitions requested by `enter` hooks beyond this depth are dropped.
const MAX_CHAIN: usize = 8;

#[derive(Debug)]
pub struct StateMachine {
    registered: StateSet,
    initial: StateKind,
    current: Option<ActiveState>,
    started: bool,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::standard()
    }
}

impl StateMachine {
    pub fn new(registered: StateSet, initial: StateKind) -> Self {
        Self {
            registered,
            initial,
            current: None,
            started: false,
        }
    }

    /// Every state registered, starting in Idle.
    pub fn standard() -> Self {
        Self::new(StateSet::all(), StateKind::Idle)
    }

    pub fn is_registered(&self, kind: StateKind) -> bool {
        self.registered.contains(StateSet::from(kind))
    }

    pub fn current_kind(&self) -> Option<StateKind> {
        self.current.as_ref().map(ActiveState::kind)
    }

    pub fn current(&self) -> Option<&ActiveState> {
        self.current.as_ref()
    }

    /// Enters the initial state on the first call unless a transition already
    /// happened, then executes the current state.
    pub fn step(&mut self, agent: AgentId, world: &mut World) {
        if !self.started {
            self.started = true;
            if self.current.is_none() {
                match StateCommand::bare(self.initial) {
                    Some(command) => self.transition(agent, world, command),
                    None => tracing::debug!(%agent, initial = %self.initial, "initial state needs a payload"),
                }
            }
        }

        let Some(state) = self.current.as_mut() else {
            return;
        };
        if let Some(next) = state.execute(agent, world) {
            self.transition(agent, world, next);
        }
    }

    /// Exits the current state and enters the one described by `command`.
    ///
    /// Commands for unregistered states are ignored.
    pub fn transition(&mut self, agent: AgentId, world: &mut World, command: StateCommand) {
        let mut pending = Some(command);
        let mut depth = 0;
        while let Some(command) = pending.take() {
            if depth == MAX_CHAIN {
                tracing::warn!(%agent, ?command, "transition chain too deep; dropping");
                return;
            }
            depth += 1;

            let kind = command.kind();
            if !self.is_registered(kind) {
                tracing::debug!(%agent, %kind, "transition to unregistered state ignored");
                return;
            }

            let from = self.current_kind();
            if let Some(mut outgoing) = self.current.take() {
                outgoing.exit(agent, world);
            }
            if let Some(state) = world.agent_mut(agent) {
                state.state = kind;
            }
            tracing::debug!(%agent, ?from, to = %kind, "state transition");

            let mut incoming = ActiveState::from(command);
            pending = incoming.enter(agent, world);
            self.current = Some(incoming);
        }
    }

    /// Transition by state name. Unknown names and states that need a payload
    /// are ignored.
    pub fn transition_named(&mut self, agent: AgentId, world: &mut World, name: &str) {
        match StateKind::from_str(name).ok().and_then(StateCommand::bare) {
            Some(command) => self.transition(agent, world, command),
            None => tracing::debug!(%agent, name, "unknown state name ignored"),
        }
    }
}
