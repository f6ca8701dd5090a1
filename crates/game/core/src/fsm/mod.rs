//! Per-agent finite state machine.
//!
//! Each state has `enter`/`execute`/`exit` hooks that receive the owning
//! agent's id and the [`World`]. `enter` and `execute` may request the next
//! state by returning a [`StateCommand`]; the [`StateMachine`] always runs the
//! outgoing state's `exit` before the incoming state's `enter`.

mod command;
mod machine;
pub mod states;

pub use command::{ArrivalCallback, StateCommand};
pub use machine::StateMachine;

use crate::agent::AgentId;
use crate::world::World;

use states::{
    DieState, HoldState, IdleState, JigglePeekState, MoveState, ObjectiveTask, RespawnState, ShootState,
};

/// Name of an FSM state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    #[default]
    Idle,
    Move,
    Shoot,
    Plant,
    Defuse,
    Die,
    Respawn,
    Hold,
    JigglePeek,
}

bitflags::bitflags! {
    /// Set of states registered on a machine.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StateSet: u16 {
        const IDLE        = 1 << 0;
        const MOVE        = 1 << 1;
        const SHOOT       = 1 << 2;
        const PLANT       = 1 << 3;
        const DEFUSE      = 1 << 4;
        const DIE         = 1 << 5;
        const RESPAWN     = 1 << 6;
        const HOLD        = 1 << 7;
        const JIGGLE_PEEK = 1 << 8;
    }
}

impl From<StateKind> for StateSet {
    fn from(kind: StateKind) -> Self {
        match kind {
            StateKind::Idle => StateSet::IDLE,
            StateKind::Move => StateSet::MOVE,
            StateKind::Shoot => StateSet::SHOOT,
            StateKind::Plant => StateSet::PLANT,
            StateKind::Defuse => StateSet::DEFUSE,
            StateKind::Die => StateSet::DIE,
            StateKind::Respawn => StateSet::RESPAWN,
            StateKind::Hold => StateSet::HOLD,
            StateKind::JigglePeek => StateSet::JIGGLE_PEEK,
        }
    }
}

/// Lifecycle hooks of one state.
pub trait State {
    fn enter(&mut self, _agent: AgentId, _world: &mut World) -> Option<StateCommand> {
        None
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand>;

    fn exit(&mut self, _agent: AgentId, _world: &mut World) {}
}

/// The state a machine is currently in, with its state-scoped fields.
#[derive(Debug)]
pub enum ActiveState {
    Idle(IdleState),
    Move(MoveState),
    Shoot(ShootState),
    Plant(ObjectiveTask),
    Defuse(ObjectiveTask),
    Die(DieState),
    Respawn(RespawnState),
    Hold(HoldState),
    JigglePeek(JigglePeekState),
}

impl ActiveState {
    pub fn kind(&self) -> StateKind {
        match self {
            ActiveState::Idle(_) => StateKind::Idle,
            ActiveState::Move(_) => StateKind::Move,
            ActiveState::Shoot(_) => StateKind::Shoot,
            ActiveState::Plant(_) => StateKind::Plant,
            ActiveState::Defuse(_) => StateKind::Defuse,
            ActiveState::Die(_) => StateKind::Die,
            ActiveState::Respawn(_) => StateKind::Respawn,
            ActiveState::Hold(_) => StateKind::Hold,
            ActiveState::JigglePeek(_) => StateKind::JigglePeek,
        }
    }

    fn as_state(&mut self) -> &mut dyn State {
        match self {
            ActiveState::Idle(state) => state,
            ActiveState::Move(state) => state,
            ActiveState::Shoot(state) => state,
            ActiveState::Plant(state) | ActiveState::Defuse(state) => state,
            ActiveState::Die(state) => state,
            ActiveState::Respawn(state) => state,
            ActiveState::Hold(state) => state,
            ActiveState::JigglePeek(state) => state,
        }
    }
}

impl From<StateCommand> for ActiveState {
    fn from(command: StateCommand) -> Self {
        match command {
            StateCommand::Idle => ActiveState::Idle(IdleState),
            StateCommand::Move { target, on_arrive } => ActiveState::Move(MoveState::new(target, on_arrive)),
            StateCommand::Shoot { target } => ActiveState::Shoot(ShootState::new(target)),
            StateCommand::Plant { site } => ActiveState::Plant(ObjectiveTask::plant(site)),
            StateCommand::Defuse { site } => ActiveState::Defuse(ObjectiveTask::defuse(site)),
            StateCommand::Die => ActiveState::Die(DieState::default()),
            StateCommand::Respawn => ActiveState::Respawn(RespawnState),
            StateCommand::Hold { point } => ActiveState::Hold(HoldState::new(point)),
            StateCommand::JigglePeek { cover, peek } => {
                ActiveState::JigglePeek(JigglePeekState::new(cover, peek))
            }
        }
    }
}

impl State for ActiveState {
    fn enter(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        self.as_state().enter(agent, world)
    }

    fn execute(&mut self, agent: AgentId, world: &mut World) -> Option<StateCommand> {
        self.as_state().execute(agent, world)
    }

    fn exit(&mut self, agent: AgentId, world: &mut World) {
        self.as_state().exit(agent, world)
    }
}
