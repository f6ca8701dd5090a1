use core::fmt;

use glam::Vec2;

use super::StateKind;
use crate::agent::AgentId;
use crate::world::World;

/// Invoked once when a Move state reaches its target.
pub type ArrivalCallback = Box<dyn FnOnce(&mut World, AgentId)>;

/// A requested transition with the payload of the state being entered.
pub enum StateCommand {
    Idle,
    Move {
        target: Vec2,
        on_arrive: Option<ArrivalCallback>,
    },
    /// Without a target the nearest visible hostile is engaged.
    Shoot { target: Option<AgentId> },
    Plant { site: String },
    Defuse { site: String },
    Die,
    Respawn,
    Hold { point: Vec2 },
    JigglePeek { cover: Vec2, peek: Vec2 },
}

impl StateCommand {
    pub fn move_to(target: Vec2) -> Self {
        StateCommand::Move {
            target,
            on_arrive: None,
        }
    }

    pub fn move_then(target: Vec2, on_arrive: impl FnOnce(&mut World, AgentId) + 'static) -> Self {
        StateCommand::Move {
            target,
            on_arrive: Some(Box::new(on_arrive)),
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            StateCommand::Idle => StateKind::Idle,
            StateCommand::Move { .. } => StateKind::Move,
            StateCommand::Shoot { .. } => StateKind::Shoot,
            StateCommand::Plant { .. } => StateKind::Plant,
            StateCommand::Defuse { .. } => StateKind::Defuse,
            StateCommand::Die => StateKind::Die,
            StateCommand::Respawn => StateKind::Respawn,
            StateCommand::Hold { .. } => StateKind::Hold,
            StateCommand::JigglePeek { .. } => StateKind::JigglePeek,
        }
    }

    /// The payload-free command for `kind`, if it has one.
    pub fn bare(kind: StateKind) -> Option<Self> {
        match kind {
            StateKind::Idle => Some(StateCommand::Idle),
            StateKind::Shoot => Some(StateCommand::Shoot { target: None }),
            StateKind::Die => Some(StateCommand::Die),
            StateKind::Respawn => Some(StateCommand::Respawn),
            _ => None,
        }
    }
}

impl fmt::Debug for StateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateCommand::Idle => f.write_str("Idle"),
            StateCommand::Move { target, on_arrive } => f
                .debug_struct("Move")
                .field("target", target)
                .field("on_arrive", &on_arrive.is_some())
                .finish(),
            StateCommand::Shoot { target } => f.debug_struct("Shoot").field("target", target).finish(),
            StateCommand::Plant { site } => f.debug_struct("Plant").field("site", site).finish(),
            StateCommand::Defuse { site } => f.debug_struct("Defuse").field("site", site).finish(),
            StateCommand::Die => f.write_str("Die"),
            StateCommand::Respawn => f.write_str("Respawn"),
            StateCommand::Hold { point } => f.debug_struct("Hold").field("point", point).finish(),
            StateCommand::JigglePeek { cover, peek } => f
                .debug_struct("JigglePeek")
                .field("cover", cover)
                .field("peek", peek)
                .finish(),
        }
    }
}
