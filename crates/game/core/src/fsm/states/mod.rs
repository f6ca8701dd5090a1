//! State implementations and their state-scoped fields.

mod die;
mod hold;
mod idle;
mod jiggle;
mod movement;
mod objective;
mod respawn;
mod shoot;

pub use die::DieState;
pub use hold::HoldState;
pub use idle::IdleState;
pub use jiggle::JigglePeekState;
pub use movement::{MoveState, PathFollower};
pub use objective::{ObjectiveAction, ObjectiveTask};
pub use respawn::RespawnState;
pub use shoot::ShootState;
