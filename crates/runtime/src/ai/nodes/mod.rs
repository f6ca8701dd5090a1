//! Behavior-tree leaves for tactical agents.
//!
//! Conditions only read the world (and may fill a blackboard slot for the
//! action that follows them); actions issue state-machine transitions.

pub mod actions;
pub mod conditions;

pub use actions::{
    ContinueCurrentState, DefuseObjective, ExecuteNextTeamAction, FightBack, IdleAction, MoveToRandomZone,
    PlantAtSite, RetrieveObjective,
};
pub use conditions::{
    IsAttackingSide, IsObjectiveDown, ShouldDefuse, ShouldFightBack, ShouldMoveToZone, ShouldPlant,
    ShouldRetrieveObjective,
};

use glam::Vec2;
use tactics_core::{AgentId, TeamId, World};

/// Active member of `team` closest to `point`; ties go to the lower id.
pub(crate) fn nearest_active(world: &World, team: TeamId, point: Vec2) -> Option<AgentId> {
    world
        .agents()
        .iter()
        .filter(|agent| agent.team == team && agent.is_active())
        .min_by(|a, b| {
            a.position
                .distance_squared(point)
                .total_cmp(&b.position.distance_squared(point))
                .then(a.id.cmp(&b.id))
        })
        .map(|agent| agent.id)
}
