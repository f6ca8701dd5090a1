//! Ready-made trees for autonomous agents.
//!
//! ```text
//! autonomous()
//!   └─ Selector
//!       ├─ ContinueCurrentState            (shooting, planting, dead...)
//!       ├─ Sequence: ShouldFightBack → FightBack
//!       ├─ Sequence: IsAttackingSide → Selector
//!       │     ├─ Sequence: ShouldPlant → PlantAtSite
//!       │     └─ Sequence: ShouldRetrieveObjective → RetrieveObjective
//!       ├─ Sequence: !IsAttackingSide → IsObjectiveDown → ShouldDefuse → DefuseObjective
//!       ├─ Sequence: ShouldMoveToZone → ExecuteNextTeamAction
//!       ├─ Sequence: ShouldMoveToZone → MoveToRandomZone
//!       └─ IdleAction
//! ```

use behavior_tree::Behavior;
use behavior_tree::builder::{inverter, named_selector, named_sequence, selector, sequence};

use super::context::AgentCtx;
use super::nodes::*;

/// Type alias for agent trees.
pub type AgentTree = Box<dyn Behavior<AgentCtx>>;

/// Full tactical behavior: objective play, team orders, then wandering.
pub fn autonomous() -> AgentTree {
    named_selector(
        "autonomous",
        vec![
            leaf(ContinueCurrentState),
            fight_back(),
            named_sequence(
                "attack_objective",
                vec![
                    leaf(IsAttackingSide),
                    selector(vec![
                        sequence(vec![leaf(ShouldPlant), leaf(PlantAtSite::new())]),
                        sequence(vec![leaf(ShouldRetrieveObjective), leaf(RetrieveObjective)]),
                    ]),
                ],
            ),
            named_sequence(
                "defend_objective",
                vec![
                    inverter(leaf(IsAttackingSide)),
                    leaf(IsObjectiveDown),
                    leaf(ShouldDefuse),
                    leaf(DefuseObjective::new()),
                ],
            ),
            named_sequence(
                "team_plan",
                vec![leaf(ShouldMoveToZone), leaf(ExecuteNextTeamAction)],
            ),
            wander(),
            leaf(IdleAction),
        ],
    )
}

/// Roams between zones and fights back; ignores the objective.
pub fn wanderer() -> AgentTree {
    named_selector(
        "wanderer",
        vec![leaf(ContinueCurrentState), fight_back(), wander(), leaf(IdleAction)],
    )
}

/// Stays put.
pub fn passive() -> AgentTree {
    leaf(IdleAction)
}

fn leaf(node: impl Behavior<AgentCtx> + 'static) -> AgentTree {
    Box::new(node)
}

fn fight_back() -> AgentTree {
    named_sequence("fight_back", vec![leaf(ShouldFightBack), leaf(FightBack)])
}

fn wander() -> AgentTree {
    named_sequence("wander", vec![leaf(ShouldMoveToZone), leaf(MoveToRandomZone::new())])
}
