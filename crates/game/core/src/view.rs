//! Pure presentation snapshots.

use glam::Vec2;

use crate::agent::{AgentId, MentalState, Progress, Scoreline, TeamId};
use crate::fsm::StateKind;
use crate::round::{Objective, RoundPhase};
use crate::time::SimTime;
use crate::world::World;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id: AgentId,
    pub name: String,
    pub team: TeamId,
    pub health: u32,
    pub position: Vec2,
    pub facing: f32,
    pub state: StateKind,
    pub weapon: String,
    pub credits: u32,
    pub mental: MentalState,
    pub score: Scoreline,
    pub progress: Option<Progress>,
    pub visible: bool,
    pub being_shot_at: bool,
    pub trace: Option<Vec2>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundView {
    pub number: u32,
    pub attacking: TeamId,
    pub phase: RoundPhase,
    pub objective: Objective,
    pub elapsed_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldView {
    pub time: SimTime,
    pub round: RoundView,
    pub agents: Vec<AgentView>,
}

impl World {
    pub fn snapshot(&self) -> WorldView {
        let round = self.round();
        WorldView {
            time: self.now(),
            round: RoundView {
                number: round.number,
                attacking: round.attacking,
                phase: round.phase,
                objective: round.objective.clone(),
                elapsed_ms: self.now().elapsed_since(round.started_at),
            },
            agents: self
                .agents()
                .iter()
                .map(|agent| AgentView {
                    id: agent.id,
                    name: agent.name.clone(),
                    team: agent.team,
                    health: agent.health,
                    position: agent.position,
                    facing: agent.facing,
                    state: agent.state,
                    weapon: agent.weapon.clone(),
                    credits: agent.credits,
                    mental: agent.mental.state(),
                    score: agent.score,
                    progress: agent.progress,
                    visible: agent.visible,
                    being_shot_at: agent.being_shot_at,
                    trace: agent.trace,
                })
                .collect(),
        }
    }
}
