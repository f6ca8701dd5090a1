//! Errors surfaced by the match runtime.
//!
//! Only match setup and player input can fail; ticking never does.

use tactics_core::{AgentId, CoreError, ErrorSeverity, SimError, TeamId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("team {0} has no agents")]
    EmptyTeam(TeamId),

    #[error("agent {0} is not registered")]
    UnknownAgent(AgentId),

    #[error("agent {agent} belongs to {team}, which is not player-controlled")]
    NotPlayerControlled { agent: AgentId, team: TeamId },

    #[error("match is already over")]
    MatchOver,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SimError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyTeam(_) | Self::NotPlayerControlled { .. } | Self::MatchOver => ErrorSeverity::Validation,
            Self::UnknownAgent(_) => ErrorSeverity::Internal,
            Self::Core(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTeam(_) => "EMPTY_TEAM",
            Self::UnknownAgent(_) => "UNKNOWN_AGENT",
            Self::NotPlayerControlled { .. } => "NOT_PLAYER_CONTROLLED",
            Self::MatchOver => "MATCH_OVER",
            Self::Core(err) => err.error_code(),
        }
    }
}
