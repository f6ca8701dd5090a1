//! Match-level configuration.

use serde::{Deserialize, Serialize};
use tactics_core::TeamId;

/// Runner settings for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Simulated milliseconds per tick.
    pub tick_ms: u64,
    pub rounds: u32,
    /// Seed of the match dice; callers build the world's dice from it.
    pub seed: u64,
    /// Team attacking in the first round.
    pub first_attacking: TeamId,
    /// Swap attack and defense after every round.
    pub alternate_sides: bool,
    pub ai: AiConfig,
}

impl MatchConfig {
    pub const DEFAULT_TICK_MS: u64 = 50;
    pub const DEFAULT_ROUNDS: u32 = 5;
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::DEFAULT_TICK_MS,
            rounds: Self::DEFAULT_ROUNDS,
            seed: 0,
            first_attacking: TeamId::Alpha,
            alternate_sides: false,
            ai: AiConfig::default(),
        }
    }
}

/// Tunables of the autonomous behavior trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// How often a team refills its macro plan.
    pub plan_interval_ms: u64,
    /// Duration of a team-ordered hold.
    pub hold_ms: u64,
    /// Pause before retrying an objective action whose state refused to start.
    pub retry_ms: u64,
    /// Distance from cover to the peek point of a planned jiggle peek.
    pub peek_offset: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            plan_interval_ms: 2000,
            hold_ms: 3000,
            retry_ms: 1000,
            peek_offset: 32.0,
        }
    }
}
