//! Simulation tunables.
//!
//! Reward amounts, streak thresholds, timer durations and rank conversions are
//! configuration data supplied by the caller (usually loaded from TOML by
//! `tactics-content`). Defaults reproduce the stock match rules.

use crate::agent::RankTable;
use crate::pathfinding::DistanceMetric;

/// Root configuration handed to [`crate::World`] at construction.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub streaks: StreakConfig,
    pub rewards: RewardConfig,
    pub round: RoundConfig,
    pub ranks: RankTable,
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Steering and pathing parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Steering speed in world units per second.
    pub speed: f32,
    /// A waypoint counts as reached once closer than this.
    pub arrival_radius: f32,
    /// Cost/heuristic metric used by the pathfinder.
    pub metric: DistanceMetric,
    /// Number of cover→peek→cover cycles a jiggle peek performs.
    pub peek_cycles: u32,
    /// Dwell time at each end of a jiggle peek.
    pub peek_dwell_ms: u64,
}

impl MovementConfig {
    pub const DEFAULT_SPEED: f32 = 120.0;
    pub const DEFAULT_ARRIVAL_RADIUS: f32 = 1.0;
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            arrival_radius: Self::DEFAULT_ARRIVAL_RADIUS,
            metric: DistanceMetric::Octile,
            peek_cycles: 2,
            peek_dwell_ms: 400,
        }
    }
}

/// Vision, accuracy and life-cycle timers used by the combat states.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Shoot holds fire for this long after entering.
    pub reaction_window_ms: u64,
    pub vision_range: f32,
    /// Full angular width of the vision cone in degrees.
    pub vision_cone_deg: f32,
    /// Upper bound (inclusive) of the near range bucket.
    pub near_range: f32,
    /// Upper bound (inclusive) of the mid range bucket; beyond is far.
    pub mid_range: f32,
    /// Share of non-head hits that land on the body instead of the limbs.
    pub body_share: f32,
    pub miss_spread_min_deg: f32,
    pub miss_spread_max_deg: f32,
    pub respawn_delay_ms: u64,
    pub heal_delay_ms: u64,
    pub heal_interval_ms: u64,
    pub heal_amount: u32,
    /// How long an attacker is remembered for the fight-back decision.
    pub fight_back_memory_ms: u64,
    /// Respawning agents buy the best weapon they can afford.
    pub auto_buy: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            reaction_window_ms: 250,
            vision_range: 480.0,
            vision_cone_deg: 100.0,
            near_range: 96.0,
            mid_range: 288.0,
            body_share: 0.7,
            miss_spread_min_deg: 2.0,
            miss_spread_max_deg: 5.0,
            respawn_delay_ms: 5000,
            heal_delay_ms: 4000,
            heal_interval_ms: 1000,
            heal_amount: 1,
            fight_back_memory_ms: 3000,
            auto_buy: true,
        }
    }
}

/// Hot/cold streak thresholds and modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreakConfig {
    pub kill_threshold: u32,
    pub death_threshold: u32,
    pub duration_ms: u64,
    pub hot_accuracy: f32,
    pub hot_reaction: f32,
    pub cold_accuracy: f32,
    pub cold_reaction: f32,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            kill_threshold: 3,
            death_threshold: 3,
            duration_ms: 30_000,
            hot_accuracy: 1.15,
            hot_reaction: 0.8,
            cold_accuracy: 0.85,
            cold_reaction: 1.25,
        }
    }
}

/// Credits granted for round events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    pub kill: u32,
    pub assist: u32,
    pub plant: u32,
    pub defuse: u32,
    pub round_win: u32,
    pub round_loss: u32,
    pub max_credits: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            kill: 200,
            assist: 75,
            plant: 300,
            defuse: 300,
            round_win: 3000,
            round_loss: 1900,
            max_credits: 9000,
        }
    }
}

/// Objective timers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoundConfig {
    pub plant_ms: u64,
    pub defuse_ms: u64,
    pub detonation_ms: u64,
    /// Round ends in the defenders' favour if nothing is planted by then.
    pub time_limit_ms: u64,
    pub pickup_radius: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            plant_ms: 4000,
            defuse_ms: 7000,
            detonation_ms: 45_000,
            time_limit_ms: 100_000,
            pickup_radius: 16.0,
        }
    }
}
