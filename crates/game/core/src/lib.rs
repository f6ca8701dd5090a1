//! Tactical team-combat simulation core.
//!
//! `tactics-core` holds the rules: agents and their per-agent state machines,
//! grid pathfinding, vision-based targeting and probabilistic combat with
//! streak modifiers. All mutation flows through [`World`], which owns the
//! agents and receives its collaborators (grid, vision, weapons, dice) through
//! [`SimContext`] instead of reaching for globals.
//!
//! The simulation is single-threaded and tick-driven. Every timer is an
//! "elapsed since" check against [`SimClock`], polled once per step.
pub mod agent;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod events;
pub mod fsm;
pub mod grid;
pub mod intel;
pub mod pathfinding;
pub mod round;
pub mod time;
pub mod view;
pub mod vision;
pub mod weapon;
pub mod world;

pub use agent::{
    Agent, AgentEvent, AgentId, AgentObserver, AgentSpec, AttributeRanks, CombatStats, DamageLedger, EventBus,
    MAX_HEALTH, MentalState, MentalTracker, Progress, Rank, RankTable, Scoreline, Side, StreakCheck, TeamId,
};
pub use combat::{BodyLocation, DamageReport, RangeBucket, ShotOutcome};
pub use config::{CombatConfig, MovementConfig, RewardConfig, RoundConfig, SimConfig, StreakConfig};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use error::{CoreError, CoreResult, ErrorSeverity, GridError, SimError};
pub use events::{LoggedEvent, SimEvent, StreakKind};
pub use fsm::{ActiveState, ArrivalCallback, State, StateCommand, StateKind, StateMachine, StateSet};
pub use grid::{Cell, Region, Tile, TileGrid, TileMap};
pub use intel::{Intel, IntelRecord};
pub use pathfinding::{DistanceMetric, PathNode, Pathfinder};
pub use round::{Objective, RoundEndReason, RoundOutcome, RoundPhase, RoundState, Site};
pub use time::{SimClock, SimTime};
pub use view::{AgentView, RoundView, WorldView};
pub use vision::{ClearSight, GridSight, VisionCone, VisionService};
pub use weapon::{LocationDamage, RangeAccuracy, Weapon, WeaponCatalogue};
pub use world::{SimContext, SpawnRegion, World};
