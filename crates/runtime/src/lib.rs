//! Match runtime for the tactical simulation.
//!
//! This crate drives a [`tactics_core::World`] through whole matches. Each
//! team is run by a [`TeamCoordinator`], either through behavior trees or
//! through player-issued commands, and a [`MatchRunner`] sequences ticks,
//! rounds and rewards.
//!
//! Modules are organized by responsibility:
//! - [`ai`] holds blackboards, tree leaves and tree presets
//! - [`team`] hosts the per-team coordinator and its macro planner
//! - [`orchestrator`] runs rounds and reports the [`MatchSummary`]
//! - [`config`] and [`error`] hold match settings and the error type
pub mod ai;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod team;

pub use ai::{AgentBlackboard, AgentCtx, AgentTree, TeamAction, TeamBlackboard, Travel, TravelPurpose};
pub use config::{AiConfig, MatchConfig};
pub use error::{Result, RuntimeError};
pub use orchestrator::{AgentSummary, MatchBuilder, MatchRunner, MatchSummary, RoundRecord};
pub use team::{Control, EngageOnSight, PlayerCommand, TeamCoordinator, plan_actions};
