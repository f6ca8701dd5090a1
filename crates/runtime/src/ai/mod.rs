//! Behavior-tree AI for autonomous teams.
//!
//! - [`AgentCtx`]: the world plus the boards of the ticking agent
//! - [`AgentBlackboard`] / [`TeamBlackboard`]: typed scratch memory
//! - [`nodes`]: condition and action leaves
//! - [`presets`]: complete trees built from those leaves

pub mod blackboard;
pub mod context;
pub mod nodes;
pub mod presets;

pub use blackboard::{AgentBlackboard, TeamAction, TeamBlackboard, Travel, TravelPurpose};
pub use context::AgentCtx;
pub use presets::AgentTree;
