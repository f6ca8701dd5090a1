//! Lightweight behavior tree library for tick-driven simulations.
//!
//! Trees are built once and re-evaluated every simulation tick. Nodes never
//! advance time themselves; long-running work is reported as
//! [`Status::Running`] and polled again on the next tick.
//!
//! - **Stateful leaves**: [`Behavior::tick`] takes `&mut self`, so leaves may
//!   remember decisions across ticks (e.g. a chosen destination)
//! - **Short-circuiting composites**: [`Sequence`] stops at the first
//!   non-success, [`Selector`] at the first non-failure
//! - **Optional tracing**: [`Behavior::tick_traced`] records every visited
//!   node into a [`Trace`]
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod status;
pub mod trace;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use status::Status;
pub use trace::{Trace, TraceEntry};
