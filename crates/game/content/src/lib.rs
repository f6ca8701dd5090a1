//! Data-driven match content and its loaders.
//!
//! This crate turns files on disk into the types `tactics-core` consumes:
//! - Simulation tunables (TOML, [`SimConfig`](tactics_core::SimConfig))
//! - Rosters of agents with their attribute ranks (TOML)
//! - Weapon catalogues (RON)
//! - Map layouts with sites, spawn rooms and zones (RON, ASCII tile rows)
//!
//! Content is read once at match setup and never mutated by the simulation.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, MapLayout, MapLoader, RosterEntry, RosterLoader, WeaponLoader,
};
