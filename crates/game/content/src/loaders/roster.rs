//! Roster loader.
//!
//! A roster lists the agents of both teams with their attribute ranks. Agents
//! are placed at match setup, either on an explicit cell or on the next free
//! cell of their team's spawn rooms.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tactics_core::{AgentSpec, AttributeRanks, Cell, TeamId};

use crate::loaders::{LoadResult, load_with};

/// One roster line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub team: TeamId,
    #[serde(default)]
    pub ranks: AttributeRanks,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub weapon: Option<String>,
    /// Fixed starting cell; spawn rooms are used when absent.
    #[serde(default)]
    pub spawn: Option<Cell>,
}

impl RosterEntry {
    pub fn into_spec(self, position: Vec2) -> AgentSpec {
        AgentSpec {
            name: self.name,
            team: self.team,
            position,
            ranks: self.ranks,
            credits: self.credits,
            weapon: self.weapon,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterFile {
    agents: Vec<RosterEntry>,
}

/// Loader for rosters from TOML files (`[[agents]]` tables).
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RosterEntry>> {
        load_with(path, Self::parse)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<RosterEntry>> {
        let roster: RosterFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster TOML: {}", e))?;

        let mut names = HashSet::new();
        for entry in &roster.agents {
            anyhow::ensure!(!entry.name.trim().is_empty(), "roster entry with an empty name");
            anyhow::ensure!(names.insert(entry.name.as_str()), "duplicate agent name {:?}", entry.name);
        }
        Ok(roster.agents)
    }
}
