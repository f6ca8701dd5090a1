//! Per-team cache of last-known enemy information.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::agent::Agent;
use crate::time::SimTime;

/// Snapshot of one enemy as last observed by the team.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntelRecord {
    pub health: u32,
    pub weapon: String,
    pub position: Vec2,
    pub is_dead: bool,
    pub observed_at: SimTime,
}

impl IntelRecord {
    fn of(agent: &Agent, now: SimTime) -> Self {
        Self {
            health: agent.health,
            weapon: agent.weapon.clone(),
            position: agent.position,
            is_dead: !agent.is_alive(),
            observed_at: now,
        }
    }
}

/// Records keyed by enemy name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intel {
    records: BTreeMap<String, IntelRecord>,
}

impl Intel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot of `enemy`.
    ///
    /// A record already marked dead is only replaced while the enemy is
    /// currently visible. Returns whether the record was written.
    pub fn observe(&mut self, enemy: &Agent, visible: bool, now: SimTime) -> bool {
        if !visible && self.records.get(&enemy.name).is_some_and(|record| record.is_dead) {
            return false;
        }
        self.records.insert(enemy.name.clone(), IntelRecord::of(enemy, now));
        true
    }

    pub fn get(&self, name: &str) -> Option<&IntelRecord> {
        self.records.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IntelRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Enemies not known to be dead, most recently observed first.
    pub fn living(&self) -> Vec<(&str, &IntelRecord)> {
        let mut living: Vec<_> = self.iter().filter(|(_, record)| !record.is_dead).collect();
        living.sort_by(|a, b| b.1.observed_at.cmp(&a.1.observed_at));
        living
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
