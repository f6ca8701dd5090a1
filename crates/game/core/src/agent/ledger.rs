use super::AgentId;

/// Cumulative damage dealt to one agent during its current life, per attacker.
///
/// Attackers keep the order in which they first dealt damage, which is also
/// the order assists are credited in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageLedger {
    entries: Vec<(AgentId, u32)>,
}

impl DamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, attacker: AgentId, amount: u32) {
        match self.entries.iter_mut().find(|(id, _)| *id == attacker) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((attacker, amount)),
        }
    }

    pub fn total(&self, attacker: AgentId) -> u32 {
        self.entries
            .iter()
            .find(|(id, _)| *id == attacker)
            .map_or(0, |(_, total)| *total)
    }

    pub fn attackers(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
