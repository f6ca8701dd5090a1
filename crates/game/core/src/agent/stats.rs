//! Roster ranks and the numeric combat stats derived from them.
//!
//! Ranks are converted exactly once, when an agent is created. Everything
//! downstream (accuracy rolls, reaction delays, streak chances) reads the
//! numeric [`CombatStats`].

/// Letter grade supplied by the roster for each attribute.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    S,
    A,
    #[default]
    B,
    C,
    D,
    F,
}

impl Rank {
    const fn index(self) -> usize {
        match self {
            Rank::S => 0,
            Rank::A => 1,
            Rank::B => 2,
            Rank::C => 3,
            Rank::D => 4,
            Rank::F => 5,
        }
    }
}

/// Attribute ranks of one roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeRanks {
    pub accuracy: Rank,
    pub headshot: Rank,
    pub reaction: Rank,
    pub mental: Rank,
}

/// Conversion table from ranks to numeric stats, indexed S, A, B, C, D, F.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankTable {
    /// Base accuracy percentage.
    pub accuracy: [u32; 6],
    /// Headshot percentage.
    pub headshot: [u32; 6],
    /// Reaction delay in milliseconds.
    pub reaction_ms: [u64; 6],
    /// Chance to catch a hot streak, in percent.
    pub hot_streak: [u32; 6],
    /// Chance to fall into a cold streak, in percent.
    pub cold_streak: [u32; 6],
}

impl Default for RankTable {
    fn default() -> Self {
        Self {
            accuracy: [70, 60, 50, 40, 30, 20],
            headshot: [35, 28, 20, 14, 8, 4],
            reaction_ms: [150, 200, 250, 300, 350, 400],
            hot_streak: [60, 50, 40, 30, 20, 10],
            cold_streak: [10, 20, 30, 40, 50, 60],
        }
    }
}

impl RankTable {
    pub fn stats(&self, ranks: &AttributeRanks) -> CombatStats {
        CombatStats {
            accuracy: self.accuracy[ranks.accuracy.index()],
            headshot: self.headshot[ranks.headshot.index()],
            reaction_ms: self.reaction_ms[ranks.reaction.index()],
            hot_streak: self.hot_streak[ranks.mental.index()],
            cold_streak: self.cold_streak[ranks.mental.index()],
        }
    }
}

/// Numeric combat stats of an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    /// Base accuracy percentage (0-100).
    pub accuracy: u32,
    /// Headshot percentage (0-100).
    pub headshot: u32,
    /// Delay before turning on an attacker.
    pub reaction_ms: u64,
    /// Personal hot-streak chance.
    pub hot_streak: u32,
    /// Personal cold-streak chance.
    pub cold_streak: u32,
}

impl Default for CombatStats {
    fn default() -> Self {
        RankTable::default().stats(&AttributeRanks::default())
    }
}
