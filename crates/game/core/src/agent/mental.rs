//! Hot/cold streak tracking, independent of the behavior state machine.

use crate::config::StreakConfig;
use crate::dice::Dice;
use crate::time::SimTime;

/// Temporary performance modifier triggered by kill or death streaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MentalState {
    Hot,
    #[default]
    Normal,
    Cold,
}

/// Result of the streak check that runs on every kill and death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreakCheck {
    /// The streak counter is not at its threshold, or the agent is not Normal.
    Skipped,
    /// A roll was made; `entered` tells whether the streak state was entered.
    Rolled { entered: bool },
}

impl StreakCheck {
    pub fn entered(self) -> bool {
        matches!(self, StreakCheck::Rolled { entered: true })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MentalTracker {
    state: MentalState,
    since: Option<SimTime>,
    kill_streak: u32,
    death_streak: u32,
}

impl MentalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MentalState {
        self.state
    }

    /// When the current non-Normal state started.
    pub fn since(&self) -> Option<SimTime> {
        self.since
    }

    pub fn kill_streak(&self) -> u32 {
        self.kill_streak
    }

    pub fn death_streak(&self) -> u32 {
        self.death_streak
    }

    /// Counts a kill and rolls for Hot when the streak reaches the threshold.
    pub fn record_kill(
        &mut self,
        now: SimTime,
        hot_chance: u32,
        config: &StreakConfig,
        dice: &mut dyn Dice,
    ) -> StreakCheck {
        self.death_streak = 0;
        self.kill_streak += 1;
        if self.state != MentalState::Normal || self.kill_streak != config.kill_threshold {
            return StreakCheck::Skipped;
        }
        let entered = dice.chance(hot_chance);
        if entered {
            self.enter(MentalState::Hot, now);
        }
        StreakCheck::Rolled { entered }
    }

    /// Counts a death, clears Hot, and rolls for Cold at the threshold.
    pub fn record_death(
        &mut self,
        now: SimTime,
        cold_chance: u32,
        config: &StreakConfig,
        dice: &mut dyn Dice,
    ) -> StreakCheck {
        self.kill_streak = 0;
        self.death_streak += 1;
        if self.state == MentalState::Hot {
            self.reset();
        }
        if self.state != MentalState::Normal || self.death_streak != config.death_threshold {
            return StreakCheck::Skipped;
        }
        let entered = dice.chance(cold_chance);
        if entered {
            self.enter(MentalState::Cold, now);
        }
        StreakCheck::Rolled { entered }
    }

    /// Returns to Normal once the streak duration has elapsed. Returns `true`
    /// when the state changed.
    pub fn expire(&mut self, now: SimTime, config: &StreakConfig) -> bool {
        match self.since {
            Some(since) if self.state != MentalState::Normal && now.has_elapsed(since, config.duration_ms) => {
                self.reset();
                self.kill_streak = 0;
                self.death_streak = 0;
                true
            }
            _ => false,
        }
    }

    pub fn accuracy_multiplier(&self, config: &StreakConfig) -> f32 {
        match self.state {
            MentalState::Hot => config.hot_accuracy,
            MentalState::Normal => 1.0,
            MentalState::Cold => config.cold_accuracy,
        }
    }

    pub fn reaction_multiplier(&self, config: &StreakConfig) -> f32 {
        match self.state {
            MentalState::Hot => config.hot_reaction,
            MentalState::Normal => 1.0,
            MentalState::Cold => config.cold_reaction,
        }
    }

    fn enter(&mut self, state: MentalState, now: SimTime) {
        self.state = state;
        self.since = Some(now);
    }

    fn reset(&mut self) {
        self.state = MentalState::Normal;
        self.since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{ScriptedDice, SeededDice};

    fn config(threshold: u32) -> StreakConfig {
        StreakConfig {
            kill_threshold: threshold,
            death_threshold: threshold,
            ..StreakConfig::default()
        }
    }

    #[test]
    fn hot_streak_rate_matches_personal_chance() {
        let config = config(3);
        let mut dice = SeededDice::new(7);
        let trials = 20_000;
        let mut hot = 0;
        for _ in 0..trials {
            let mut tracker = MentalTracker::new();
            for _ in 0..3 {
                tracker.record_kill(SimTime::ZERO, 40, &config, &mut dice);
            }
            if tracker.state() == MentalState::Hot {
                hot += 1;
            }
        }
        let rate = hot as f64 / trials as f64;
        assert!((rate - 0.40).abs() < 0.02, "hot rate {rate}");
    }

    #[test]
    fn roll_only_happens_at_the_threshold() {
        let config = config(2);
        let mut dice = ScriptedDice::new([1, 1, 1]);
        let mut tracker = MentalTracker::new();
        assert_eq!(
            tracker.record_kill(SimTime::ZERO, 50, &config, &mut dice),
            StreakCheck::Skipped
        );
        assert!(tracker.record_kill(SimTime(10), 50, &config, &mut dice).entered());
        assert_eq!(tracker.since(), Some(SimTime(10)));
        // Already Hot: further kills never roll.
        assert_eq!(
            tracker.record_kill(SimTime(20), 50, &config, &mut dice),
            StreakCheck::Skipped
        );
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn any_death_clears_hot() {
        let config = config(1);
        let mut dice = ScriptedDice::new([1, 100]);
        let mut tracker = MentalTracker::new();
        tracker.record_kill(SimTime::ZERO, 100, &config, &mut dice);
        assert_eq!(tracker.state(), MentalState::Hot);

        tracker.record_death(SimTime(5), 0, &config, &mut dice);
        assert_eq!(tracker.state(), MentalState::Normal);
        assert_eq!(tracker.kill_streak(), 0);
    }

    #[test]
    fn streaks_expire_after_duration() {
        let config = config(1);
        let mut dice = ScriptedDice::new([1]);
        let mut tracker = MentalTracker::new();
        tracker.record_death(SimTime(100), 100, &config, &mut dice);
        assert_eq!(tracker.state(), MentalState::Cold);
        assert!(tracker.reaction_multiplier(&config) > 1.0);

        assert!(!tracker.expire(SimTime(100 + config.duration_ms - 1), &config));
        assert!(tracker.expire(SimTime(100 + config.duration_ms), &config));
        assert_eq!(tracker.state(), MentalState::Normal);
        assert_eq!(tracker.accuracy_multiplier(&config), 1.0);
    }
}
