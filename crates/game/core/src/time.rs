//! Simulation clock.
//!
//! All timed behavior (reaction windows, fire cooldowns, plant/defuse
//! progress, respawn and streak expiry) is expressed as "elapsed since a
//! stamp" and polled every tick. Nothing in the simulation blocks.

use core::fmt;
use core::ops::{Add, Sub};

/// Milliseconds elapsed since the match started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds between `earlier` and `self`, saturating at zero.
    pub const fn elapsed_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns true once `duration_ms` has passed since `stamp`.
    pub const fn has_elapsed(self, stamp: SimTime, duration_ms: u64) -> bool {
        self.elapsed_since(stamp) >= duration_ms
    }
}

impl Add<u64> for SimTime {
    type Output = SimTime;
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0.saturating_add(rhs))
    }
}

impl Sub<u64> for SimTime {
    type Output = SimTime;
    fn sub(self, rhs: u64) -> SimTime {
        SimTime(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Monotonic clock advanced by the match runner once per tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimClock {
    now: SimTime,
    last_delta_ms: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Length of the most recent tick in milliseconds.
    pub fn delta_ms(&self) -> u64 {
        self.last_delta_ms
    }

    /// Length of the most recent tick in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.last_delta_ms as f32 / 1000.0
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.now = self.now + delta_ms;
        self.last_delta_ms = delta_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_for_future_stamps() {
        let now = SimTime(100);
        assert_eq!(now.elapsed_since(SimTime(40)), 60);
        assert_eq!(now.elapsed_since(SimTime(400)), 0);
        assert!(now.has_elapsed(SimTime(50), 50));
        assert!(!now.has_elapsed(SimTime(51), 50));
    }

    #[test]
    fn clock_tracks_last_delta() {
        let mut clock = SimClock::new();
        clock.advance(16);
        clock.advance(20);
        assert_eq!(clock.now(), SimTime(36));
        assert_eq!(clock.delta_ms(), 20);
    }
}
