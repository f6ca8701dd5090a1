//! Random rolls for combat, mental state and AI choices.
//!
//! Every random decision in the simulation flows through [`Dice`] so a match
//! can be replayed from its seed, and tests can script exact outcomes.

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of random rolls.
pub trait Dice {
    /// Generate a random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Common for percentage-based mechanics like hit chance.
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32() % range)
    }

    /// Uniform float in `[min, max)`.
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        let unit = self.next_u32() as f32 / (u32::MAX as f32 + 1.0);
        min + unit * (max - min)
    }

    /// Uniform index into a collection of `len` items (`len` must be non-zero).
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }

    /// Returns true with probability `percent`/100.
    fn chance(&mut self, percent: u32) -> bool {
        self.roll_d100() <= percent
    }
}

/// ChaCha8-backed dice seeded from the match seed.
#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn roll_d100(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }

    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// Replays a fixed list of d100 results, then falls back to a seeded stream.
///
/// Only `roll_d100` consumes the script; raw `next_u32` draws (used for
/// cosmetic spread and AI choices) come from the fallback so scripted combat
/// rolls stay aligned with the rolls a test expects.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<u32>,
    fallback: SeededDice,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: rolls.into_iter().collect(),
            fallback: SeededDice::new(0),
        }
    }

    /// Appends further scripted d100 results.
    pub fn push(&mut self, roll: u32) {
        self.script.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for ScriptedDice {
    fn next_u32(&mut self) -> u32 {
        self.fallback.next_u32()
    }

    fn roll_d100(&mut self) -> u32 {
        match self.script.pop_front() {
            Some(roll) => roll.clamp(1, 100),
            None => self.fallback.roll_d100(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_is_reproducible() {
        let mut a = SeededDice::new(42);
        let mut b = SeededDice::new(42);
        let rolls_a: Vec<u32> = (0..32).map(|_| a.roll_d100()).collect();
        let rolls_b: Vec<u32> = (0..32).map(|_| b.roll_d100()).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|r| (1..=100).contains(r)));
    }

    #[test]
    fn scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new([7, 250, 0]);
        assert_eq!(dice.roll_d100(), 7);
        assert_eq!(dice.roll_d100(), 100);
        assert_eq!(dice.roll_d100(), 1);
        assert_eq!(dice.remaining(), 0);
        assert!((1..=100).contains(&dice.roll_d100()));
    }

    #[test]
    fn range_f32_stays_in_bounds() {
        let mut dice = SeededDice::new(3);
        for _ in 0..200 {
            let v = dice.range_f32(2.0, 5.0);
            assert!((2.0..5.0).contains(&v));
        }
    }
}
