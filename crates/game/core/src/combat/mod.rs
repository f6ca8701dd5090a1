//! Combat resolution, invoked by the Shoot state.
//!
//! # Shot resolution
//!
//! 1. Classify the shooter–target distance into a [`RangeBucket`].
//! 2. Scale the shooter's base accuracy by the weapon modifier for that
//!    bucket and by the active mental-state multiplier.
//! 3. Roll a d100; the shot hits when the roll does not exceed the result.
//! 4. On a hit, roll the body location and apply its damage through
//!    [`apply_damage`]. On a miss, perturb the aim for the cosmetic trace.
//!
//! Every shot, hit or miss, schedules the target's return fire.

mod damage;
mod range;
mod shot;

pub use damage::{DamageReport, apply_damage};
pub use range::RangeBucket;
pub use shot::{BodyLocation, ShotOutcome, fire, hit_chance, roll_location};
