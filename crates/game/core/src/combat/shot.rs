use crate::agent::AgentId;
use crate::dice::Dice;
use crate::events::SimEvent;
use crate::vision::angle_between;
use crate::world::World;

use super::{RangeBucket, apply_damage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyLocation {
    Head,
    Body,
    Limbs,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotOutcome {
    Hit {
        location: BodyLocation,
        damage: u32,
        lethal: bool,
    },
    Miss {
        /// Perturbed aim angle of the cosmetic trace, in radians.
        trace_angle: f32,
    },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }
}

// ============================================================================
// Rolls
// ============================================================================

/// Hit percentage for one shot.
///
/// # Formula
///
/// ```text
/// chance = base_accuracy * weapon_modifier * mental_multiplier
/// ```
pub fn hit_chance(base_accuracy: u32, weapon_modifier: f32, mental_multiplier: f32) -> f32 {
    base_accuracy as f32 * weapon_modifier * mental_multiplier
}

/// Rolls where a hit lands.
///
/// A d100 not exceeding `headshot` is a headshot; other hits land on the body
/// with probability `body_share`, otherwise on the limbs.
pub fn roll_location(headshot: u32, body_share: f32, dice: &mut dyn Dice) -> BodyLocation {
    if dice.roll_d100() <= headshot {
        BodyLocation::Head
    } else if dice.range_f32(0.0, 1.0) < body_share {
        BodyLocation::Body
    } else {
        BodyLocation::Limbs
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Fires one shot from `shooter` at `target`.
///
/// Returns `None` when either agent does not exist.
pub fn fire(world: &mut World, shooter: AgentId, target: AgentId) -> Option<ShotOutcome> {
    let origin = world.agent(shooter)?.position;
    let aim_point = world.agent(target)?.position;
    let stats = world.agent(shooter)?.stats;
    let mental = world.agent(shooter)?.mental.accuracy_multiplier(&world.config().streaks);
    let weapon = world.weapon_of(shooter)?.clone();
    let combat = world.config().combat.clone();

    let bucket = RangeBucket::classify(origin.distance(aim_point), &combat);
    let chance = hit_chance(stats.accuracy, weapon.accuracy.at(bucket), mental);
    let roll = world.dice().roll_d100();

    let (outcome, trace_end) = if roll as f32 <= chance {
        let location = roll_location(stats.headshot, combat.body_share, world.dice());
        let damage = weapon.damage.at(location);
        let lethal = apply_damage(world, shooter, target, damage).is_some_and(|report| report.lethal);
        (ShotOutcome::Hit { location, damage, lethal }, aim_point)
    } else {
        let dice = world.dice();
        let spread = dice.range_f32(combat.miss_spread_min_deg, combat.miss_spread_max_deg);
        let sign = if dice.index(2) == 0 { -1.0 } else { 1.0 };
        let trace_angle = angle_between(origin, aim_point) + sign * spread.to_radians();
        let trace_end = world.cast_ray(origin, trace_angle, combat.vision_range);
        (ShotOutcome::Miss { trace_angle }, trace_end)
    };

    tracing::trace!(%shooter, %target, %bucket, chance, roll, ?outcome, "shot");
    if let Some(body) = world.agent_mut(shooter) {
        body.trace = Some(trace_end);
    }
    let hit = match outcome {
        ShotOutcome::Hit { location, .. } => Some(location),
        ShotOutcome::Miss { .. } => None,
    };
    world.emit(SimEvent::ShotFired {
        shooter,
        target,
        hit,
        trace_end,
    });

    provoke(world, shooter, target);
    Some(outcome)
}

/// Marks the target as under fire and schedules its reaction.
fn provoke(world: &mut World, shooter: AgentId, target: AgentId) {
    let now = world.now();
    let streaks = world.config().streaks.clone();
    let Some(victim) = world.agent_mut(target) else {
        return;
    };
    if !victim.is_alive() {
        return;
    }

    victim.being_shot_at = true;
    if victim.pending_reaction.is_none() {
        let delay = victim.stats.reaction_ms as f32 * victim.mental.reaction_multiplier(&streaks);
        victim.pending_reaction = Some(crate::agent::PendingReaction {
            shooter,
            due: now + delay.round() as u64,
        });
    }
    let team = victim.team;
    world.reveal(team, shooter);
}
