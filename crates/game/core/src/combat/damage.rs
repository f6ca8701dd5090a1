//! Damage pipeline and kill/assist attribution.

use crate::agent::{AgentEvent, AgentId, DamageStamp, MentalState, StreakCheck};
use crate::events::{SimEvent, StreakKind};
use crate::fsm::StateCommand;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage actually removed from the victim's health.
    pub dealt: u32,
    pub remaining: u32,
    pub lethal: bool,
}

/// Applies `amount` damage from `attacker` to `victim`.
///
/// The damage is recorded on the victim's ledger and health is clamped at
/// zero. Lethal damage credits the kill through the victim's killer latch,
/// grants assists to every other attacker on the ledger, and moves the victim
/// into Die. Damage to an agent that is already dead is ignored.
pub fn apply_damage(world: &mut World, attacker: AgentId, victim: AgentId, amount: u32) -> Option<DamageReport> {
    let now = world.now();
    let body = world.agent_mut(victim)?;
    if !body.is_alive() {
        return None;
    }

    let dealt = amount.min(body.health);
    body.health -= dealt;
    body.ledger.record(attacker, dealt);
    body.last_damage = Some(DamageStamp { attacker, at: now });
    let report = DamageReport {
        dealt,
        remaining: body.health,
        lethal: body.health == 0,
    };

    world.emit(SimEvent::Damaged {
        attacker,
        victim,
        amount: dealt,
        remaining: report.remaining,
    });
    if report.lethal {
        resolve_kill(world, attacker, victim);
    }
    Some(report)
}

fn resolve_kill(world: &mut World, killer: AgentId, victim: AgentId) {
    let now = world.now();

    // Victim side: death counter and the cold-streak check.
    if let Some((body, dice, config)) = world.agent_and_dice(victim) {
        body.score.deaths += 1;
        let was = body.mental.state();
        let check = body.mental.record_death(now, body.stats.cold_streak, &config.streaks, dice);
        let is = body.mental.state();
        log_streak(world, victim, StreakKind::Cold, check, was, is);
    }

    let Some(body) = world.agent_mut(victim) else {
        return;
    };
    if body.killer.is_some() {
        tracing::warn!(%victim, %killer, "kill already credited for this life");
        return;
    }
    body.killer = Some(killer);
    let assists: Vec<AgentId> = body.ledger.attackers().filter(|id| *id != killer).collect();
    let rewards = world.config().rewards.clone();

    if let Some((body, dice, config)) = world.agent_and_dice(killer) {
        body.score.kills += 1;
        body.earn(rewards.kill, rewards.max_credits);
        let was = body.mental.state();
        let check = body.mental.record_kill(now, body.stats.hot_streak, &config.streaks, dice);
        let is = body.mental.state();
        log_streak(world, killer, StreakKind::Hot, check, was, is);
    }

    for assist in &assists {
        if let Some(body) = world.agent_mut(*assist) {
            body.score.assists += 1;
            body.earn(rewards.assist, rewards.max_credits);
        }
    }

    if let Some(team) = world.agent(killer).map(|body| body.team) {
        world.reveal(team, victim);
    }
    tracing::debug!(%killer, %victim, ?assists, "kill");
    world.emit(SimEvent::Killed {
        killer,
        victim,
        assists,
    });
    world.notify(killer, AgentEvent::Kill { victim });
    world.notify(victim, AgentEvent::WasKilled { killer });

    world.transition(victim, StateCommand::Die);
}

fn log_streak(
    world: &mut World,
    agent: AgentId,
    kind: StreakKind,
    check: StreakCheck,
    was: MentalState,
    is: MentalState,
) {
    world.emit(SimEvent::StreakCheck {
        agent,
        kind,
        rolled: matches!(check, StreakCheck::Rolled { .. }),
    });
    if was != is {
        tracing::debug!(%agent, from = %was, to = %is, "mental state changed");
        world.emit(SimEvent::MentalChanged { agent, state: is });
    }
}
