//! The simulation arena.
//!
//! [`World`] owns every agent together with its state machine and observer
//! bus, the per-team intel caches, the round state and the injected
//! [`SimContext`]. Agents refer to each other by [`AgentId`] only.
//!
//! A machine is moved out of the arena while one of its hooks runs, so the
//! hook can take `&mut World`. A transition aimed at that agent in the
//! meantime is queued and applied once the machine is back in place.

mod context;
mod tick;

use std::collections::VecDeque;
use std::mem;

use glam::Vec2;

pub use context::{SimContext, SpawnRegion};

use crate::agent::{Agent, AgentEvent, AgentId, AgentObserver, AgentSpec, EventBus, TeamId};
use crate::config::SimConfig;
use crate::dice::Dice;
use crate::error::{CoreError, CoreResult};
use crate::events::{LoggedEvent, SimEvent};
use crate::fsm::{ActiveState, StateCommand, StateKind, StateMachine};
use crate::grid::{Region, TileGrid};
use crate::intel::Intel;
use crate::pathfinding::Pathfinder;
use crate::round::{Objective, RoundOutcome, RoundState};
use crate::time::{SimClock, SimTime};
use crate::vision::VisionCone;
use crate::weapon::{Weapon, WeaponCatalogue};

#[derive(Debug)]
pub struct World {
    ctx: SimContext,
    config: SimConfig,
    clock: SimClock,
    round: RoundState,
    agents: Vec<Agent>,
    machines: Vec<Option<StateMachine>>,
    observers: Vec<EventBus>,
    intel: [Intel; 2],
    notifications: VecDeque<(AgentId, AgentEvent)>,
    deferred: Vec<(AgentId, StateCommand)>,
    log: Vec<LoggedEvent>,
}

impl World {
    pub fn new(ctx: SimContext, config: SimConfig, round: RoundState) -> Self {
        Self {
            ctx,
            config,
            clock: SimClock::new(),
            round,
            agents: Vec::new(),
            machines: Vec::new(),
            observers: Vec::new(),
            intel: [Intel::new(), Intel::new()],
            notifications: VecDeque::new(),
            deferred: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Creates an agent from a roster entry, converting its ranks to stats.
    pub fn add_agent(&mut self, spec: AgentSpec) -> CoreResult<AgentId> {
        if self.find(&spec.name).is_some() {
            return Err(CoreError::DuplicateName(spec.name));
        }
        let walkable = self
            .ctx
            .grid
            .cell_at(spec.position)
            .is_some_and(|cell| self.ctx.grid.is_walkable(cell));
        if !walkable {
            return Err(CoreError::UnwalkableSpawn {
                name: spec.name,
                x: spec.position.x,
                y: spec.position.y,
            });
        }
        let weapon = match &spec.weapon {
            Some(name) if !self.ctx.weapons.contains(name) => {
                return Err(CoreError::UnknownWeapon(name.clone()));
            }
            Some(name) => name.clone(),
            None => self.ctx.weapons.default_name().to_string(),
        };

        let id = AgentId(self.agents.len() as u32);
        let stats = self.config.ranks.stats(&spec.ranks);
        tracing::debug!(%id, name = %spec.name, team = %spec.team, ?stats, "agent created");
        self.agents.push(Agent::new(id, &spec, stats, weapon));
        self.machines.push(Some(StateMachine::standard()));
        self.observers.push(EventBus::new());
        Ok(id)
    }

    /// Replaces the state machine of an agent.
    pub fn set_machine(&mut self, id: AgentId, machine: StateMachine) -> CoreResult<()> {
        let slot = self
            .machines
            .get_mut(id.index())
            .ok_or(CoreError::UnknownAgent(id))?;
        *slot = Some(machine);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn find(&self, name: &str) -> Option<AgentId> {
        self.agents
            .iter()
            .find(|agent| agent.name == name)
            .map(|agent| agent.id)
    }

    pub fn members(&self, team: TeamId) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|agent| agent.team == team)
            .map(|agent| agent.id)
            .collect()
    }

    pub fn living(&self, team: TeamId) -> usize {
        self.agents
            .iter()
            .filter(|agent| agent.team == team && agent.is_alive())
            .count()
    }

    pub fn machine(&self, id: AgentId) -> Option<&StateMachine> {
        self.machines.get(id.index()).and_then(Option::as_ref)
    }

    pub fn state_of(&self, id: AgentId) -> Option<StateKind> {
        self.agent(id).map(|agent| agent.state)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Advances simulated time. Timers are polled on the next steps.
    pub fn advance(&mut self, delta_ms: u64) {
        self.clock.advance(delta_ms);
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn grid(&self) -> &dyn TileGrid {
        self.ctx.grid.as_ref()
    }

    pub fn weapons(&self) -> &WeaponCatalogue {
        &self.ctx.weapons
    }

    pub fn weapon_of(&self, id: AgentId) -> Option<&Weapon> {
        self.agent(id).map(|agent| self.ctx.weapons.resolve(&agent.weapon))
    }

    pub fn zones(&self) -> &[Region] {
        &self.ctx.zones
    }

    pub fn dice(&mut self) -> &mut dyn Dice {
        self.ctx.dice.as_mut()
    }

    pub fn intel(&self, team: TeamId) -> &Intel {
        &self.intel[team.index()]
    }

    pub(crate) fn agent_and_dice(&mut self, id: AgentId) -> Option<(&mut Agent, &mut dyn Dice, &SimConfig)> {
        let agent = self.agents.get_mut(id.index())?;
        Some((agent, self.ctx.dice.as_mut(), &self.config))
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn emit(&mut self, event: SimEvent) {
        tracing::trace!(at = %self.now(), ?event, "event");
        self.log.push(LoggedEvent { at: self.now(), event });
    }

    pub fn log(&self) -> &[LoggedEvent] {
        &self.log
    }

    pub fn drain_log(&mut self) -> Vec<LoggedEvent> {
        mem::take(&mut self.log)
    }

    /// Registers an observer on an agent's bus.
    pub fn subscribe(&mut self, id: AgentId, observer: impl AgentObserver + 'static) -> CoreResult<()> {
        self.observers
            .get_mut(id.index())
            .ok_or(CoreError::UnknownAgent(id))?
            .subscribe(observer);
        Ok(())
    }

    /// Queues a notification for an agent's observers.
    pub fn notify(&mut self, id: AgentId, event: AgentEvent) {
        self.notifications.push_back((id, event));
    }

    /// Delivers queued notifications in FIFO order, including any queued by
    /// the observers themselves.
    pub fn flush_notifications(&mut self) {
        while let Some((id, event)) = self.notifications.pop_front() {
            let index = id.index();
            let Some(slot) = self.observers.get_mut(index) else {
                continue;
            };
            let mut bus = mem::take(slot);
            bus.dispatch(id, &event, self);
            let late = mem::replace(&mut self.observers[index], bus);
            self.observers[index].absorb(late);
        }
    }

    // ------------------------------------------------------------------------
    // State machine driving
    // ------------------------------------------------------------------------

    /// Requests a transition for an agent.
    pub fn transition(&mut self, id: AgentId, command: StateCommand) {
        let index = id.index();
        match self.machines.get_mut(index).map(Option::take) {
            Some(Some(mut machine)) => {
                machine.transition(id, self, command);
                self.machines[index] = Some(machine);
                self.apply_deferred(id);
            }
            Some(None) => self.deferred.push((id, command)),
            None => tracing::warn!(%id, ?command, "transition for unknown agent"),
        }
    }

    /// Requests a transition by state name; unknown names are ignored.
    pub fn transition_named(&mut self, id: AgentId, name: &str) {
        let index = id.index();
        if let Some(Some(mut machine)) = self.machines.get_mut(index).map(Option::take) {
            machine.transition_named(id, self, name);
            self.machines[index] = Some(machine);
            self.apply_deferred(id);
        }
    }

    fn step_machine(&mut self, id: AgentId) {
        let index = id.index();
        if let Some(Some(mut machine)) = self.machines.get_mut(index).map(Option::take) {
            machine.step(id, self);
            self.machines[index] = Some(machine);
            self.apply_deferred(id);
        }
    }

    fn apply_deferred(&mut self, id: AgentId) {
        while let Some(position) = self.deferred.iter().position(|(target, _)| *target == id) {
            let (_, command) = self.deferred.remove(position);
            self.transition(id, command);
        }
    }

    // ------------------------------------------------------------------------
    // Spatial queries
    // ------------------------------------------------------------------------

    /// Waypoints from the agent's cell to `target`, as world positions.
    ///
    /// The final waypoint is `target` itself. `None` when no path exists.
    pub fn plan_path(&self, id: AgentId, target: Vec2) -> Option<Vec<Vec2>> {
        let agent = self.agent(id)?;
        let grid = self.grid();
        let start = grid.cell_at(agent.position)?;
        let end = grid.cell_at(target)?;
        let cells = Pathfinder::new(grid, self.config.movement.metric).find_path(start, end)?;

        let mut waypoints: Vec<Vec2> = cells.into_iter().map(|cell| grid.center_of(cell)).collect();
        match waypoints.last_mut() {
            Some(last) => *last = target,
            None if agent.position.distance(target) >= self.config.movement.arrival_radius => {
                waypoints.push(target)
            }
            None => {}
        }
        Some(waypoints)
    }

    pub fn vision_cone(&self, id: AgentId) -> Option<VisionCone> {
        let agent = self.agent(id)?;
        let combat = &self.config.combat;
        Some(VisionCone::new(
            agent.position,
            agent.facing,
            combat.vision_cone_deg.to_radians(),
            combat.vision_range,
        ))
    }

    /// Active hostiles inside the agent's cone with a clear line, nearest first.
    pub fn visible_enemies(&self, id: AgentId) -> Vec<AgentId> {
        let (Some(agent), Some(cone)) = (self.agent(id), self.vision_cone(id)) else {
            return Vec::new();
        };
        if !agent.is_active() {
            return Vec::new();
        }
        let candidates: Vec<(AgentId, Vec2)> = self
            .agents
            .iter()
            .filter(|other| other.is_hostile_to(agent) && other.is_active())
            .map(|other| (other.id, other.position))
            .collect();

        let mut visible = self.ctx.vision.visible(self.grid(), &cone, &candidates);
        visible.sort_by(|a, b| {
            let da = self.distance_between(id, *a).unwrap_or(f32::MAX);
            let db = self.distance_between(id, *b).unwrap_or(f32::MAX);
            da.total_cmp(&db)
        });
        visible
    }

    pub fn nearest_visible_enemy(&self, id: AgentId) -> Option<AgentId> {
        self.visible_enemies(id).first().copied()
    }

    /// Whether `shooter` can keep engaging `target`: the target is an active
    /// hostile within vision range and the line between them is clear.
    pub fn can_engage(&self, shooter: AgentId, target: AgentId) -> bool {
        let (Some(from), Some(to)) = (self.agent(shooter), self.agent(target)) else {
            return false;
        };
        from.is_active()
            && to.is_active()
            && from.is_hostile_to(to)
            && from.position.distance(to.position) <= self.config.combat.vision_range
            && self.ctx.vision.line_of_sight(self.grid(), from.position, to.position)
    }

    /// Whether any agent other than `except` is in Shoot against `target`.
    pub fn is_targeted(&self, target: AgentId, except: AgentId) -> bool {
        self.machines.iter().enumerate().any(|(index, machine)| {
            index != except.index()
                && matches!(
                    machine.as_ref().and_then(|machine| machine.current()),
                    Some(ActiveState::Shoot(shoot)) if shoot.target() == Some(target)
                )
        })
    }

    pub fn cast_ray(&self, origin: Vec2, angle: f32, range: f32) -> Vec2 {
        self.ctx.vision.cast(self.grid(), origin, angle, range)
    }

    fn distance_between(&self, a: AgentId, b: AgentId) -> Option<f32> {
        Some(self.agent(a)?.position.distance(self.agent(b)?.position))
    }

    /// Updates `team`'s intel on `enemy` without direct sight.
    pub fn reveal(&mut self, team: TeamId, enemy: AgentId) {
        let now = self.now();
        if let Some(agent) = self.agents.get(enemy.index()) {
            self.intel[team.index()].observe(agent, false, now);
        }
    }

    /// A random walkable cell center in a free spawn region of the agent's
    /// team, falling back to the agent's home position.
    pub fn spawn_point(&mut self, id: AgentId) -> Option<Vec2> {
        let agent = self.agent(id)?;
        let (team, home) = (agent.team, agent.home);
        let grid = self.ctx.grid.as_ref();

        let occupied: Vec<Vec2> = self
            .agents
            .iter()
            .filter(|other| other.id != id && other.is_active())
            .map(|other| other.position)
            .collect();
        let own: Vec<&Region> = self
            .ctx
            .spawns
            .iter()
            .filter(|spawn| spawn.team == team)
            .map(|spawn| &spawn.region)
            .collect();
        let free: Vec<&Region> = own
            .iter()
            .copied()
            .filter(|region| !occupied.iter().any(|point| region.contains_point(grid, *point)))
            .collect();
        let candidates = if free.is_empty() { own } else { free };
        if candidates.is_empty() {
            return Some(home);
        }

        let region = candidates[self.ctx.dice.index(candidates.len())];
        let cells: Vec<_> = region.walkable_cells(grid).collect();
        if cells.is_empty() {
            tracing::warn!(region = %region.name, "spawn region has no walkable cell");
            return Some(home);
        }
        let cell = cells[self.ctx.dice.index(cells.len())];
        Some(grid.center_of(cell))
    }

    // ------------------------------------------------------------------------
    // Objective
    // ------------------------------------------------------------------------

    pub fn can_plant(&self, id: AgentId, site: &str) -> bool {
        self.agent(id).is_some_and(|agent| {
            agent.is_active()
                && agent.team == self.round.attacking
                && self.round.carrier() == Some(id)
                && self.round.site(site).is_some()
        })
    }

    pub fn can_defuse(&self, id: AgentId, site: &str) -> bool {
        self.agent(id).is_some_and(|agent| {
            agent.is_active()
                && agent.team == self.round.defending()
                && self.round.planted().is_some_and(|(planted, _)| planted == site)
        })
    }

    pub fn plant_objective(&mut self, id: AgentId, site: &str) -> bool {
        let now = self.now();
        if !self.round.plant(id, site, now) {
            return false;
        }
        let reward = self.config.rewards.plant;
        let cap = self.config.rewards.max_credits;
        if let Some(agent) = self.agent_mut(id) {
            agent.earn(reward, cap);
        }
        tracing::info!(agent = %id, site, "objective planted");
        self.emit(SimEvent::ObjectivePlanted {
            agent: id,
            site: site.to_string(),
        });
        true
    }

    pub fn defuse_objective(&mut self, id: AgentId) -> bool {
        let Some(outcome) = self.round.defuse() else {
            return false;
        };
        let reward = self.config.rewards.defuse;
        let cap = self.config.rewards.max_credits;
        if let Some(agent) = self.agent_mut(id) {
            agent.earn(reward, cap);
        }
        tracing::info!(agent = %id, "objective defused");
        self.emit(SimEvent::ObjectiveDefused { agent: id });
        self.emit(SimEvent::RoundEnded { outcome });
        true
    }

    /// Drops the objective at the agent's position if it carries it.
    pub fn drop_objective(&mut self, id: AgentId) {
        let Some(at) = self.agent(id).map(|agent| agent.position) else {
            return;
        };
        if self.round.drop_objective(id, at) {
            tracing::debug!(agent = %id, ?at, "objective dropped");
            self.emit(SimEvent::ObjectiveDropped { agent: id, at });
        }
    }

    /// Detonates a planted objective whose timer ran out.
    pub fn poll_objective(&mut self) -> Option<RoundOutcome> {
        let now = self.now();
        let outcome = self.round.poll_detonation(now, self.config.round.detonation_ms)?;
        tracing::info!(winner = %outcome.winner, "objective detonated");
        self.emit(SimEvent::ObjectiveDetonated);
        self.emit(SimEvent::RoundEnded { outcome });
        Some(outcome)
    }

    /// Ends the round for a reason decided outside the world (elimination,
    /// time limit).
    pub fn end_round(&mut self, outcome: RoundOutcome) {
        self.round.finish(outcome.winner, outcome.reason);
        tracing::info!(winner = %outcome.winner, reason = %outcome.reason, "round ended");
        self.emit(SimEvent::RoundEnded { outcome });
    }

    /// Resets every agent at its spawn and starts the next round.
    ///
    /// The objective starts with `carrier`, or on the ground at the first
    /// attacking spawn when there is none.
    pub fn restart_round(&mut self, number: u32, attacking: TeamId, carrier: Option<AgentId>) {
        let now = self.now();
        let objective = match carrier {
            Some(agent) => Objective::Carried(agent),
            None => {
                let origin = self
                    .ctx
                    .spawns_of(attacking)
                    .next()
                    .map_or(Vec2::ZERO, |region| region.center(self.ctx.grid.as_ref()));
                Objective::Dropped(origin)
            }
        };
        self.round.restart(number, attacking, objective, now);
        self.notifications.clear();
        self.deferred.clear();
        for intel in &mut self.intel {
            intel.clear();
        }

        for index in 0..self.agents.len() {
            let id = AgentId(index as u32);
            let position = self.spawn_point(id).unwrap_or(self.agents[index].home);
            let agent = &mut self.agents[index];
            agent.reset_life(position);
            agent.last_healed_at = now;
            self.transition(id, StateCommand::Idle);
        }
        tracing::info!(number, %attacking, "round started");
    }
}
