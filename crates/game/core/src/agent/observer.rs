//! Typed per-agent observer bus.
//!
//! Observers are invoked in registration order. An observer registered while
//! the bus is dispatching is appended after the current dispatch completes.

use super::AgentId;
use crate::world::World;

/// Notification delivered to the observers of one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    /// An enemy entered the agent's vision cone with a clear line of sight.
    DetectedEnemy { enemy: AgentId },
    /// The agent was credited with killing `victim`.
    Kill { victim: AgentId },
    /// The agent was killed by `killer`.
    WasKilled { killer: AgentId },
}

pub trait AgentObserver {
    fn on_event(&mut self, agent: AgentId, event: &AgentEvent, world: &mut World);
}

impl<F> AgentObserver for F
where
    F: FnMut(AgentId, &AgentEvent, &mut World),
{
    fn on_event(&mut self, agent: AgentId, event: &AgentEvent, world: &mut World) {
        self(agent, event, world)
    }
}

#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn AgentObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl AgentObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn dispatch(&mut self, agent: AgentId, event: &AgentEvent, world: &mut World) {
        for observer in &mut self.observers {
            observer.on_event(agent, event, world);
        }
    }

    pub(crate) fn absorb(&mut self, late: EventBus) {
        self.observers.extend(late.observers);
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
