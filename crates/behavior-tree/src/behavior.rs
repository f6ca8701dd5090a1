//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access simulation state and make decisions.

use crate::{Status, Trace};

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C> {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes can read
    ///   world state and modify it (e.g., to store intermediate results).
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs more ticks
    fn tick(&mut self, ctx: &mut C) -> Status;

    /// Human-readable node label used by [`Trace`].
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Evaluate this node while recording it into `trace`.
    ///
    /// Leaves get a correct default; composites override it so that their
    /// children are recorded one level deeper.
    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        let status = self.tick(ctx);
        trace.record(self.name(), status);
        status
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        (**self).tick_traced(ctx, trace)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = core::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
