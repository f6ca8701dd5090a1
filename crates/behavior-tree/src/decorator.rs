//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic) and [`AlwaysSucceed`] (error suppression).

use crate::{Behavior, Status, Trace};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }

    fn name(&self) -> &str {
        "Inverter"
    }

    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        let slot = trace.open("Inverter");
        let status = self.child.tick_traced(ctx, trace).invert();
        trace.close(slot, status);
        status
    }
}

/// Returns `Success` whenever its child finishes, regardless of the outcome.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - If the child returns `Running`, returns `Running`
///
/// This is useful for:
/// - Optional behaviors that shouldn't cause a sequence to fail
/// - Logging/debugging nodes that observe state without affecting control flow
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }

    fn name(&self) -> &str {
        "AlwaysSucceed"
    }

    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        let slot = trace.open("AlwaysSucceed");
        let status = match self.child.tick_traced(ctx, trace) {
            Status::Running => Status::Running,
            _ => Status::Success,
        };
        trace.close(slot, status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    struct IsPositive;
    impl Behavior<TestContext> for IsPositive {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            Status::from(ctx.value > 0)
        }
    }

    struct FailAndIncrement;
    impl Behavior<TestContext> for FailAndIncrement {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Failure
        }
    }

    struct StillWorking;
    impl Behavior<TestContext> for StillWorking {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            Status::Running
        }
    }

    #[test]
    fn inverter_inverts_success() {
        let mut inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext { value: 10 };
        assert_eq!(inverter.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn inverter_inverts_failure() {
        let mut inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext { value: -10 };
        assert_eq!(inverter.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn inverter_keeps_running() {
        let mut inverter = Inverter::new(Box::new(StillWorking));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(inverter.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn always_succeed_on_failure() {
        let mut always = AlwaysSucceed::new(Box::new(FailAndIncrement));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1); // Child still executed
    }

    #[test]
    fn always_succeed_keeps_running() {
        let mut always = AlwaysSucceed::new(Box::new(StillWorking));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Status::Running);
    }
}
