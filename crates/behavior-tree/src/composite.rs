//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).

use crate::{Behavior, Status, Trace};

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops immediately**
///   and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    label: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            label: "Sequence",
            children,
        }
    }

    /// Replaces the trace label of this node.
    pub fn named(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        // Execute children in order until one does not succeed
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other, // Short-circuit
            }
        }
        Status::Success
    }

    fn name(&self) -> &str {
        self.label
    }

    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        let slot = trace.open(self.label);
        let mut status = Status::Success;
        for child in &mut self.children {
            status = child.tick_traced(ctx, trace);
            if !status.is_success() {
                break;
            }
        }
        trace.close(slot, status);
        status
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops immediately**
///   and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    label: &'static str,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            label: "Selector",
            children,
        }
    }

    /// Replaces the trace label of this node.
    pub fn named(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        // Try children in order until one does not fail
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other, // Short-circuit
            }
        }
        Status::Failure
    }

    fn name(&self) -> &str {
        self.label
    }

    fn tick_traced(&mut self, ctx: &mut C, trace: &mut Trace) -> Status {
        let slot = trace.open(self.label);
        let mut status = Status::Failure;
        for child in &mut self.children {
            status = child.tick_traced(ctx, trace);
            if !status.is_failure() {
                break;
            }
        }
        trace.close(slot, status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestContext {
        value: i32,
        calls: Vec<&'static str>,
    }

    struct Fixed(&'static str, Status);
    impl Behavior<TestContext> for Fixed {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.calls.push(self.0);
            self.1
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    /// Succeeds only after being ticked `remaining` times.
    struct Countdown {
        remaining: u32,
    }
    impl Behavior<TestContext> for Countdown {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            if self.remaining == 0 {
                return Status::Success;
            }
            self.remaining -= 1;
            Status::Running
        }
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = Sequence::new(vec![Box::new(Increment), Box::new(Increment)]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let mut seq = Sequence::new(vec![
            Box::new(Fixed("a", Status::Success)),
            Box::new(Fixed("b", Status::Failure)),
            Box::new(Fixed("c", Status::Success)), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec!["a", "b"]);
    }

    #[test]
    fn sequence_returns_running_without_ticking_later_children() {
        let mut seq = Sequence::new(vec![
            Box::new(Countdown { remaining: 2 }),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 0);
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let mut sel = Selector::new(vec![
            Box::new(Fixed("a", Status::Failure)),
            Box::new(Fixed("b", Status::Success)),
            Box::new(Fixed("c", Status::Success)), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, vec!["a", "b"]);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut sel = Selector::new(vec![
            Box::new(Fixed("a", Status::Failure)),
            Box::new(Fixed("b", Status::Failure)),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, vec!["a", "b"]);
    }

    #[test]
    fn selector_stops_at_running() {
        let mut sel = Selector::new(vec![
            Box::new(Fixed("a", Status::Running)),
            Box::new(Fixed("b", Status::Success)),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.calls, vec!["a"]);
    }

    #[test]
    fn traced_tick_records_visited_nodes_in_order() {
        let mut root = Selector::new(vec![
            Box::new(
                Sequence::new(vec![
                    Box::new(Fixed("cond", Status::Failure)),
                    Box::new(Fixed("act", Status::Success)),
                ])
                .named("branch"),
            ),
            Box::new(Fixed("fallback", Status::Success)),
        ])
        .named("root");

        let mut ctx = TestContext::default();
        let mut trace = Trace::new();
        assert_eq!(root.tick_traced(&mut ctx, &mut trace), Status::Success);

        let names: Vec<_> = trace.entries().iter().map(|e| (e.depth, e.name.as_str())).collect();
        assert_eq!(
            names,
            vec![(0, "root"), (1, "branch"), (2, "cond"), (1, "fallback")]
        );
        assert_eq!(trace.visits("act"), 0);
        assert_eq!(trace.entries()[0].status, Some(Status::Success));
        assert_eq!(trace.entries()[1].status, Some(Status::Failure));
    }
}
