//! Guard predicates for controlling state transitions.
//!
//! A guard is a composed boolean predicate evaluated against a
//! [`GuardContext`]: the evaluating node's live signal queue plus the owning
//! transition's tick counter and timer state. Guards are combined with
//! [`Guard::and`] and [`Guard::or`], which short-circuit left to right.
//!
//! Evaluation is allowed to mutate the signal queue: a signal clause removes
//! the instance it matches, so one signal satisfies at most one guard.

use super::signal::SignalQueue;
use std::fmt;

type Predicate = Box<dyn Fn(&mut GuardContext<'_>) -> bool>;

/// Everything a guard may observe while it is evaluated.
pub struct GuardContext<'a> {
    /// Signals pending on the node performing the evaluation.
    pub signals: &'a mut SignalQueue,
    /// Ticks elapsed since the owning transition was last reset.
    pub ticks: u32,
    /// Whether the owning transition's timer has completed. `false` when the
    /// transition carries no timer.
    pub timer_complete: bool,
}

impl<'a> GuardContext<'a> {
    pub fn new(signals: &'a mut SignalQueue, ticks: u32, timer_complete: bool) -> Self {
        Self {
            signals,
            ticks,
            timer_complete,
        }
    }
}

/// Composable predicate that determines if a transition can fire.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Guard, GuardContext, SignalQueue};
///
/// let guard = Guard::from_fn(|| true).and(Guard::signal("jump"));
///
/// let mut signals = SignalQueue::new();
/// signals.push("jump");
///
/// let mut ctx = GuardContext::new(&mut signals, 0, false);
/// assert!(guard.check(&mut ctx));
///
/// // The matching signal was consumed by the evaluation above
/// let mut ctx = GuardContext::new(&mut signals, 0, false);
/// assert!(!guard.check(&mut ctx));
/// ```
pub struct Guard {
    predicate: Predicate,
}

impl Guard {
    /// Create a guard from a predicate over the evaluation context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut GuardContext<'_>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Create a guard from a client predicate that ignores the context.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::new(move |_| predicate())
    }

    /// A guard that never passes. This is the default for new transitions.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Passes when `signal` is pending, consuming one instance of it.
    pub fn signal(signal: impl Into<String>) -> Self {
        let signal = signal.into();
        Self::new(move |ctx| ctx.signals.take(&signal))
    }

    /// Passes once the owning transition's timer has completed.
    pub fn timer_complete() -> Self {
        Self::new(|ctx| ctx.timer_complete)
    }

    /// Passes only on the evaluation where the tick counter equals `n`.
    pub fn exact_ticks(n: u32) -> Self {
        Self::new(move |ctx| ctx.ticks == n)
    }

    /// Logical AND; `other` is not evaluated when `self` fails.
    pub fn and(self, other: Guard) -> Guard {
        Self::new(move |ctx| self.check(ctx) && other.check(ctx))
    }

    /// Logical OR; `other` is not evaluated when `self` passes.
    pub fn or(self, other: Guard) -> Guard {
        Self::new(move |ctx| self.check(ctx) || other.check(ctx))
    }

    /// Evaluate the guard. May consume signals from `ctx`.
    pub fn check(&self, ctx: &mut GuardContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::never()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn eval(guard: &Guard, signals: &mut SignalQueue, ticks: u32, timer_complete: bool) -> bool {
        let mut ctx = GuardContext::new(signals, ticks, timer_complete);
        guard.check(&mut ctx)
    }

    #[test]
    fn never_guard_blocks() {
        let mut signals = SignalQueue::new();
        assert!(!eval(&Guard::never(), &mut signals, 0, true));
        assert!(!eval(&Guard::default(), &mut signals, 0, true));
    }

    #[test]
    fn from_fn_reads_client_state() {
        let flag = Rc::new(Cell::new(false));
        let guard = Guard::from_fn({
            let flag = Rc::clone(&flag);
            move || flag.get()
        });
        let mut signals = SignalQueue::new();

        assert!(!eval(&guard, &mut signals, 0, false));
        flag.set(true);
        assert!(eval(&guard, &mut signals, 0, false));
    }

    #[test]
    fn signal_guard_consumes_matching_signal() {
        let guard = Guard::signal("go");
        let mut signals = SignalQueue::new();
        signals.push("go");
        signals.push("other");

        assert!(eval(&guard, &mut signals, 0, false));
        assert!(!signals.contains("go"));
        assert!(signals.contains("other"));
        assert!(!eval(&guard, &mut signals, 0, false));
    }

    #[test]
    fn exact_ticks_matches_only_equal_count() {
        let guard = Guard::exact_ticks(3);
        let mut signals = SignalQueue::new();

        assert!(!eval(&guard, &mut signals, 2, false));
        assert!(eval(&guard, &mut signals, 3, false));
        assert!(!eval(&guard, &mut signals, 4, false));
    }

    #[test]
    fn timer_guard_follows_context_flag() {
        let guard = Guard::timer_complete();
        let mut signals = SignalQueue::new();

        assert!(!eval(&guard, &mut signals, 0, false));
        assert!(eval(&guard, &mut signals, 0, true));
    }

    #[test]
    fn and_short_circuits_before_consuming_signal() {
        let guard = Guard::from_fn(|| false).and(Guard::signal("go"));
        let mut signals = SignalQueue::new();
        signals.push("go");

        assert!(!eval(&guard, &mut signals, 0, false));
        assert!(signals.contains("go"));
    }

    #[test]
    fn and_consumes_signal_even_when_later_clause_fails() {
        let guard = Guard::signal("go").and(Guard::from_fn(|| false));
        let mut signals = SignalQueue::new();
        signals.push("go");

        assert!(!eval(&guard, &mut signals, 0, false));
        assert!(signals.is_empty());
    }

    #[test]
    fn or_short_circuits_after_success() {
        let guard = Guard::from_fn(|| true).or(Guard::signal("go"));
        let mut signals = SignalQueue::new();
        signals.push("go");

        assert!(eval(&guard, &mut signals, 0, false));
        assert!(signals.contains("go"));
    }

    #[test]
    fn or_falls_through_to_second_clause() {
        let guard = Guard::from_fn(|| false).or(Guard::signal("go"));
        let mut signals = SignalQueue::new();
        signals.push("go");

        assert!(eval(&guard, &mut signals, 0, false));
        assert!(signals.is_empty());
    }
}
