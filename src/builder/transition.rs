//! Fluent handle for configuring a transition's guard and action.

use crate::core::{Guard, Timer, TransitionKind};
use crate::machine::{StateId, Transition, TransitionAction};

/// Builder for configuring a transition with a fluent API.
///
/// Returned by [`crate::machine::Machine::change_to`],
/// [`crate::machine::Machine::change_to_sub_state`] and the lookup methods.
/// Every method returns the builder so calls can be chained; the transition
/// is updated in place and stays in the machine when the builder is dropped.
///
/// Guard setters without a prefix (`when`, `if_signal_caught`, `after`, ...)
/// replace the whole guard. `and_*` / `or_*` variants compose onto it.
pub struct TransitionBuilder<'m> {
    transition: &'m mut Transition,
}

impl<'m> TransitionBuilder<'m> {
    pub(crate) fn new(transition: &'m mut Transition) -> Self {
        Self { transition }
    }

    fn replace_guard(self, guard: Guard) -> Self {
        self.transition.guard = guard;
        self
    }

    fn and_guard(self, guard: Guard) -> Self {
        let current = std::mem::take(&mut self.transition.guard);
        self.transition.guard = current.and(guard);
        self
    }

    fn or_guard(self, guard: Guard) -> Self {
        let current = std::mem::take(&mut self.transition.guard);
        self.transition.guard = current.or(guard);
        self
    }

    fn arm_timer(&mut self, duration: f32) {
        self.transition.timer = Some(Timer::new(duration));
    }

    /// Replace the guard with a client predicate.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.replace_guard(Guard::from_fn(predicate))
    }

    pub fn and_when<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.and_guard(Guard::from_fn(predicate))
    }

    pub fn or_when<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.or_guard(Guard::from_fn(predicate))
    }

    /// Replace the guard with a pre-built [`Guard`].
    pub fn guard(self, guard: Guard) -> Self {
        self.replace_guard(guard)
    }

    /// Replace the guard with a signal clause. A passing evaluation consumes
    /// one instance of `signal` from the evaluating node's queue.
    pub fn if_signal_caught(self, signal: impl Into<String>) -> Self {
        self.replace_guard(Guard::signal(signal))
    }

    pub fn and_if_signal_caught(self, signal: impl Into<String>) -> Self {
        self.and_guard(Guard::signal(signal))
    }

    pub fn or_if_signal_caught(self, signal: impl Into<String>) -> Self {
        self.or_guard(Guard::signal(signal))
    }

    /// Attach a fresh timer of `duration` and make its completion the whole
    /// guard.
    pub fn after(mut self, duration: f32) -> Self {
        self.arm_timer(duration);
        self.replace_guard(Guard::timer_complete())
    }

    /// Attach a fresh timer of `duration` and AND its completion onto the
    /// guard. A transition holds a single timer, so earlier timer clauses
    /// observe the new one.
    pub fn and_after(mut self, duration: f32) -> Self {
        self.arm_timer(duration);
        self.and_guard(Guard::timer_complete())
    }

    pub fn or_after(mut self, duration: f32) -> Self {
        self.arm_timer(duration);
        self.or_guard(Guard::timer_complete())
    }

    /// Replace the guard with a clause that passes only when exactly one tick
    /// has been counted.
    pub fn after_one_frame(self) -> Self {
        self.after_n_frames(1)
    }

    /// Replace the guard with a clause that passes only when the tick counter
    /// equals `n`. If that evaluation is missed the clause stays false until
    /// the owning state is re-entered.
    pub fn after_n_frames(self, n: u32) -> Self {
        self.replace_guard(Guard::exact_ticks(n))
    }

    pub fn and_after_n_frames(self, n: u32) -> Self {
        self.and_guard(Guard::exact_ticks(n))
    }

    pub fn or_after_n_frames(self, n: u32) -> Self {
        self.or_guard(Guard::exact_ticks(n))
    }

    /// Disable the transition without removing it from its source.
    pub fn replace_condition(self) -> Self {
        self.replace_guard(Guard::never())
    }

    /// Set the fire-time action, replacing any previous one.
    pub fn then_do<F>(self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.transition.action = Some(Box::new(action));
        self
    }

    /// Append an action that runs after the existing one.
    pub fn also_do<F>(self, mut action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let combined: TransitionAction = match self.transition.action.take() {
            Some(mut existing) => Box::new(move || {
                existing();
                action();
            }),
            None => Box::new(action),
        };
        self.transition.action = Some(combined);
        self
    }

    /// Alias of [`TransitionBuilder::then_do`].
    pub fn instead_do<F>(self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.then_do(action)
    }

    pub fn source(&self) -> StateId {
        self.transition.source()
    }

    pub fn target(&self) -> StateId {
        self.transition.target()
    }

    pub fn kind(&self) -> TransitionKind {
        self.transition.kind()
    }

    pub fn ticks(&self) -> u32 {
        self.transition.ticks()
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.transition.timer()
    }
}
