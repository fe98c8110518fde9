//! Guarded edges between states.

use super::node::StateId;
use crate::core::{Guard, GuardContext, SignalQueue, Timer, TransitionKind};
use std::fmt;

/// Side effect run when a transition fires.
pub type TransitionAction = Box<dyn FnMut()>;

/// A guarded edge from `source` to `target`, owned by `source`.
///
/// The guard is evaluated by whichever node is checking the transition,
/// against that node's signal queue. The tick counter and optional timer
/// advance once per update of the owning node and are rearmed whenever the
/// owner is entered.
pub struct Transition {
    pub(crate) source: StateId,
    pub(crate) target: StateId,
    pub(crate) kind: TransitionKind,
    pub(crate) guard: Guard,
    pub(crate) timer: Option<Timer>,
    pub(crate) ticks: u32,
    pub(crate) action: Option<TransitionAction>,
}

impl Transition {
    /// Create a transition that never fires until a guard is configured.
    pub(crate) fn new(source: StateId, target: StateId, kind: TransitionKind) -> Self {
        Self {
            source,
            target,
            kind,
            guard: Guard::never(),
            timer: None,
            ticks: 0,
            action: None,
        }
    }

    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Ticks counted since the owning state was last entered.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    /// Advance the timer and tick counter by one tick.
    pub(crate) fn update(&mut self, delta_time: f32) {
        if let Some(timer) = &mut self.timer {
            timer.update(delta_time);
        }
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn reset(&mut self) {
        if let Some(timer) = &mut self.timer {
            timer.reset();
        }
        self.ticks = 0;
    }

    /// Evaluate the guard, possibly consuming signals from `signals`.
    pub(crate) fn check(&self, signals: &mut SignalQueue) -> bool {
        let timer_complete = self.timer.as_ref().is_some_and(Timer::is_complete);
        let mut ctx = GuardContext::new(signals, self.ticks, timer_complete);
        self.guard.check(&mut ctx)
    }

    pub(crate) fn run_action(&mut self) {
        if let Some(action) = &mut self.action {
            action();
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("timer", &self.timer)
            .field("ticks", &self.ticks)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
