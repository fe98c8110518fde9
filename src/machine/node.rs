//! State nodes and the handles that address them.

use super::transition::Transition;
use crate::core::{SignalQueue, TransitionKind};
use std::fmt;

/// Handle to a state owned by a [`crate::machine::Machine`].
///
/// Handles are cheap to copy and are only meaningful for the machine that
/// issued them; passing one to a different machine panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId {
    pub(crate) machine: u64,
    pub(crate) index: usize,
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

pub(crate) type Hook = Box<dyn FnMut()>;
pub(crate) type UpdateHook = Box<dyn FnMut(f32)>;

/// Lifecycle callbacks of a single state. All default to no-ops.
pub(crate) struct Callbacks {
    pub(crate) on_enter: Hook,
    pub(crate) on_update: UpdateHook,
    pub(crate) on_fixed_update: Hook,
    pub(crate) on_exit: Hook,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            on_enter: Box::new(|| {}),
            on_update: Box::new(|_| {}),
            on_fixed_update: Box::new(|| {}),
            on_exit: Box::new(|| {}),
        }
    }
}

/// One node of the state tree.
///
/// `active` and `starting` are lookups into the owning machine's arena,
/// never ownership claims.
pub(crate) struct StateNode {
    pub(crate) name: String,
    pub(crate) active: Option<StateId>,
    pub(crate) starting: Option<StateId>,
    /// Outgoing transitions in evaluation order, at most one per target.
    pub(crate) transitions: Vec<Transition>,
    pub(crate) signals: SignalQueue,
    pub(crate) callbacks: Callbacks,
}

impl StateNode {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            active: None,
            starting: None,
            transitions: Vec::new(),
            signals: SignalQueue::new(),
            callbacks: Callbacks::default(),
        }
    }

    pub(crate) fn transition_index(&self, target: StateId) -> Option<usize> {
        self.transitions.iter().position(|t| t.target == target)
    }

    /// Insert `transition`, replacing any previous one to the same target.
    ///
    /// Returns the index of the inserted transition and whether an older
    /// definition was dropped.
    pub(crate) fn define(&mut self, transition: Transition) -> (usize, bool) {
        let replaced = match self.transition_index(transition.target) {
            Some(index) => {
                self.transitions.remove(index);
                true
            }
            None => false,
        };
        self.transitions.push(transition);
        (self.transitions.len() - 1, replaced)
    }

    pub(crate) fn update_transitions(&mut self, delta_time: f32) {
        for transition in &mut self.transitions {
            transition.update(delta_time);
        }
    }

    pub(crate) fn reset_transitions(&mut self) {
        for transition in &mut self.transitions {
            transition.reset();
        }
    }

    /// Index of the first transition of `kind` whose guard passes.
    ///
    /// `skip_target` excludes transitions to that state without evaluating
    /// their guard, so their signal clauses consume nothing.
    pub(crate) fn first_passing(
        &self,
        kind: TransitionKind,
        skip_target: Option<StateId>,
        signals: &mut SignalQueue,
    ) -> Option<usize> {
        self.transitions.iter().position(|t| {
            t.kind == kind && Some(t.target) != skip_target && t.check(signals)
        })
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("starting", &self.starting)
            .field("transitions", &self.transitions)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}
