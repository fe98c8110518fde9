//! Machine that owns the state tree and drives the active chain.

use super::node::{StateId, StateNode};
use super::transition::Transition;
use crate::builder::{BuildError, TransitionBuilder};
use crate::core::{SignalQueue, TransitionHistory, TransitionKind, TransitionRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

static NEXT_MACHINE_ID: AtomicU64 = AtomicU64::new(1);

/// Point-in-time view of a machine's active chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Names from the root down to the deepest active state
    pub path: Vec<String>,
    /// Number of `update` calls made so far
    pub tick: u64,
}

/// Hierarchical state machine.
///
/// The machine owns every state. The root is created with the machine;
/// further states are added with [`Machine::add_state`] and wired together
/// with [`Machine::start_at`], [`Machine::change_to`] and
/// [`Machine::change_to_sub_state`].
///
/// # Example
///
/// ```rust
/// use statecraft::Machine;
///
/// let mut machine = Machine::new("root");
/// let root = machine.root();
/// let idle = machine.add_state("idle");
/// let walk = machine.add_state("walk");
///
/// machine.start_at(root, idle);
/// machine.change_to(idle, walk).if_signal_caught("move");
/// machine.change_to(walk, idle).after(0.5);
///
/// machine.start();
/// assert_eq!(machine.path(), "root.idle");
///
/// machine.send_signal("move");
/// machine.update(0.1);
/// assert_eq!(machine.path(), "root.walk");
/// ```
pub struct Machine {
    id: u64,
    nodes: Vec<StateNode>,
    root: StateId,
    tick: u64,
    history: TransitionHistory,
}

impl Machine {
    /// Create a machine whose root state is named `root_name`.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_history(root_name, 0)
    }

    /// Create a machine that keeps the last `limit` fired transitions.
    pub fn with_history(root_name: impl Into<String>, limit: usize) -> Self {
        let id = NEXT_MACHINE_ID.fetch_add(1, Ordering::Relaxed);
        let mut machine = Self {
            id,
            nodes: Vec::new(),
            root: StateId {
                machine: id,
                index: 0,
            },
            tick: 0,
            history: TransitionHistory::with_limit(limit),
        };
        machine.root = machine.add_state(root_name);
        machine
    }

    pub fn root(&self) -> StateId {
        self.root
    }

    /// Add a detached state. It takes part in the tree once it is the target
    /// of a transition or the starting state of another state.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = StateId {
            machine: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(StateNode::new(name.into()));
        id
    }

    pub fn name(&self, state: StateId) -> &str {
        &self.node(state).name
    }

    /// Number of states, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a machine has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of `update` calls made so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    fn index(&self, state: StateId) -> usize {
        assert!(
            state.machine == self.id && state.index < self.nodes.len(),
            "state handle {state} was not issued by this machine"
        );
        state.index
    }

    fn node(&self, state: StateId) -> &StateNode {
        &self.nodes[self.index(state)]
    }

    fn node_mut(&mut self, state: StateId) -> &mut StateNode {
        let index = self.index(state);
        &mut self.nodes[index]
    }

    // Configuration

    /// Designate `child` as the state entered whenever `parent` is entered.
    ///
    /// The child is also selected as `parent`'s active state immediately, so
    /// it is observable before [`Machine::start`].
    pub fn start_at(&mut self, parent: StateId, child: StateId) -> &mut Self {
        self.index(child);
        assert_ne!(parent, child, "a state cannot start at itself");
        let node = self.node_mut(parent);
        node.starting = Some(child);
        node.active = Some(child);
        self
    }

    pub fn starting_state(&self, parent: StateId) -> Option<StateId> {
        self.node(parent).starting
    }

    /// Define an ordinary transition from `source` to its sibling `target`.
    ///
    /// The transition is evaluated by `source`'s parent while `source` is the
    /// parent's active child. Redefining a transition to the same target
    /// replaces the previous definition.
    pub fn change_to(&mut self, source: StateId, target: StateId) -> TransitionBuilder<'_> {
        self.define(source, target, TransitionKind::Ordinary)
    }

    /// Define an override transition from `owner` into its sub-state `target`.
    ///
    /// The owner evaluates it on every tick, whichever descendant is active,
    /// unless `target` is already the owner's active child.
    pub fn change_to_sub_state(
        &mut self,
        owner: StateId,
        target: StateId,
    ) -> TransitionBuilder<'_> {
        assert_ne!(owner, target, "a state cannot be its own sub-state");
        self.define(owner, target, TransitionKind::Override)
    }

    fn define(
        &mut self,
        source: StateId,
        target: StateId,
        kind: TransitionKind,
    ) -> TransitionBuilder<'_> {
        self.index(target);
        let node = self.node_mut(source);
        let (position, replaced) = node.define(Transition::new(source, target, kind));
        if replaced {
            debug!(source = %node.name, %target, %kind, "transition redefined");
        }
        TransitionBuilder::new(&mut node.transitions[position])
    }

    /// Look up the transition from `source` to `target` for reconfiguration.
    pub fn on_transition_to(
        &mut self,
        source: StateId,
        target: StateId,
    ) -> Result<TransitionBuilder<'_>, BuildError> {
        self.index(target);
        let Some(position) = self.node(source).transition_index(target) else {
            return Err(BuildError::UnknownTransition {
                from: self.name(source).to_string(),
                to: self.name(target).to_string(),
            });
        };
        Ok(TransitionBuilder::new(
            &mut self.node_mut(source).transitions[position],
        ))
    }

    /// Disable the transition from `source` to `target`, keeping it defined.
    pub fn replace_transition_condition(
        &mut self,
        source: StateId,
        target: StateId,
    ) -> Result<TransitionBuilder<'_>, BuildError> {
        Ok(self.on_transition_to(source, target)?.replace_condition())
    }

    /// Outgoing transitions of `source` in evaluation order.
    pub fn transitions(&self, source: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.node(source).transitions.iter()
    }

    pub fn on_enter<F>(&mut self, state: StateId, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.node_mut(state).callbacks.on_enter = Box::new(callback);
        self
    }

    pub fn on_update<F>(&mut self, state: StateId, callback: F) -> &mut Self
    where
        F: FnMut(f32) + 'static,
    {
        self.node_mut(state).callbacks.on_update = Box::new(callback);
        self
    }

    pub fn on_fixed_update<F>(&mut self, state: StateId, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.node_mut(state).callbacks.on_fixed_update = Box::new(callback);
        self
    }

    pub fn on_exit<F>(&mut self, state: StateId, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.node_mut(state).callbacks.on_exit = Box::new(callback);
        self
    }

    // Lifecycle

    /// Enter the root, cascading through starting states.
    pub fn start(&mut self) {
        debug!(root = %self.name(self.root), "starting machine");
        self.enter(self.root);
    }

    /// Re-enter the root from scratch.
    ///
    /// The current chain is not exited first; entry simply runs again.
    pub fn reset(&mut self) {
        debug!(root = %self.name(self.root), "resetting machine");
        self.enter(self.root);
    }

    /// Advance the machine by one simulation tick.
    pub fn update(&mut self, delta_time: f32) {
        self.tick += 1;
        self.update_state(self.root, delta_time);
    }

    /// Run one fixed-step tick. No transitions are evaluated.
    pub fn fixed_update(&mut self) {
        self.fixed_update_state(self.root);
    }

    /// Deliver `signal` to the root and every state on its active chain.
    pub fn send_signal(&mut self, signal: impl Into<String>) {
        self.send_signal_to(self.root, signal);
    }

    /// Deliver `signal` to `state` and every state on its active chain.
    pub fn send_signal_to(&mut self, state: StateId, signal: impl Into<String>) {
        let signal = signal.into();
        trace!(state = %self.name(state), %signal, "signal sent");
        let mut current = Some(state);
        while let Some(id) = current {
            let node = self.node_mut(id);
            node.signals.push(signal.clone());
            current = node.active;
        }
    }

    fn enter(&mut self, state: StateId) {
        let node = self.node_mut(state);
        trace!(state = %node.name, "enter");
        node.signals.clear();
        node.reset_transitions();
        (node.callbacks.on_enter)();
        let starting = node.starting;
        if let Some(starting) = starting {
            node.active = Some(starting);
            self.enter(starting);
        }
    }

    fn exit(&mut self, state: StateId) {
        let node = self.node_mut(state);
        trace!(state = %node.name, "exit");
        (node.callbacks.on_exit)();
        let active = node.active;
        if let Some(active) = active {
            self.exit(active);
        }
    }

    fn update_state(&mut self, state: StateId, delta_time: f32) {
        self.node_mut(state).update_transitions(delta_time);
        self.check_transitions(state);

        let node = self.node_mut(state);
        node.signals.clear();
        (node.callbacks.on_update)(delta_time);
        let active = node.active;
        if let Some(active) = active {
            self.update_state(active, delta_time);
        }
    }

    fn fixed_update_state(&mut self, state: StateId) {
        let node = self.node_mut(state);
        (node.callbacks.on_fixed_update)();
        let active = node.active;
        if let Some(active) = active {
            self.fixed_update_state(active);
        }
    }

    /// Fire at most one transition from `state`'s perspective.
    fn check_transitions(&mut self, state: StateId) {
        let mut signals = std::mem::take(&mut self.node_mut(state).signals);
        let selected = self.select_transition(state, &mut signals);
        self.node_mut(state).signals = signals;

        if let Some((source, position)) = selected {
            self.fire(state, source, position);
        }
    }

    /// Active child's ordinary transitions first, then the owner's overrides.
    fn select_transition(
        &self,
        owner: StateId,
        signals: &mut SignalQueue,
    ) -> Option<(StateId, usize)> {
        let active = self.node(owner).active;

        if let Some(child) = active {
            let ordinary = self
                .node(child)
                .first_passing(TransitionKind::Ordinary, None, signals);
            if let Some(position) = ordinary {
                return Some((child, position));
            }
        }

        self.node(owner)
            .first_passing(TransitionKind::Override, active, signals)
            .map(|position| (owner, position))
    }

    fn fire(&mut self, owner: StateId, source: StateId, position: usize) {
        let previous = self.node(owner).active;
        let transition = &self.node(source).transitions[position];
        let (target, kind) = (transition.target, transition.kind);
        assert_ne!(
            owner,
            target,
            "transition into '{}' would make it its own child",
            self.name(owner)
        );

        debug!(
            owner = %self.name(owner),
            from = previous.map(|p| self.name(p)),
            to = %self.name(target),
            %kind,
            "transition fired"
        );

        if let Some(previous) = previous {
            self.exit(previous);
        }
        self.node_mut(source).transitions[position].run_action();
        self.record(owner, previous, target, kind);
        self.node_mut(owner).active = Some(target);
        self.enter(target);
    }

    fn record(&mut self, owner: StateId, from: Option<StateId>, to: StateId, kind: TransitionKind) {
        if !self.history.is_enabled() {
            return;
        }
        let record = TransitionRecord {
            owner: self.name(owner).to_string(),
            from: from.map(|f| self.name(f).to_string()),
            to: self.name(to).to_string(),
            kind,
            tick: self.tick,
            at: Utc::now(),
        };
        self.history.record(record);
    }

    // Introspection

    /// Immediate active child of `state`.
    pub fn current_state(&self, state: StateId) -> Option<StateId> {
        self.node(state).active
    }

    /// Deepest active descendant of `state`, or `state` itself if it has no
    /// active child.
    pub fn current_state_recursive(&self, state: StateId) -> StateId {
        let mut current = state;
        while let Some(active) = self.node(current).active {
            current = active;
        }
        current
    }

    /// States from `state` down to its deepest active descendant.
    pub fn active_chain(&self, state: StateId) -> Vec<StateId> {
        let mut chain = vec![state];
        let mut current = state;
        while let Some(active) = self.node(current).active {
            chain.push(active);
            current = active;
        }
        chain
    }

    /// Dotted name path from `state` down its active chain, e.g. `"root.a.a1"`.
    pub fn current_state_path(&self, state: StateId) -> String {
        self.active_chain(state)
            .into_iter()
            .map(|id| self.name(id))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Dotted name path of the whole active chain.
    pub fn path(&self) -> String {
        self.current_state_path(self.root)
    }

    /// Whether `state` is on the root's active chain.
    pub fn is_active(&self, state: StateId) -> bool {
        self.index(state);
        self.active_chain(self.root).contains(&state)
    }

    /// Signals queued on `state` and not yet consumed or cleared.
    pub fn pending_signals(&self, state: StateId) -> &SignalQueue {
        &self.node(state).signals
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            path: self
                .active_chain(self.root)
                .into_iter()
                .map(|id| self.name(id).to_string())
                .collect(),
            tick: self.tick,
        }
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("root", &self.root)
            .field("tick", &self.tick)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn log_lifecycle(machine: &mut Machine, state: StateId, log: &Log) {
        let name = machine.name(state).to_string();
        let enter = (Rc::clone(log), name.clone());
        let exit = (Rc::clone(log), name);
        machine
            .on_enter(state, move || enter.0.borrow_mut().push(format!("enter:{}", enter.1)))
            .on_exit(state, move || exit.0.borrow_mut().push(format!("exit:{}", exit.1)));
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn start_enters_starting_chain_top_down() {
        let log: Log = Rc::default();
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let a1 = machine.add_state("a1");
        machine.start_at(root, a).start_at(a, a1);
        for state in [root, a, a1] {
            log_lifecycle(&mut machine, state, &log);
        }

        machine.start();

        assert_eq!(take(&log), vec!["enter:root", "enter:a", "enter:a1"]);
        assert_eq!(machine.path(), "root.a.a1");
        assert_eq!(machine.current_state(root), Some(a));
        assert_eq!(machine.current_state_recursive(root), a1);
        assert_eq!(machine.current_state_path(a), "a.a1");
    }

    #[test]
    fn start_at_selects_child_before_start() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");

        machine.start_at(root, a);

        assert_eq!(machine.current_state(root), Some(a));
        assert_eq!(machine.starting_state(root), Some(a));
    }

    #[test]
    fn leaf_has_no_current_state() {
        let mut machine = Machine::new("root");
        let leaf = machine.add_state("leaf");

        assert_eq!(machine.current_state(leaf), None);
        assert_eq!(machine.current_state_recursive(leaf), leaf);
        assert_eq!(machine.current_state_path(leaf), "leaf");
    }

    #[test]
    fn signal_is_consumed_by_first_matching_transition() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        let c = machine.add_state("c");
        machine.start_at(root, a);
        machine.change_to(a, b).if_signal_caught("go");
        machine.change_to(a, c).if_signal_caught("go");
        machine.start();

        machine.send_signal("go");
        machine.update(0.1);

        assert_eq!(machine.current_state(root), Some(b));
    }

    #[test]
    fn unconsumed_signals_are_cleared_by_update() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).if_signal_caught("go");
        machine.start();

        machine.send_signal("unused");
        assert!(machine.pending_signals(root).contains("unused"));
        assert!(machine.pending_signals(a).contains("unused"));
        machine.update(0.1);

        assert!(machine.pending_signals(root).is_empty());
        assert!(machine.pending_signals(a).is_empty());
        assert_eq!(machine.current_state(root), Some(a));
    }

    #[test]
    fn signal_reaches_only_the_active_chain() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.start();

        machine.send_signal("ping");

        assert!(machine.pending_signals(root).contains("ping"));
        assert!(machine.pending_signals(a).contains("ping"));
        assert!(machine.pending_signals(b).is_empty());
    }

    #[test]
    fn send_signal_to_skips_ancestors() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let a1 = machine.add_state("a1");
        machine.start_at(root, a).start_at(a, a1);
        machine.start();

        machine.send_signal_to(a, "local");

        assert!(machine.pending_signals(root).is_empty());
        assert!(machine.pending_signals(a).contains("local"));
        assert!(machine.pending_signals(a1).contains("local"));
    }

    #[test]
    fn ordinary_transition_wins_over_override_in_same_tick() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        let r = machine.add_state("r");
        machine.start_at(root, a);
        machine.change_to(a, b).when(|| true);
        machine.change_to_sub_state(root, r).when(|| true);
        machine.start();

        machine.update(0.1);
        assert_eq!(machine.current_state(root), Some(b));

        machine.update(0.1);
        assert_eq!(machine.current_state(root), Some(r));
    }

    #[test]
    fn override_is_skipped_while_target_is_active() {
        let evaluations = Rc::new(Cell::new(0));
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).if_signal_caught("go");
        machine.change_to_sub_state(root, a).when({
            let evaluations = Rc::clone(&evaluations);
            move || {
                evaluations.set(evaluations.get() + 1);
                true
            }
        });
        machine.start();

        machine.update(0.1);
        assert_eq!(evaluations.get(), 0);

        machine.send_signal("go");
        machine.update(0.1);
        assert_eq!(machine.current_state(root), Some(b));
        assert_eq!(evaluations.get(), 0);

        machine.update(0.1);
        assert_eq!(evaluations.get(), 1);
        assert_eq!(machine.current_state(root), Some(a));
    }

    #[test]
    fn firing_exits_then_acts_then_enters() {
        let log: Log = Rc::default();
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let a1 = machine.add_state("a1");
        let b = machine.add_state("b");
        machine.start_at(root, a).start_at(a, a1);
        for state in [a, a1, b] {
            log_lifecycle(&mut machine, state, &log);
        }
        machine.change_to(a, b).if_signal_caught("go").then_do({
            let log = Rc::clone(&log);
            move || log.borrow_mut().push("fire".to_string())
        });
        machine.start();
        take(&log);

        machine.send_signal("go");
        machine.update(0.1);

        assert_eq!(take(&log), vec!["exit:a", "exit:a1", "fire", "enter:b"]);
    }

    #[test]
    fn update_runs_callbacks_down_the_active_chain() {
        let log: Log = Rc::default();
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        machine.start_at(root, a);
        for state in [root, a] {
            let name = machine.name(state).to_string();
            let log = Rc::clone(&log);
            machine.on_update(state, move |dt| log.borrow_mut().push(format!("{name}:{dt}")));
        }
        machine.start();

        machine.update(0.5);

        assert_eq!(take(&log), vec!["root:0.5", "a:0.5"]);
        assert_eq!(machine.tick(), 1);
    }

    #[test]
    fn fixed_update_propagates_without_transitions() {
        let log: Log = Rc::default();
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).when(|| true);
        for state in [root, a] {
            let name = machine.name(state).to_string();
            let log = Rc::clone(&log);
            machine.on_fixed_update(state, move || log.borrow_mut().push(name.clone()));
        }
        machine.start();

        machine.fixed_update();

        assert_eq!(take(&log), vec!["root", "a"]);
        assert_eq!(machine.current_state(root), Some(a));
    }

    #[test]
    fn entering_a_state_rearms_its_timers() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).after(1.0);
        machine.change_to(b, a).if_signal_caught("back");
        machine.start();

        for _ in 0..3 {
            machine.update(0.5);
        }
        assert_eq!(machine.current_state(root), Some(b));

        machine.send_signal("back");
        machine.update(0.5);
        assert_eq!(machine.current_state(root), Some(a));

        machine.update(0.5);
        assert_eq!(machine.current_state(root), Some(a));
        let timer = machine.transitions(a).next().and_then(Transition::timer);
        assert_eq!(timer.map(|t| t.elapsed()), Some(1.0));
    }

    #[test]
    fn redefining_a_transition_keeps_one_edge() {
        let mut machine = Machine::new("root");
        let a = machine.add_state("a");
        let b = machine.add_state("b");

        machine.change_to(a, b).when(|| true);
        machine.change_to(a, b).after(2.0);

        assert_eq!(machine.transitions(a).count(), 1);
        let transition = machine.on_transition_to(a, b).unwrap();
        assert!(transition.timer().is_some());
    }

    #[test]
    fn lookup_of_undefined_transition_fails() {
        let mut machine = Machine::new("root");
        let a = machine.add_state("a");
        let b = machine.add_state("b");

        let err = machine.on_transition_to(a, b).err();

        assert_eq!(
            err,
            Some(BuildError::UnknownTransition {
                from: "a".to_string(),
                to: "b".to_string(),
            })
        );
        assert!(machine.replace_transition_condition(a, b).is_err());
    }

    #[test]
    fn replace_transition_condition_disables_edge() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).when(|| true);
        machine.replace_transition_condition(a, b).unwrap();
        machine.start();

        machine.update(0.1);

        assert_eq!(machine.current_state(root), Some(a));
        assert_eq!(machine.transitions(a).count(), 1);
    }

    #[test]
    fn entering_without_starting_state_keeps_previous_child() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let a1 = machine.add_state("a1");
        let a2 = machine.add_state("a2");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to_sub_state(a, a1).if_signal_caught("one");
        machine.change_to(a, b).if_signal_caught("leave");
        machine.change_to(b, a).if_signal_caught("return");
        machine.change_to(a1, a2).if_signal_caught("two");
        machine.start();
        assert_eq!(machine.path(), "root.a");

        machine.send_signal("one");
        machine.update(0.1);
        assert_eq!(machine.path(), "root.a.a1");

        machine.send_signal("leave");
        machine.update(0.1);
        machine.send_signal("return");
        machine.update(0.1);

        assert_eq!(machine.path(), "root.a.a1");
    }

    #[test]
    fn history_records_fired_transitions() {
        let mut machine = Machine::with_history("root", 8);
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);
        machine.change_to(a, b).if_signal_caught("go");
        machine.start();

        machine.update(0.1);
        machine.send_signal("go");
        machine.update(0.1);

        let record = machine.history().last().unwrap();
        assert_eq!(machine.history().len(), 1);
        assert_eq!(record.owner, "root");
        assert_eq!(record.from.as_deref(), Some("a"));
        assert_eq!(record.to, "b");
        assert_eq!(record.kind, TransitionKind::Ordinary);
        assert_eq!(record.tick, 2);
    }

    #[test]
    fn history_is_disabled_by_default() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        machine.change_to_sub_state(root, a).when(|| true);
        machine.start();

        machine.update(0.1);

        assert_eq!(machine.current_state(root), Some(a));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn snapshot_serializes_active_chain() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        machine.start_at(root, a);
        machine.start();
        machine.update(0.1);

        let snapshot = machine.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(snapshot.path, vec!["root", "a"]);
        assert_eq!(json["tick"], 1);
        assert_eq!(json["path"][1], "a");
    }

    #[test]
    fn is_active_follows_root_chain() {
        let mut machine = Machine::new("root");
        let root = machine.root();
        let a = machine.add_state("a");
        let b = machine.add_state("b");
        machine.start_at(root, a);

        assert!(machine.is_active(root));
        assert!(machine.is_active(a));
        assert!(!machine.is_active(b));
        assert_eq!(machine.len(), 3);
    }

    #[test]
    #[should_panic(expected = "was not issued by this machine")]
    fn foreign_handle_panics() {
        let mut first = Machine::new("first");
        let mut second = Machine::new("second");
        let foreign = second.add_state("foreign");
        let _ = first.add_state("local");

        first.name(foreign);
    }

    #[test]
    #[should_panic(expected = "its own sub-state")]
    fn self_override_panics() {
        let mut machine = Machine::new("root");
        let root = machine.root();

        machine.change_to_sub_state(root, root);
    }
}
