//! Statecraft: a tick-driven hierarchical state machine runtime.
//!
//! A [`Machine`] owns a tree of named states. Each state owns guarded
//! outgoing transitions, a per-tick signal queue and four lifecycle
//! callbacks. The client drives the machine once per simulation tick with
//! [`Machine::update`] and once per fixed step with [`Machine::fixed_update`].
//!
//! # Core Concepts
//!
//! - **States**: named nodes addressed by [`StateId`] handles
//! - **Transitions**: guarded edges configured through [`TransitionBuilder`];
//!   ordinary ones fire from the parent's active child, override ones fire
//!   from their owner regardless of which descendant is active
//! - **Guards**: composable predicates over client state, signals, elapsed
//!   time and tick counts
//! - **Signals**: short-lived identifiers delivered to the active chain and
//!   consumed by at most one guard each
//!
//! The runtime is single-threaded: callbacks and guards are plain closures
//! and may capture `Rc`/`Cell` client state.
//!
//! # Example
//!
//! ```rust
//! use statecraft::Machine;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let grounded = Rc::new(Cell::new(true));
//!
//! let mut machine = Machine::new("player");
//! let player = machine.root();
//! let standing = machine.add_state("standing");
//! let airborne = machine.add_state("airborne");
//!
//! machine.start_at(player, standing);
//! machine.change_to(standing, airborne).if_signal_caught("jump");
//! machine.change_to(airborne, standing).when({
//!     let grounded = Rc::clone(&grounded);
//!     move || grounded.get()
//! }).and_after(0.2);
//!
//! machine.start();
//! machine.send_signal("jump");
//! machine.update(1.0 / 60.0);
//! assert_eq!(machine.path(), "player.airborne");
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, TransitionBuilder};
pub use crate::core::{
    Guard, SignalQueue, Timer, TransitionHistory, TransitionKind, TransitionRecord,
};
pub use crate::machine::{Machine, MachineSnapshot, StateId, Transition};
