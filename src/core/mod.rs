//! Core building blocks of the state machine runtime.
//!
//! This module contains the leaf types the tick algorithm is built from:
//! - `Timer` for time-delayed transitions
//! - `SignalQueue` for per-node pending signals
//! - `Guard` predicates and their AND/OR composition
//! - Bounded history of fired transitions
//!
//! None of these types know about the state tree; they are driven by
//! [`crate::machine::Machine`].

mod guard;
mod history;
mod kind;
mod signal;
mod timer;

pub use guard::{Guard, GuardContext};
pub use history::{TransitionHistory, TransitionRecord};
pub use kind::TransitionKind;
pub use signal::SignalQueue;
pub use timer::Timer;
