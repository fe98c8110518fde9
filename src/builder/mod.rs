//! Builder API for configuring transitions.
//!
//! Transitions are created by the machine (`change_to`,
//! `change_to_sub_state`) and configured in place through the fluent
//! [`TransitionBuilder`]:
//!
//! ```
//! use statecraft::Machine;
//!
//! let mut machine = Machine::new("root");
//! let idle = machine.add_state("idle");
//! let attack = machine.add_state("attack");
//!
//! machine
//!     .change_to(idle, attack)
//!     .if_signal_caught("swing")
//!     .and_after(0.25)
//!     .then_do(|| println!("swing!"));
//! ```

pub mod error;
pub mod transition;

pub use error::BuildError;
pub use transition::TransitionBuilder;
