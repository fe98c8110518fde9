//! The hierarchical state machine runtime.
//!
//! A [`Machine`] owns every state in an arena and drives the active chain
//! from its root. States are addressed by [`StateId`] handles; which child
//! of a state is active is a lookup, never ownership.
//!
//! # Tick Order
//!
//! Each `update(dt)` walks the active chain top-down. At every node:
//! 1. the node's own outgoing transitions advance one tick,
//! 2. the node evaluates its active child's ordinary transitions, then its
//!    own override transitions, firing at most one,
//! 3. the node's signal queue is cleared,
//! 4. `on_update(dt)` runs,
//! 5. the (possibly new) active child is updated.
//!
//! Because a transition is ticked by its source but evaluated earlier in the
//! same tick by the source's parent, time- and frame-delayed ordinary
//! transitions fire one tick after their threshold is crossed.

mod node;
mod runtime;
mod transition;

pub use node::StateId;
pub use runtime::{Machine, MachineSnapshot};
pub use transition::{Transition, TransitionAction};
