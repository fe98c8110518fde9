use serde::{Deserialize, Serialize};
use std::fmt;

/// How a transition is evaluated by the node that owns the active chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Fireable only while its source is the evaluating node's active child.
    Ordinary,

    /// Owned by a composite node and fireable whatever descendant is active,
    /// as long as the node's active child is not already the target.
    Override,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinary => f.write_str("ordinary"),
            Self::Override => f.write_str("override"),
        }
    }
}
