//! Errors raised while configuring a machine.

use thiserror::Error;

/// Errors that can occur when looking up or reconfiguring transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No transition from '{from}' to '{to}' has been defined. Call change_to first")]
    UnknownTransition { from: String, to: String },
}
