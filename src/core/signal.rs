//! Per-node queue of pending signals.
//!
//! Every state keeps its own queue. A signal sent to a state is copied into
//! the queue of each node on its active chain, and each copy is consumed
//! independently by the guards that node evaluates.

/// Ordered multiset of pending signal identifiers.
///
/// Sending the same identifier twice queues two instances; [`SignalQueue::take`]
/// removes one instance at a time, so each instance satisfies at most one guard.
///
/// # Example
///
/// ```rust
/// use statecraft::core::SignalQueue;
///
/// let mut signals = SignalQueue::new();
/// signals.push("jump");
/// signals.push("jump");
///
/// assert!(signals.take("jump"));
/// assert!(signals.take("jump"));
/// assert!(!signals.take("jump"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalQueue {
    pending: Vec<String>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: impl Into<String>) {
        self.pending.push(signal.into());
    }

    /// Remove the oldest instance of `signal`, returning whether one was queued.
    pub fn take(&mut self, signal: &str) -> bool {
        match self.pending.iter().position(|s| s == signal) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, signal: &str) -> bool {
        self.pending.iter().any(|s| s == signal)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over pending signals in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }
}
