//! Fired-transition history tracking.
//!
//! Provides an opt-in, bounded log of the transitions a machine has taken.
//! The log is purely observational: it is never consulted by the tick
//! algorithm and recording into it cannot change which transition fires.

use super::kind::TransitionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     owner: "root".to_string(),
///     from: Some("idle".to_string()),
///     to: "walk".to_string(),
///     kind: TransitionKind::Ordinary,
///     tick: 4,
///     at: Utc::now(),
/// };
/// assert_eq!(record.to, "walk");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the node whose active child changed
    pub owner: String,
    /// Active child before the transition, if any
    pub from: Option<String>,
    /// Newly entered child
    pub to: String,
    pub kind: TransitionKind,
    /// Root tick during which the transition fired (0 before the first update)
    pub tick: u64,
    /// Wall-clock time the transition fired
    pub at: DateTime<Utc>,
}

/// Bounded, ordered history of fired transitions.
///
/// Once `limit` records are held, recording a new one drops the oldest.
/// A limit of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{TransitionHistory, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_limit(2);
/// for (tick, to) in ["a", "b", "c"].iter().enumerate() {
///     history.record(TransitionRecord {
///         owner: "root".to_string(),
///         from: None,
///         to: to.to_string(),
///         kind: TransitionKind::Ordinary,
///         tick: tick as u64,
///         at: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec!["b", "c"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    limit: usize,
    records: VecDeque<TransitionRecord>,
}

impl TransitionHistory {
    /// Create a history that keeps nothing.
    pub fn disabled() -> Self {
        Self::with_limit(0)
    }

    /// Create a history that keeps at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            records: VecDeque::with_capacity(limit.min(64)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Iterate over held records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Names of the entered states, in firing order.
    ///
    /// Records from every level of the hierarchy are interleaved, so this is
    /// a trace of entries rather than a single-level path.
    pub fn path(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.to.as_str()).collect()
    }

    /// Wall-clock time between the oldest and newest held record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(to: &str, tick: u64) -> TransitionRecord {
        TransitionRecord {
            owner: "root".to_string(),
            from: Some("prev".to_string()),
            to: to.to_string(),
            kind: TransitionKind::Ordinary,
            tick,
            at: Utc::now(),
        }
    }

    #[test]
    fn disabled_history_records_nothing() {
        let mut history = TransitionHistory::disabled();
        history.record(record("a", 1));

        assert!(!history.is_enabled());
        assert!(history.is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn history_preserves_order() {
        let mut history = TransitionHistory::with_limit(8);
        history.record(record("a", 1));
        history.record(record("b", 2));
        history.record(record("c", 3));

        assert_eq!(history.path(), vec!["a", "b", "c"]);
        let ticks: Vec<u64> = history.records().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![1, 2, 3]);
        assert_eq!(history.last().map(|r| r.to.as_str()), Some("c"));
    }

    #[test]
    fn history_evicts_oldest_when_full() {
        let mut history = TransitionHistory::with_limit(2);
        history.record(record("a", 1));
        history.record(record("b", 2));
        history.record(record("c", 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), vec!["b", "c"]);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = TransitionHistory::with_limit(4);
        let start = Utc::now();
        let mut first = record("a", 1);
        first.at = start;
        let mut second = record("b", 2);
        second.at = start + chrono::Duration::seconds(3);
        history.record(first);
        history.record(second);

        assert_eq!(history.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn history_serializes_to_json() {
        let mut history = TransitionHistory::with_limit(4);
        history.record(record("a", 1));

        let json = serde_json::to_string(&history).unwrap();
        let restored: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.limit(), 4);
        assert_eq!(restored.path(), vec!["a"]);
    }
}
