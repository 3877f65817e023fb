//! Per-run visit tracing.
//!
//! Every run records the states it enters, in order, with UTC timestamps.
//! The trace is returned as part of the run's outcome for diagnostics; it is
//! immutable - recording returns a new trace.

use crate::core::name::StateName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one state entry during a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Visit<N> {
    /// The state that was entered.
    pub state: N,
    /// When the state's action began executing.
    pub entered_at: DateTime<Utc>,
}

/// Ordered record of the states one run entered.
///
/// # Example
///
/// ```rust
/// use statehook::RunTrace;
///
/// let trace = RunTrace::new()
///     .record("load")
///     .record("parse")
///     .record("emit");
///
/// assert_eq!(trace.path(), vec![&"load", &"parse", &"emit"]);
/// assert_eq!(trace.len(), 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunTrace<N> {
    visits: Vec<Visit<N>>,
}

impl<N: StateName> Default for RunTrace<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: StateName> RunTrace<N> {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self { visits: Vec::new() }
    }

    /// Record a state entry, returning a new trace.
    ///
    /// The existing trace is left untouched.
    pub fn record(&self, state: N) -> Self {
        let mut visits = self.visits.clone();
        visits.push(Visit {
            state,
            entered_at: Utc::now(),
        });
        Self { visits }
    }

    /// The states entered, in execution order.
    pub fn path(&self) -> Vec<&N> {
        self.visits.iter().map(|v| &v.state).collect()
    }

    /// Elapsed time between the first and last state entry.
    ///
    /// Returns `None` for an empty trace.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.visits.first()?, self.visits.last()?);
        last.entered_at
            .signed_duration_since(first.entered_at)
            .to_std()
            .ok()
    }

    /// Number of state entries recorded.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// All recorded visits.
    pub fn visits(&self) -> &[Visit<N>] {
        &self.visits
    }
}
