//! Log of confirmed device transitions.
//!
//! Only visible, server-confirmed transitions are recorded: the stop-half of
//! a reboot acknowledges a request without moving the device anywhere, so it
//! never appears here. The log is immutable — `record` returns a new log.

use crate::core::state::{DeviceAction, DeviceState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One confirmed transition.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the confirmation.
    pub from: DeviceState,
    /// State after the confirmation.
    pub to: DeviceState,
    /// Action whose confirmation caused the transition.
    pub action: DeviceAction,
    /// When the confirmation was applied.
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record a transition happening now.
    pub fn now(from: DeviceState, to: DeviceState, action: DeviceAction) -> Self {
        Self {
            from,
            to,
            action,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, immutable log of confirmed transitions.
///
/// # Example
///
/// ```rust
/// use devstate::core::{DeviceAction, DeviceState, TransitionLog, TransitionRecord};
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord::now(
///     DeviceState::Stopped,
///     DeviceState::Running,
///     DeviceAction::Run,
/// ));
///
/// assert_eq!(log.records().len(), 1);
/// assert_eq!(log.path(), vec![&DeviceState::Stopped, &DeviceState::Running]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in confirmation order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// States traversed: the initial state, then the `to` of each record.
    pub fn path(&self) -> Vec<&DeviceState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Elapsed time between the first and last confirmation, if any.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
