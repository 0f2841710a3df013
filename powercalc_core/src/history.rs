//! # Calculation History
//!
//! Session-scoped, bounded record of successful computations. Entries are
//! immutable once recorded; when the ledger is full the oldest entry is
//! evicted. Nothing is persisted.
//!
//! The ledger is the engine's only shared mutable state. Appends are
//! serialized through a mutex, so one ledger can be shared between threads.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::history::{HistoryEntry, HistoryLedger};
//! use powercalc_core::outcome::Outcome;
//! use powercalc_core::validation::raw_inputs;
//!
//! let ledger = HistoryLedger::new();
//! ledger.record(HistoryEntry::new(
//!     "automation-throughput",
//!     raw_inputs([("t1", "10")]),
//!     Outcome::new().with("Throughput (units/h)", 360.0),
//! ));
//!
//! let recent = ledger.recent(5);
//! assert_eq!(recent.len(), 1);
//! assert_eq!(recent[0].domain_id, "automation-throughput");
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::outcome::Outcome;
use crate::validation::RawInputs;

/// Entries kept by [`HistoryLedger::new`]
pub const DEFAULT_CAPACITY: usize = 10;

/// One successful computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub domain_id: String,
    /// Raw values exactly as supplied
    pub inputs: RawInputs,
    pub outputs: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Snapshot a computation, stamped now
    pub fn new(domain_id: impl Into<String>, inputs: RawInputs, outputs: Outcome) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            domain_id: domain_id.into(),
            inputs,
            outputs,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded FIFO of [`HistoryEntry`]s.
#[derive(Debug)]
pub struct HistoryLedger {
    capacity: usize,
    entries: Mutex<VecDeque<HistoryEntry>>,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        HistoryLedger::new()
    }
}

impl HistoryLedger {
    /// Ledger holding the last [`DEFAULT_CAPACITY`] entries
    pub fn new() -> Self {
        HistoryLedger::with_capacity(DEFAULT_CAPACITY)
    }

    /// Ledger holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        HistoryLedger {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A panic while holding the lock cannot leave the deque half-updated, so a
    // poisoned lock is still safe to use.
    fn entries(&self) -> MutexGuard<'_, VecDeque<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry, evicting the oldest when full
    pub fn record(&self, entry: HistoryEntry) {
        let mut entries = self.entries();
        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!("Evicted history entry {} ({})", evicted.id, evicted.domain_id);
            }
        }
        debug!("Recorded history entry {} for {}", entry.id, entry.domain_id);
        entries.push_back(entry);
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries().iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries().clear();
    }
}
