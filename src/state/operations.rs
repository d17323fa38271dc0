//! Per-operation lifecycle tracking.
//!
//! Every mutation walks `Idle -> Pending -> {Applied | Failed}`. The tracker
//! hands out monotonically increasing ids so a presentation layer can show a
//! spinner on exactly the row (or bulk action) that is in flight.
//!
//! Only the most recent terminal records are retained. Pending records are
//! never evicted.

use crate::model::{OperationError, RowId, Status};
use std::collections::{BTreeMap, HashSet};

/// Identifier of one tracked operation. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// What an operation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    /// Initial bulk load.
    Load {
        /// Rows requested.
        count: usize,
    },
    /// Single-row delete.
    Delete(RowId),
    /// Single-row status change.
    UpdateStatus(RowId, Status),
    /// Single-row score change. Holds the raw requested value, which may be
    /// out of range.
    UpdateScore(RowId, i64),
    /// Bulk delete of the listed ids.
    BulkDelete(HashSet<RowId>),
}

impl OperationKind {
    /// True if this operation targets `id`.
    pub fn targets(&self, id: &RowId) -> bool {
        match self {
            OperationKind::Load { .. } => false,
            OperationKind::Delete(target)
            | OperationKind::UpdateStatus(target, _)
            | OperationKind::UpdateScore(target, _) => target == id,
            OperationKind::BulkDelete(ids) => ids.contains(id),
        }
    }
}

/// Lifecycle state of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    /// Never started.
    #[default]
    Idle,
    /// Backend call in flight.
    Pending,
    /// Backend confirmed and local state was updated.
    Applied,
    /// Ended without touching local state.
    Failed(OperationError),
}

impl OperationStatus {
    /// True while the backend call is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationStatus::Pending)
    }
}

/// One row of the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// Operation identity.
    pub id: OperationId,
    /// What was requested.
    pub kind: OperationKind,
    /// Where it is in its lifecycle.
    pub status: OperationStatus,
}

/// Terminal records kept by [`OperationTracker::default`].
pub const DEFAULT_HISTORY: usize = 100;

/// Registry of started operations.
#[derive(Debug)]
pub struct OperationTracker {
    next_id: u64,
    history: usize,
    records: BTreeMap<OperationId, OperationRecord>,
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl OperationTracker {
    /// Create a tracker retaining at most `history` finished records.
    pub fn new(history: usize) -> Self {
        Self {
            next_id: 0,
            history,
            records: BTreeMap::new(),
        }
    }

    /// Register a new operation as `Pending`.
    pub fn begin(&mut self, kind: OperationKind) -> OperationId {
        self.next_id += 1;
        let id = OperationId(self.next_id);
        self.records.insert(
            id,
            OperationRecord {
                id,
                kind,
                status: OperationStatus::Pending,
            },
        );
        id
    }

    /// Move an operation to its terminal status. Unknown ids are ignored.
    pub fn finish(&mut self, id: OperationId, status: OperationStatus) {
        if let Some(record) = self.records.get_mut(&id) {
            record.status = status;
        }
        self.evict();
    }

    /// Current status; `Idle` for ids this tracker never issued or has
    /// already evicted.
    pub fn status(&self, id: OperationId) -> OperationStatus {
        self.records
            .get(&id)
            .map(|r| r.status.clone())
            .unwrap_or_default()
    }

    /// Full record for an id.
    pub fn get(&self, id: OperationId) -> Option<&OperationRecord> {
        self.records.get(&id)
    }

    /// Pending operations that touch `row`.
    pub fn pending_for<'a>(&'a self, row: &'a RowId) -> impl Iterator<Item = &'a OperationRecord> {
        self.records
            .values()
            .filter(move |r| r.status.is_pending() && r.kind.targets(row))
    }

    /// True if any operation is in flight.
    pub fn any_pending(&self) -> bool {
        self.records.values().any(|r| r.status.is_pending())
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.values()
    }

    /// Drop the oldest finished records beyond the history limit.
    fn evict(&mut self) {
        let mut finished = self
            .records
            .values()
            .filter(|r| !r.status.is_pending())
            .count();
        while finished > self.history {
            let oldest = self
                .records
                .values()
                .find(|r| !r.status.is_pending())
                .map(|r| r.id);
            let Some(oldest) = oldest else { break };
            self.records.remove(&oldest);
            finished -= 1;
        }
    }
}
